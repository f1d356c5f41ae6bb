use crate::types::{BugRecord, RawBug};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

pub fn report_terminal(repo_name: &str, bugs: &[RawBug]) {
    eprintln!();
    println!(
        "{} — {} ({} bug{})",
        "🐛 git-bugtrail".red().bold(),
        repo_name.bright_black(),
        bugs.len().to_string().bright_black(),
        if bugs.len() != 1 { "s" } else { "" },
    );
    println!();

    if bugs.is_empty() {
        println!("{}", "  No bugs found in this history.".yellow());
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["FIXED BY", "ISSUE", "REPORTED", "RESOLVED", "INTRODUCED BY"]);

    for bug in bugs {
        let issue = match bug.issue_id() {
            Some(number) => format!("#{number}"),
            None => "msg".bright_black().to_string(),
        };
        table.add_row(vec![
            short_id(bug.fixing_commit()),
            issue,
            date_or_dash(bug.creation_date()),
            date_or_dash(bug.resolution_date()),
            introducers(bug),
        ]);
    }

    println!("{table}");

    let issue_backed = bugs.iter().filter(|b| b.issue_id().is_some()).count();
    println!(
        "  {} from issue tracker, {} from commit messages",
        issue_backed.to_string().cyan(),
        (bugs.len() - issue_backed).to_string().cyan(),
    );
    println!();
}

fn short_id(id: &str) -> String {
    id.chars().take(10).collect()
}

fn date_or_dash(date: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "—".to_string(),
    }
}

fn introducers(bug: &RawBug) -> String {
    if bug.introducing_commits().is_empty() {
        return "(none found)".bright_black().to_string();
    }
    let shown: Vec<String> = bug
        .introducing_commits()
        .iter()
        .take(3)
        .map(|id| short_id(id))
        .collect();
    let rest = bug.introducing_commits().len().saturating_sub(3);
    if rest > 0 {
        format!("{} (+{rest} more)", shown.join(", "))
    } else {
        shown.join(", ")
    }
}
