use clap::Parser;
use colored::Colorize;
use git_bugtrail::config::{load_config, print_template, BugtrailConfig};
use git_bugtrail::issues::{EventFile, IssueEventCache, IssueEventSource};
use git_bugtrail::reporters::{json::report_json, terminal::report_terminal};
use git_bugtrail::types::BugRecord;
use git_bugtrail::{BugFilter, BugProvider, GitRepository, RawBug};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "git-bugtrail",
    about = "🐛 Trace bug-fixing commits back to the commits that introduced the bugs",
    version,
    long_about = "Links each bug-fixing commit in a repository to the commits that\n\
                  introduced the bug (SZZ). Evidence comes from two streams: issue\n\
                  tracker close events (read from a local JSON snapshot) and\n\
                  fix-announcing commit messages. Issue evidence wins on conflict."
)]
struct Args {
    /// Path to the git repository (defaults to the current directory).
    #[arg(value_name = "PATH")]
    repo_path: Option<PathBuf>,

    /// Tracker-side project slug, e.g. "owner/repo".
    /// Defaults to the repository directory name.
    #[arg(long)]
    project: Option<String>,

    /// Directory holding per-project issue-event snapshots.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Explicit issue-event JSON file (overrides --cache-dir lookup).
    #[arg(long)]
    events: Option<PathBuf>,

    /// Only report the bug fixed by this commit.
    #[arg(long)]
    fixing: Option<String>,

    /// Only report bugs introduced by this commit.
    #[arg(long)]
    introduced_by: Option<String>,

    /// Issue label that marks bug reports.
    #[arg(long, default_value = "bug")]
    label: String,

    /// Output format: terminal, json
    #[arg(long, default_value = "terminal")]
    format: String,

    /// Output file (json only).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Config file path (default: .git-bugtrail.yml in the repo, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print an annotated config template and exit.
    #[arg(long)]
    generate_config: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.generate_config {
        if let Err(e) = print_template(args.output.as_deref()) {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run(args) {
        eprintln!("{} {e}", "error:".red().bold());
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> git_bugtrail::Result<()> {
    let repo_path = match &args.repo_path {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let config = load_config_for(&args, &repo_path)?;

    // CLI flags take precedence over config file values.
    let project = args
        .project
        .clone()
        .or(config.project)
        .unwrap_or_else(|| repo_dir_name(&repo_path));
    let label = if args.label == "bug" {
        config.bug_label.unwrap_or(args.label)
    } else {
        args.label
    };
    let format = if args.format == "terminal" {
        config.format.unwrap_or(args.format)
    } else {
        args.format
    };
    let output = args
        .output
        .or_else(|| config.output.map(PathBuf::from));

    let events: Box<dyn IssueEventSource> = match (&args.events, &args.cache_dir) {
        (Some(file), _) => Box::new(EventFile::new(file.clone())),
        (None, Some(dir)) => Box::new(IssueEventCache::new(dir.clone())),
        (None, None) => match config.cache_dir {
            Some(dir) => Box::new(IssueEventCache::new(PathBuf::from(dir))),
            None => Box::new(IssueEventCache::with_default_dir()),
        },
    };

    let repo = GitRepository::open(&repo_path)?;
    let provider = BugProvider::new(repo, events, project.clone()).with_bug_label(label);

    let mut filter = BugFilter::all();
    filter.fixing_commit = args.fixing;
    filter.introducing_commit = args.introduced_by;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("spinner template"),
    );
    spinner.set_message(format!("Tracing bug lineage in {project}..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = provider.find_raw_bugs(&filter);
    spinner.finish_and_clear();

    let mut bugs: Vec<RawBug> = result?.into_iter().collect();
    bugs.sort_by(|a, b| {
        (a.issue_id().is_none(), a.fixing_commit())
            .cmp(&(b.issue_id().is_none(), b.fixing_commit()))
    });

    match format.as_str() {
        "json" => report_json(&bugs, output.as_deref())?,
        _ => report_terminal(&project, &bugs),
    }

    Ok(())
}

fn load_config_for(args: &Args, repo_path: &std::path::Path) -> git_bugtrail::Result<BugtrailConfig> {
    if let Some(path) = &args.config {
        return load_config(path);
    }
    let default_path = repo_path.join(".git-bugtrail.yml");
    if default_path.exists() {
        return load_config(&default_path);
    }
    Ok(BugtrailConfig::default())
}

fn repo_dir_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repository".to_string())
}
