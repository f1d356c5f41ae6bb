use crate::error::Result;
use crate::git::RepoAccessor;
use crate::types::NativeBug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use tracing::info;

// Whole-word match for the six accepted tokens: fix/fixed/fixes in lower and
// title case. "Refix" and "prefix" must not match, nor FIX/FIXED.
static FIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[Ff]ix(?:es|ed)?\b").expect("fix keyword regex"));

/// True iff the first line of `message` announces a fix.
pub fn is_fix_message(message: &str) -> bool {
    let first_line = message.lines().next().unwrap_or("");
    FIX_PATTERN.is_match(first_line)
}

/// Commit-message provenance stream: walk the whole history and treat every
/// fix-announcing commit as a fixing commit.
///
/// The message itself is the evidence here, so blame candidates are taken
/// as-is — no temporal partitioning, no issue id.
pub fn detect(repo: &dyn RepoAccessor) -> Result<HashSet<NativeBug>> {
    let mut bugs = HashSet::new();
    for commit in repo.walk_history()? {
        if !is_fix_message(&commit.summary) {
            continue;
        }

        let mut candidate_ids: HashSet<String> = HashSet::new();
        for origins in repo.blame_introducing(&commit.id)?.into_values() {
            candidate_ids.extend(origins);
        }
        let introducing: BTreeSet<_> = candidate_ids
            .into_iter()
            .map(|id| repo.resolve(&id))
            .collect::<Result<_>>()?;

        bugs.insert(NativeBug::new(commit, introducing, None, None, None));
    }

    info!(bugs = bugs.len(), "commit-message detection finished");
    Ok(bugs)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeRepo;
    use crate::types::BugRecord;
    use std::collections::BTreeSet;

    #[test]
    fn test_accepts_the_six_keywords_on_the_first_line() {
        for msg in [
            "fix overflow in parser",
            "Fix login",
            "fixed the build",
            "Fixed function arguments",
            "fixes #42",
            "Fixes answer to everything",
        ] {
            assert!(is_fix_message(msg), "'{msg}' should match");
        }
    }

    #[test]
    fn test_match_is_whole_word() {
        for msg in ["Refix login", "prefix handling", "add bugfixes", "suffixed names"] {
            assert!(!is_fix_message(msg), "'{msg}' must not match");
        }
    }

    #[test]
    fn test_match_is_case_sensitive_beyond_the_first_letter() {
        for msg in ["FIX crash", "FIXED crash", "fiXes crash"] {
            assert!(!is_fix_message(msg), "'{msg}' must not match");
        }
    }

    #[test]
    fn test_only_the_first_line_counts() {
        let msg = "Added documentation\nGrammar errors need to be fixed";
        assert!(!is_fix_message(msg), "keyword on a later line must not match");
    }

    #[test]
    fn test_history_walk_collects_fixing_commits() {
        let mut repo = FakeRepo::new();
        repo.add_commit("1240", "2020-04-20T10:00:00Z", "initial import");
        repo.add_commit("1241", "2020-04-21T10:00:00Z", "Fixed first issue");
        repo.add_commit("1242", "2020-04-22T10:00:00Z", "Added documentation");
        repo.add_commit("1243", "2020-04-23T10:00:00Z", "Added feature X");
        repo.add_commit("1244", "2020-04-24T10:00:00Z", "fixes second problem");
        repo.set_blame("1241", &["1240"]);
        repo.set_blame("1244", &["1240", "1242"]);

        let bugs = detect(&repo).expect("detect");
        let fixes: BTreeSet<String> = bugs.iter().map(|b| b.fixing_commit().id.clone()).collect();
        assert_eq!(
            fixes,
            ["1241".to_string(), "1244".to_string()].into_iter().collect()
        );

        for bug in &bugs {
            assert_eq!(bug.issue_id(), None, "message-derived bugs carry no issue");
            assert_eq!(bug.creation_date(), None);
            if bug.fixing_commit().id == "1244" {
                let intro: BTreeSet<String> = bug
                    .introducing_commits()
                    .iter()
                    .map(|c| c.id.clone())
                    .collect();
                assert_eq!(
                    intro,
                    ["1240".to_string(), "1242".to_string()].into_iter().collect(),
                    "blame candidates are trusted without temporal filtering"
                );
            }
        }
    }

    #[test]
    fn test_fixing_commit_without_blame_candidates_is_kept() {
        let mut repo = FakeRepo::new();
        repo.add_commit("root", "2020-04-20T10:00:00Z", "Fix everything");

        let bugs = detect(&repo).expect("detect");
        assert_eq!(bugs.len(), 1);
        assert!(bugs.iter().next().unwrap().introducing_commits().is_empty());
    }
}
