use crate::issues::IssueEvent;

/// True iff `event` closed a bug-labeled issue with an attached fixing commit.
///
/// Pure predicate: reopened/assigned/pinned events, closes without a commit,
/// and closes of unlabeled issues all fail it and are simply skipped — none of
/// those are errors.
pub fn closes_bug(event: &IssueEvent, bug_label: &str) -> bool {
    event.event == "closed"
        && event.commit_id.is_some()
        && event.issue.labels.iter().any(|label| label == bug_label)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
