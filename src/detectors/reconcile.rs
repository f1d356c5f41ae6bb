use crate::types::{BugRecord, NativeBug};
use std::collections::HashSet;
use tracing::debug;

/// Merges the two provenance streams into one canonical set.
///
/// Issue-based evidence always wins: every issue-based bug is kept, and a
/// message-based bug survives only when no issue-based bug shares its fixing
/// commit. The asymmetry is deliberate — a message-based introducing set is
/// never merged into an issue-based bug for the same fix, it is dropped.
pub fn reconcile(
    issue_bugs: HashSet<NativeBug>,
    message_bugs: HashSet<NativeBug>,
) -> HashSet<NativeBug> {
    let issue_fixes: HashSet<String> = issue_bugs
        .iter()
        .map(|bug| bug.fixing_commit().id.clone())
        .collect();

    let mut merged = issue_bugs;
    for bug in message_bugs {
        if issue_fixes.contains(&bug.fixing_commit().id) {
            debug!(
                fixing = %bug.fixing_commit().id,
                "message-based bug shadowed by issue-based evidence"
            );
        } else {
            merged.insert(bug);
        }
    }
    merged
}

// ─── Tests ────────────────────────────────────────────────────────────────────
