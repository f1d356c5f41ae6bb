use super::classifier::closes_bug;
use super::resolver::resolve_suspects;
use super::suspects::partition_candidates;
use crate::error::Result;
use crate::git::RepoAccessor;
use crate::issues::IssueEvent;
use crate::types::NativeBug;
use std::collections::HashSet;
use tracing::{debug, info};

/// Issue-based provenance stream: classify close events, partition their blame
/// candidates, then resolve suspects across all issues of the project.
///
/// Event order does not matter — resolution is a set-membership cross-check.
/// An empty event list (project without tracker integration) yields an empty
/// set, not an error.
pub fn detect(
    repo: &dyn RepoAccessor,
    events: &[IssueEvent],
    bug_label: &str,
) -> Result<HashSet<NativeBug>> {
    let mut tuples = Vec::new();
    for event in events {
        if !closes_bug(event, bug_label) {
            continue;
        }
        // closes_bug guarantees the commit id is present.
        let Some(fixing_id) = event.commit_id.as_deref() else {
            continue;
        };
        debug!(fixing = fixing_id, issue = event.issue.number, "bug-closing event");
        tuples.push(partition_candidates(repo, fixing_id, event)?);
    }

    let bugs = resolve_suspects(tuples)
        .into_iter()
        .map(|tuple| tuple.into_bug())
        .collect::<Result<HashSet<_>>>()?;

    info!(bugs = bugs.len(), "issue-based detection finished");
    Ok(bugs)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
