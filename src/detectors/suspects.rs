use crate::error::{Error, Result};
use crate::git::RepoAccessor;
use crate::issues::IssueEvent;
use crate::types::{CommitInfo, NativeBug};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

/// Blame candidates of one issue-close event, split by when they landed
/// relative to the bug report.
///
/// Candidates that predate the report are credible introducers and go straight
/// into `non_suspects`. Candidates that postdate it merely look co-located
/// with the fix and wait in `uncleared_suspects` until the resolver either
/// corroborates or discards them. Owned exclusively by the resolution pass
/// that created it; consumed once via [`SuspectTuple::into_bug`].
#[derive(Debug)]
pub struct SuspectTuple {
    fixing_commit: CommitInfo,
    non_suspects: HashSet<CommitInfo>,
    uncleared_suspects: Vec<CommitInfo>,
    cleared_suspects: HashSet<CommitInfo>,
    issue_id: u64,
    creation_date: DateTime<Utc>,
    resolution_date: Option<DateTime<Utc>>,
}

impl SuspectTuple {
    pub fn fixing_commit(&self) -> &CommitInfo {
        &self.fixing_commit
    }

    pub fn non_suspects(&self) -> &HashSet<CommitInfo> {
        &self.non_suspects
    }

    pub fn issue_id(&self) -> u64 {
        self.issue_id
    }

    pub fn is_cleared(&self) -> bool {
        self.uncleared_suspects.is_empty()
    }

    /// Removes one suspect awaiting classification. Each suspect is popped
    /// exactly once over the tuple's lifetime.
    pub(crate) fn pop_suspect(&mut self) -> Option<CommitInfo> {
        self.uncleared_suspects.pop()
    }

    /// Marks a popped suspect as a confirmed introducing commit.
    pub(crate) fn clear(&mut self, suspect: CommitInfo) {
        self.cleared_suspects.insert(suspect);
    }

    /// Converts the cleared tuple into its bug record:
    /// `introducing = non_suspects ∪ cleared_suspects`.
    ///
    /// Fails if suspects remain, which cannot happen once the resolver has run.
    pub fn into_bug(self) -> Result<NativeBug> {
        if !self.is_cleared() {
            return Err(Error::UnclearedSuspects {
                fixing: self.fixing_commit.id,
                remaining: self.uncleared_suspects.len(),
            });
        }
        let introducing = self
            .non_suspects
            .into_iter()
            .chain(self.cleared_suspects)
            .collect();
        Ok(NativeBug::new(
            self.fixing_commit,
            introducing,
            Some(self.issue_id),
            Some(self.creation_date),
            self.resolution_date,
        ))
    }
}

/// Gathers the blame candidates for a qualifying close event and partitions
/// them against the issue's report time.
///
/// The boundary is strict: a candidate committed at exactly the report time
/// predates the report for our purposes and is a non-suspect.
pub fn partition_candidates(
    repo: &dyn RepoAccessor,
    fixing_id: &str,
    event: &IssueEvent,
) -> Result<SuspectTuple> {
    let fixing_commit = repo.resolve(fixing_id)?;
    let reported_at = event.issue.created_at;

    let mut candidate_ids: HashSet<String> = HashSet::new();
    for origins in repo.blame_introducing(fixing_id)?.into_values() {
        candidate_ids.extend(origins);
    }

    let mut non_suspects = HashSet::new();
    let mut uncleared_suspects = Vec::new();
    for id in candidate_ids {
        let candidate = repo.resolve(&id)?;
        if candidate.committer_time > reported_at {
            uncleared_suspects.push(candidate);
        } else {
            non_suspects.insert(candidate);
        }
    }

    debug!(
        fixing = fixing_id,
        issue = event.issue.number,
        non_suspects = non_suspects.len(),
        suspects = uncleared_suspects.len(),
        "partitioned blame candidates"
    );

    Ok(SuspectTuple {
        fixing_commit,
        non_suspects,
        uncleared_suspects,
        cleared_suspects: HashSet::new(),
        issue_id: event.issue.number,
        creation_date: reported_at,
        resolution_date: event.created_at,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
