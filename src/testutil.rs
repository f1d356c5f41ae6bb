//! In-memory repository accessor for unit tests.

use crate::error::{Error, Result};
use crate::git::RepoAccessor;
use crate::types::{BlameRange, CommitInfo};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Scripted stand-in for a real repository: commits are registered with fixed
/// committer times and blame results are set per fixing commit.
pub(crate) struct FakeRepo {
    commits: HashMap<String, CommitInfo>,
    blames: HashMap<String, HashMap<BlameRange, HashSet<String>>>,
    /// Insertion order, oldest first.
    order: Vec<String>,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self {
            commits: HashMap::new(),
            blames: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn add_commit(&mut self, id: &str, committer_time: &str, summary: &str) {
        let committer_time: DateTime<Utc> = committer_time.parse().expect("test timestamp");
        self.commits.insert(
            id.to_string(),
            CommitInfo {
                id: id.to_string(),
                author: "dev@test.com".to_string(),
                committer_time,
                summary: summary.to_string(),
                parent_ids: self.order.last().cloned().into_iter().collect(),
            },
        );
        self.order.push(id.to_string());
    }

    /// Registers the introducing candidates blame reports for `fixing_id`,
    /// all under one synthetic line range.
    pub fn set_blame(&mut self, fixing_id: &str, candidates: &[&str]) {
        let range = BlameRange {
            path: "src/lib.rs".to_string(),
            start_line: 1,
            line_count: candidates.len() as u32,
        };
        let origins = candidates.iter().map(|id| id.to_string()).collect();
        self.blames
            .insert(fixing_id.to_string(), [(range, origins)].into_iter().collect());
    }
}

impl RepoAccessor for FakeRepo {
    fn resolve(&self, id: &str) -> Result<CommitInfo> {
        self.commits
            .get(id)
            .cloned()
            .ok_or_else(|| Error::CommitLookup {
                id: id.to_string(),
                source: git2::Error::from_str("object not found"),
            })
    }

    fn blame_introducing(&self, id: &str) -> Result<HashMap<BlameRange, HashSet<String>>> {
        // Unknown commit is a lookup error; a known commit without scripted
        // blame data simply has no candidates.
        self.resolve(id)?;
        Ok(self.blames.get(id).cloned().unwrap_or_default())
    }

    fn walk_history(&self) -> Result<Vec<CommitInfo>> {
        Ok(self
            .order
            .iter()
            .rev()
            .map(|id| self.commits[id].clone())
            .collect())
    }
}
