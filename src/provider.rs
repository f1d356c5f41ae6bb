use crate::convert::to_raw;
use crate::detectors::{issue_based, message_based, reconcile, DEFAULT_BUG_LABEL};
use crate::error::Result;
use crate::git::RepoAccessor;
use crate::issues::IssueEventSource;
use crate::types::{BugRecord, NativeBug, RawBug};
use std::collections::HashSet;
use tracing::info;

/// Narrows a query to bugs fixed by one commit or introduced by one commit.
/// The default filter accepts everything.
#[derive(Debug, Default, Clone)]
pub struct BugFilter {
    pub fixing_commit: Option<String>,
    pub introducing_commit: Option<String>,
}

impl BugFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_fix(id: impl Into<String>) -> Self {
        Self {
            fixing_commit: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_introduction(id: impl Into<String>) -> Self {
        Self {
            introducing_commit: Some(id.into()),
            ..Self::default()
        }
    }

    fn matches(&self, bug: &NativeBug) -> bool {
        if let Some(fix) = &self.fixing_commit {
            if bug.fixing_commit().id != *fix {
                return false;
            }
        }
        if let Some(intro) = &self.introducing_commit {
            if !bug.introducing_commits().iter().any(|c| c.id == *intro) {
                return false;
            }
        }
        true
    }
}

/// The in-process query surface: runs both provenance streams over one
/// project, reconciles them, and answers filtered queries in either
/// representation.
pub struct BugProvider<R: RepoAccessor> {
    repo: R,
    events: Box<dyn IssueEventSource>,
    project: String,
    bug_label: String,
}

impl<R: RepoAccessor> BugProvider<R> {
    pub fn new(repo: R, events: Box<dyn IssueEventSource>, project: impl Into<String>) -> Self {
        Self {
            repo,
            events,
            project: project.into(),
            bug_label: DEFAULT_BUG_LABEL.to_string(),
        }
    }

    /// Overrides the issue label that marks bug reports.
    pub fn with_bug_label(mut self, label: impl Into<String>) -> Self {
        self.bug_label = label.into();
        self
    }

    /// All bugs matching `filter`, over live commit metadata.
    pub fn find_bugs(&self, filter: &BugFilter) -> Result<HashSet<NativeBug>> {
        let events = self.events.events_for(&self.project)?;
        let issue_bugs = issue_based::detect(&self.repo, &events, &self.bug_label)?;
        let message_bugs = message_based::detect(&self.repo)?;
        let merged = reconcile(issue_bugs, message_bugs);
        info!(
            project = %self.project,
            bugs = merged.len(),
            "reconciled provenance streams"
        );
        Ok(merged.into_iter().filter(|bug| filter.matches(bug)).collect())
    }

    /// All bugs matching `filter`, over plain hash strings.
    pub fn find_raw_bugs(&self, filter: &BugFilter) -> Result<HashSet<RawBug>> {
        Ok(self.find_bugs(filter)?.iter().map(to_raw).collect())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
