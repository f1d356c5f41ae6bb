use super::{IssueEvent, IssueEventSource};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory of per-project issue-event snapshots, one JSON file per project.
///
/// This is the explicitly owned replacement for a process-global tracker
/// cache: construct it once and hand it to the provider. Refreshing the
/// snapshots from the tracker API is a separate layer's job; this type only
/// reads what that layer wrote.
pub struct IssueEventCache {
    cache_dir: PathBuf,
}

impl IssueEventCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Uses the platform cache directory (`~/.cache/git-bugtrail` on Linux).
    pub fn with_default_dir() -> Self {
        let dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("git-bugtrail");
        Self::new(dir)
    }

    fn snapshot_path(&self, project: &str) -> PathBuf {
        // "owner/repo" → "owner_repo_issue_events.json"
        let stem = project.replace('/', "_");
        self.cache_dir.join(format!("{stem}_issue_events.json"))
    }
}

impl IssueEventSource for IssueEventCache {
    fn events_for(&self, project: &str) -> Result<Vec<IssueEvent>> {
        let path = self.snapshot_path(project);
        if !path.exists() {
            // A project without tracker integration is not an error: the
            // issue-based stream degrades to empty.
            debug!(project, path = %path.display(), "no issue-event snapshot");
            return Ok(Vec::new());
        }
        read_events(&path)
    }
}

/// A single explicit event file, used when the caller already knows where the
/// snapshot lives (e.g. the `--events` CLI flag). The project name is ignored.
pub struct EventFile {
    path: PathBuf,
}

impl EventFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IssueEventSource for EventFile {
    fn events_for(&self, _project: &str) -> Result<Vec<IssueEvent>> {
        read_events(&self.path)
    }
}

fn read_events(path: &Path) -> Result<Vec<IssueEvent>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::EventCache {
        path: path.to_path_buf(),
        source,
    })?;
    let events: Vec<IssueEvent> =
        serde_json::from_str(&content).map_err(|source| Error::EventCacheFormat {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), count = events.len(), "loaded issue events");
    Ok(events)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
