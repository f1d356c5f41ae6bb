pub mod cache;

pub use cache::{EventFile, IssueEventCache};

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One issue lifecycle event as delivered by the tracker ("closed",
/// "reopened", "assigned", ...). Only close events with an attached commit
/// ever qualify as bug evidence; everything else is carried but ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEvent {
    pub event: String,
    /// Commit attached to the event, present on commit-triggered closes.
    #[serde(default)]
    pub commit_id: Option<String>,
    /// When the event itself happened (for a close event: the resolution time).
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub issue: IssueRef,
}

/// The issue an event belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRef {
    pub number: u64,
    #[serde(default)]
    pub labels: Vec<String>,
    /// When the issue was reported, normalized to UTC.
    pub created_at: DateTime<Utc>,
}

/// Source of issue lifecycle events for a project. Implementations may block
/// on I/O; fetch failures surface to the caller, retry policy lives elsewhere.
pub trait IssueEventSource {
    fn events_for(&self, project: &str) -> Result<Vec<IssueEvent>>;
}
