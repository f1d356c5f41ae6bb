//! Trace bug-fixing commits back to the commits that introduced the bugs.
//!
//! Two independent evidence streams — issue-tracker close events and
//! commit-message heuristics — are reconciled into one canonical set of bug
//! records, each linking a fixing commit to its introducing commits (the
//! classic SZZ lineage). The entry point is [`BugProvider`].

pub mod config;
pub mod convert;
pub mod detectors;
pub mod error;
pub mod git;
pub mod issues;
pub mod provider;
pub mod reporters;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{Error, Result};
pub use git::{GitRepository, RepoAccessor};
pub use provider::{BugFilter, BugProvider};
pub use types::{BugRecord, CommitInfo, NativeBug, RawBug};
