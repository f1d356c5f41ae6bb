use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A commit hash could not be resolved in the repository. Surfaced as-is,
    /// never retried here.
    #[error("commit '{id}' not found in repository")]
    CommitLookup {
        id: String,
        #[source]
        source: git2::Error,
    },

    /// Any other libgit2 failure (corrupt object, unreadable repository, ...).
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    /// A bug was requested from a suspect tuple that still holds unresolved
    /// suspects. Unreachable when the resolver has run; indicates an internal
    /// logic error, not a user-facing condition.
    #[error("bug for fix '{fixing}' requested while {remaining} suspect(s) are unresolved")]
    UnclearedSuspects { fixing: String, remaining: usize },

    #[error("cannot read issue-event cache '{path}'")]
    EventCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed issue-event cache '{path}'")]
    EventCacheFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}
