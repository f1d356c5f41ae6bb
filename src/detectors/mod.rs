pub mod classifier;
pub mod issue_based;
pub mod message_based;
pub mod reconcile;
pub mod resolver;
pub mod suspects;

pub use reconcile::reconcile;
pub use suspects::SuspectTuple;

/// Issue label that marks an issue as a bug report.
pub const DEFAULT_BUG_LABEL: &str = "bug";
