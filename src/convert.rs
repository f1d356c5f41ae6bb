//! Conversion between the two bug representations.
//!
//! `to_raw` is pure; `to_native` needs a repository to resolve each hash back
//! to commit metadata and fails on the first hash the repository does not
//! know. Both preserve issue id and dates unchanged.

use crate::error::Result;
use crate::git::RepoAccessor;
use crate::types::{BugRecord, NativeBug, RawBug};
use std::collections::BTreeSet;

pub fn to_raw(bug: &NativeBug) -> RawBug {
    RawBug::new(
        bug.fixing_commit().id.clone(),
        bug.introducing_commits()
            .iter()
            .map(|commit| commit.id.clone())
            .collect(),
        bug.issue_id(),
        bug.creation_date(),
        bug.resolution_date(),
    )
}

pub fn to_native(bug: &RawBug, repo: &dyn RepoAccessor) -> Result<NativeBug> {
    let fixing = repo.resolve(bug.fixing_commit())?;
    let introducing: BTreeSet<_> = bug
        .introducing_commits()
        .iter()
        .map(|id| repo.resolve(id))
        .collect::<Result<_>>()?;
    Ok(NativeBug::new(
        fixing,
        introducing,
        bug.issue_id(),
        bug.creation_date(),
        bug.resolution_date(),
    ))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
