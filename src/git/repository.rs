use crate::error::{Error, Result};
use crate::types::{BlameRange, CommitInfo};
use chrono::{DateTime, Utc};
use git2::{BlameOptions, DiffOptions, Repository};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// The seam the detectors consume. All calls are synchronous and may block on
/// the underlying git tooling; none of them retry.
pub trait RepoAccessor {
    /// Resolves a commit hash (or any revparse-able spec) to its metadata.
    fn resolve(&self, id: &str) -> Result<CommitInfo>;

    /// For every line changed by `id` relative to its first parent, the set of
    /// commits that last modified that line before `id` — the raw SZZ
    /// introducing candidates. A commit without a parent yields an empty map.
    fn blame_introducing(&self, id: &str) -> Result<HashMap<BlameRange, HashSet<String>>>;

    /// Full commit history from HEAD, newest first.
    fn walk_history(&self) -> Result<Vec<CommitInfo>>;
}

/// Repository accessor backed by libgit2.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Self { repo })
    }

    fn lookup(&self, id: &str) -> Result<git2::Commit<'_>> {
        self.repo
            .revparse_single(id)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|source| Error::CommitLookup {
                id: id.to_string(),
                source,
            })
    }

    fn commit_info(commit: &git2::Commit<'_>) -> CommitInfo {
        CommitInfo {
            id: commit.id().to_string(),
            author: commit.author().name().unwrap_or("Unknown").to_string(),
            committer_time: to_utc(commit.time().seconds()),
            summary: commit.summary().unwrap_or("").to_string(),
            parent_ids: commit.parent_ids().map(|oid| oid.to_string()).collect(),
        }
    }
}

fn to_utc(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(seconds, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

impl RepoAccessor for GitRepository {
    fn resolve(&self, id: &str) -> Result<CommitInfo> {
        Ok(Self::commit_info(&self.lookup(id)?))
    }

    fn blame_introducing(&self, id: &str) -> Result<HashMap<BlameRange, HashSet<String>>> {
        let commit = self.lookup(id)?;
        if commit.parent_count() == 0 {
            debug!(commit = %commit.id(), "blame on root commit, no candidates");
            return Ok(HashMap::new());
        }
        let parent = commit.parent(0)?;

        // Zero context lines so each hunk covers exactly the changed lines.
        let mut diff_opts = DiffOptions::new();
        diff_opts.context_lines(0);
        diff_opts.ignore_filemode(true);
        let diff = self.repo.diff_tree_to_tree(
            Some(&parent.tree()?),
            Some(&commit.tree()?),
            Some(&mut diff_opts),
        )?;

        // Pre-image spans per file. Pure insertions have no old-side lines and
        // therefore no one to blame.
        let mut spans_by_path: HashMap<String, Vec<(u32, u32)>> = HashMap::new();
        diff.foreach(
            &mut |_, _| true,
            None,
            Some(&mut |delta, hunk| {
                if hunk.old_lines() > 0 {
                    if let Some(path) = delta.old_file().path().and_then(|p| p.to_str()) {
                        spans_by_path
                            .entry(path.to_string())
                            .or_default()
                            .push((hunk.old_start(), hunk.old_lines()));
                    }
                }
                true
            }),
            None,
        )?;

        let mut ranges: HashMap<BlameRange, HashSet<String>> = HashMap::new();
        for (path, spans) in spans_by_path {
            // One blame per touched file, capped at the parent revision.
            let mut blame_opts = BlameOptions::new();
            blame_opts.newest_commit(parent.id());
            let blame = self
                .repo
                .blame_file(Path::new(&path), Some(&mut blame_opts))?;

            for (start, count) in spans {
                let mut origins = HashSet::new();
                for line in start..start + count {
                    if let Some(hunk) = blame.get_line(line as usize) {
                        origins.insert(hunk.final_commit_id().to_string());
                    }
                }
                ranges.insert(
                    BlameRange {
                        path: path.clone(),
                        start_line: start,
                        line_count: count,
                    },
                    origins,
                );
            }
        }

        debug!(
            commit = %commit.id(),
            ranges = ranges.len(),
            "blamed changed lines of fixing commit"
        );
        Ok(ranges)
    }

    fn walk_history(&self) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(git2::Sort::TIME)?;

        let mut history = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            history.push(Self::commit_info(&commit));
        }
        Ok(history)
    }
}
