use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

// ─── Commit Metadata ──────────────────────────────────────────────────────────

/// Commit metadata as returned by the repository accessor.
///
/// Identity is the commit hash: equality, ordering, and hashing all ignore the
/// remaining fields, so a `CommitInfo` can stand in for its hash in sets.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// Full hex object id.
    pub id: String,
    pub author: String,
    /// Committer timestamp, normalized to UTC.
    pub committer_time: DateTime<Utc>,
    /// First line of the commit message.
    pub summary: String,
    pub parent_ids: Vec<String>,
}

impl PartialEq for CommitInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CommitInfo {}

impl PartialOrd for CommitInfo {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CommitInfo {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for CommitInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A run of lines in one file touched by a fixing commit, keyed against the
/// pre-image (parent) side of the diff.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlameRange {
    pub path: String,
    /// 1-based first line on the parent side.
    pub start_line: u32,
    pub line_count: u32,
}

// ─── Bug Records ──────────────────────────────────────────────────────────────

/// Read-only view shared by the two bug representations.
pub trait BugRecord {
    type Commit: Ord;

    fn fixing_commit(&self) -> &Self::Commit;
    fn introducing_commits(&self) -> &BTreeSet<Self::Commit>;
    fn issue_id(&self) -> Option<u64>;
    /// When the underlying issue was reported. `None` for message-derived bugs.
    fn creation_date(&self) -> Option<DateTime<Utc>>;
    /// When the issue was closed. `None` for message-derived bugs.
    fn resolution_date(&self) -> Option<DateTime<Utc>>;
}

/// A bug record over live commit metadata, usable for further history queries.
///
/// Constructed fully formed by a detector and never mutated afterwards.
/// Equality and hashing cover `(fixing_commit, introducing_commits, issue_id)`
/// only — the dates are informational.
#[derive(Debug, Clone)]
pub struct NativeBug {
    fixing_commit: CommitInfo,
    introducing_commits: BTreeSet<CommitInfo>,
    issue_id: Option<u64>,
    creation_date: Option<DateTime<Utc>>,
    resolution_date: Option<DateTime<Utc>>,
}

impl NativeBug {
    pub fn new(
        fixing_commit: CommitInfo,
        introducing_commits: BTreeSet<CommitInfo>,
        issue_id: Option<u64>,
        creation_date: Option<DateTime<Utc>>,
        resolution_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            fixing_commit,
            introducing_commits,
            issue_id,
            creation_date,
            resolution_date,
        }
    }
}

impl BugRecord for NativeBug {
    type Commit = CommitInfo;

    fn fixing_commit(&self) -> &CommitInfo {
        &self.fixing_commit
    }

    fn introducing_commits(&self) -> &BTreeSet<CommitInfo> {
        &self.introducing_commits
    }

    fn issue_id(&self) -> Option<u64> {
        self.issue_id
    }

    fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    fn resolution_date(&self) -> Option<DateTime<Utc>> {
        self.resolution_date
    }
}

impl PartialEq for NativeBug {
    fn eq(&self, other: &Self) -> bool {
        self.fixing_commit == other.fixing_commit
            && self.introducing_commits == other.introducing_commits
            && self.issue_id == other.issue_id
    }
}

impl Eq for NativeBug {}

impl Hash for NativeBug {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fixing_commit.hash(state);
        // BTreeSet iterates in id order, so the hash is order-independent.
        for commit in &self.introducing_commits {
            commit.hash(state);
        }
        self.issue_id.hash(state);
    }
}

/// A bug record over plain hash strings — the form handed to caches and
/// serialized reports. Same equality contract as [`NativeBug`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBug {
    fixing_commit: String,
    introducing_commits: BTreeSet<String>,
    issue_id: Option<u64>,
    creation_date: Option<DateTime<Utc>>,
    resolution_date: Option<DateTime<Utc>>,
}

impl RawBug {
    pub fn new(
        fixing_commit: String,
        introducing_commits: BTreeSet<String>,
        issue_id: Option<u64>,
        creation_date: Option<DateTime<Utc>>,
        resolution_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            fixing_commit,
            introducing_commits,
            issue_id,
            creation_date,
            resolution_date,
        }
    }
}

impl BugRecord for RawBug {
    type Commit = String;

    fn fixing_commit(&self) -> &String {
        &self.fixing_commit
    }

    fn introducing_commits(&self) -> &BTreeSet<String> {
        &self.introducing_commits
    }

    fn issue_id(&self) -> Option<u64> {
        self.issue_id
    }

    fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    fn resolution_date(&self) -> Option<DateTime<Utc>> {
        self.resolution_date
    }
}

impl PartialEq for RawBug {
    fn eq(&self, other: &Self) -> bool {
        self.fixing_commit == other.fixing_commit
            && self.introducing_commits == other.introducing_commits
            && self.issue_id == other.issue_id
    }
}

impl Eq for RawBug {}

impl Hash for RawBug {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fixing_commit.hash(state);
        for id in &self.introducing_commits {
            id.hash(state);
        }
        self.issue_id.hash(state);
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn commit(id: &str) -> CommitInfo {
        CommitInfo {
            id: id.to_string(),
            author: "dev@test.com".to_string(),
            committer_time: Utc.with_ymd_and_hms(2020, 4, 20, 13, 37, 0).unwrap(),
            summary: "some change".to_string(),
            parent_ids: vec![],
        }
    }

    fn native_bug(fix: &str, intros: &[&str], issue: Option<u64>) -> NativeBug {
        NativeBug::new(
            commit(fix),
            intros.iter().map(|id| commit(id)).collect(),
            issue,
            None,
            None,
        )
    }

    #[test]
    fn test_commit_identity_is_the_hash() {
        let mut a = commit("1234");
        a.author = "someone.else@test.com".to_string();
        let b = commit("1234");
        assert_eq!(a, b, "commits with the same id must compare equal");

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_bug_equality_ignores_dates() {
        let reported = Utc.with_ymd_and_hms(2020, 4, 20, 0, 0, 0).unwrap();
        let with_dates = NativeBug::new(
            commit("f1"),
            [commit("i1")].into_iter().collect(),
            Some(5),
            Some(reported),
            Some(reported),
        );
        let without_dates = native_bug("f1", &["i1"], Some(5));

        assert_eq!(with_dates, without_dates);

        let mut set = HashSet::new();
        set.insert(with_dates);
        set.insert(without_dates);
        assert_eq!(set.len(), 1, "hash must be consistent with equality");
    }

    #[test]
    fn test_bug_equality_covers_the_identifying_triple() {
        let base = native_bug("f1", &["i1", "i2"], Some(5));

        assert_ne!(base, native_bug("f2", &["i1", "i2"], Some(5)));
        assert_ne!(base, native_bug("f1", &["i1"], Some(5)));
        assert_ne!(base, native_bug("f1", &["i1", "i2"], Some(6)));
        assert_ne!(base, native_bug("f1", &["i1", "i2"], None));
    }

    #[test]
    fn test_introducing_set_is_order_irrelevant() {
        let ab = native_bug("f1", &["a", "b"], None);
        let ba = native_bug("f1", &["b", "a"], None);
        assert_eq!(ab, ba);

        let mut set = HashSet::new();
        set.insert(ab);
        set.insert(ba);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_raw_bug_equality_matches_native_contract() {
        let a = RawBug::new(
            "f1".to_string(),
            ["x".to_string(), "y".to_string()].into_iter().collect(),
            None,
            None,
            None,
        );
        let b = RawBug::new(
            "f1".to_string(),
            ["y".to_string(), "x".to_string()].into_iter().collect(),
            None,
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
            None,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_raw_bug_round_trips_through_json() {
        let bug = RawBug::new(
            "f1".to_string(),
            ["x".to_string()].into_iter().collect(),
            Some(42),
            Some(Utc.with_ymd_and_hms(2020, 4, 20, 13, 37, 0).unwrap()),
            None,
        );
        let json = serde_json::to_string(&bug).expect("serialize");
        let back: RawBug = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(bug, back);
        assert_eq!(back.issue_id(), Some(42));
        assert_eq!(back.creation_date(), bug.creation_date());
    }
}
