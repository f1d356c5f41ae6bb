use super::suspects::SuspectTuple;
use std::collections::HashSet;
use tracing::debug;

/// Cross-issue corroboration over every suspect tuple gathered for a project.
///
/// Each suspect is popped exactly once and either cleared or discarded:
/// 1. *partial fix* — the suspect is itself the fixing commit of some other
///    tuple, i.e. an earlier attempted fix that a later commit completed;
/// 2. *weak suspect* — the suspect predates some other issue's report (it sits
///    in another tuple's non-suspect set), which independently vouches for it;
/// 3. otherwise it is dropped and never reaches the bug's introducing set.
///
/// Every returned tuple satisfies `is_cleared()`.
pub fn resolve_suspects(mut tuples: Vec<SuspectTuple>) -> Vec<SuspectTuple> {
    // Cross-reference data is immutable during resolution: fixing commits and
    // non-suspect sets are fixed at partition time.
    let fixing_ids: Vec<String> = tuples
        .iter()
        .map(|t| t.fixing_commit().id.clone())
        .collect();
    let non_suspect_ids: Vec<HashSet<String>> = tuples
        .iter()
        .map(|t| t.non_suspects().iter().map(|c| c.id.clone()).collect())
        .collect();

    for current in 0..tuples.len() {
        while let Some(suspect) = tuples[current].pop_suspect() {
            let partial_fix = fixing_ids
                .iter()
                .enumerate()
                .any(|(other, fix)| other != current && *fix == suspect.id);
            let weak_suspect = !partial_fix
                && non_suspect_ids
                    .iter()
                    .enumerate()
                    .any(|(other, ids)| other != current && ids.contains(&suspect.id));

            if partial_fix || weak_suspect {
                debug!(
                    suspect = %suspect.id,
                    issue = tuples[current].issue_id(),
                    via = if partial_fix { "partial-fix" } else { "weak-suspect" },
                    "suspect corroborated"
                );
                tuples[current].clear(suspect);
            } else {
                debug!(
                    suspect = %suspect.id,
                    issue = tuples[current].issue_id(),
                    "suspect discarded, no corroboration"
                );
            }
        }
    }

    tuples
}

// ─── Tests ────────────────────────────────────────────────────────────────────
