//! Fetch-or-reuse gate for committed queries
//!
//! Decides whether a newly committed query needs a remote lookup or whether
//! the candidate set from the previous fetch already covers it. Reuse is a
//! heuristic: a cached superset may lack items the server would return for
//! the narrower query, which is accepted staleness since ranking only
//! reorders what is present.

use crate::query::Query;
use crate::results::CandidateSet;

/// Outcome of consulting the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// The cached candidate set covers the query; rank it locally
    Reuse,
    /// A remote lookup is needed
    Fetch,
}

/// Decide whether `query` can be served from `cached`.
///
/// REUSE when at least one cached candidate's name starts with the query
/// (case-insensitive) — the cached superset is treated as sufficient for
/// prefix-narrowing searches. FETCH otherwise, including when no fetch has
/// completed yet.
pub fn decide(query: &Query, cached: Option<&CandidateSet>) -> FetchDecision {
    let Some(set) = cached else {
        return FetchDecision::Fetch;
    };

    let covered = set
        .candidates
        .iter()
        .any(|candidate| query.is_prefix_of(&candidate.name));

    if covered {
        FetchDecision::Reuse
    } else {
        FetchDecision::Fetch
    }
}
