//! Deterministic ranking of candidates for a query

use super::types::Candidate;
use crate::query::Query;

/// Rank candidates for display.
///
/// Candidates whose name starts with the query (case-insensitive) come
/// first, in the order the service delivered them. Candidates that merely
/// contain the query follow, sorted descending by relevance score with ties
/// keeping their original relative order. Candidates matching neither way
/// are excluded.
///
/// The two partitions are mutually exclusive, so no candidate appears
/// twice, and re-ranking the output with the same query yields the same
/// order.
pub fn rank(query: &Query, candidates: &[Candidate]) -> Vec<Candidate> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut prefix_matches = Vec::new();
    let mut contains_matches = Vec::new();

    for candidate in candidates {
        if query.is_prefix_of(&candidate.name) {
            prefix_matches.push(candidate.clone());
        } else if query.is_within(&candidate.name) {
            contains_matches.push(candidate.clone());
        }
    }

    // Vec::sort_by is stable, which the tie rule relies on.
    contains_matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    prefix_matches.extend(contains_matches);
    prefix_matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ranked: &[Candidate]) -> Vec<&str> {
        ranked.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_prefix_before_contains() {
        let candidates = vec![
            Candidate::new("1", "scatter", 9.0),
            Candidate::new("2", "cat", 1.0),
            Candidate::new("3", "bobcat", 5.0),
            Candidate::new("4", "catalog", 2.0),
        ];

        let ranked = rank(&Query::new("cat"), &candidates);
        assert_eq!(names(&ranked), vec!["cat", "catalog", "scatter", "bobcat"]);
    }

    #[test]
    fn test_prefix_matches_keep_source_order() {
        let candidates = vec![
            Candidate::new("1", "catalog", 1.0),
            Candidate::new("2", "cat", 9.0),
            Candidate::new("3", "cats", 5.0),
        ];

        // Source order, not score order.
        let ranked = rank(&Query::new("cat"), &candidates);
        assert_eq!(names(&ranked), vec!["catalog", "cat", "cats"]);
    }

    #[test]
    fn test_contains_sorted_by_score_descending() {
        let candidates = vec![
            Candidate::new("1", "wildcat", 2.0),
            Candidate::new("2", "bobcat", 8.0),
            Candidate::new("3", "muscat", 5.0),
        ];

        let ranked = rank(&Query::new("cat"), &candidates);
        assert_eq!(names(&ranked), vec!["bobcat", "muscat", "wildcat"]);
    }

    #[test]
    fn test_score_ties_keep_relative_order() {
        let candidates = vec![
            Candidate::new("1", "bobcat", 3.0),
            Candidate::new("2", "wildcat", 3.0),
            Candidate::new("3", "muscat", 3.0),
        ];

        let ranked = rank(&Query::new("cat"), &candidates);
        assert_eq!(names(&ranked), vec!["bobcat", "wildcat", "muscat"]);
    }

    #[test]
    fn test_non_matches_excluded_and_no_duplicates() {
        let candidates = vec![
            Candidate::new("1", "cat", 5.0),
            Candidate::new("2", "dog", 9.0),
            Candidate::new("3", "scatter", 1.0),
        ];

        let ranked = rank(&Query::new("cat"), &candidates);
        assert_eq!(names(&ranked), vec!["cat", "scatter"]);

        let mut ids: Vec<_> = ranked.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ranked.len());
    }

    #[test]
    fn test_rank_is_idempotent() {
        let candidates = vec![
            Candidate::new("1", "scatter", 4.0),
            Candidate::new("2", "cat", 1.0),
            Candidate::new("3", "bobcat", 7.0),
            Candidate::new("4", "muscat", 7.0),
        ];

        let query = Query::new("cat");
        let once = rank(&query, &candidates);
        let twice = rank(&query, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_narrowed_query_against_cached_superset() {
        // Candidate set fetched for "ca"; the user narrows to "cat".
        let candidates = vec![
            Candidate::new("1", "cat", 5.0),
            Candidate::new("2", "car", 9.0),
            Candidate::new("3", "scan", 2.0),
        ];

        // "car" is neither a prefix nor a substring match for "cat".
        let ranked = rank(&Query::new("cat"), &candidates);
        assert_eq!(names(&ranked), vec!["cat"]);
    }

    #[test]
    fn test_empty_query_ranks_empty() {
        let candidates = vec![Candidate::new("1", "cat", 5.0)];
        assert!(rank(&Query::new("  "), &candidates).is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let candidates = vec![
            Candidate::new("1", "Cats", 1.0),
            Candidate::new("2", "BOBCAT", 2.0),
        ];

        let ranked = rank(&Query::new("cAt"), &candidates);
        assert_eq!(names(&ranked), vec!["Cats", "BOBCAT"]);
    }
}
