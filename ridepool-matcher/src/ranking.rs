//! Ordering and truncation of scored matches.

use std::cmp::Reverse;

use ridepool_core::MatchResult;

/// Order `results` by compatibility score, highest first, and keep at most
/// `max_results`.
///
/// The sort is stable: equal scores keep their input order, which for a
/// supplier-ordered pool means the sooner departure wins.
#[must_use]
pub fn rank(mut results: Vec<MatchResult>, max_results: usize) -> Vec<MatchResult> {
    results.sort_by_key(|result| Reverse(result.compatibility_score));
    results.truncate(max_results);
    results
}
