//! The matching call.
//!
//! A [`Matcher`] pairs a passenger's [`MatchQuery`] with a pool of ride
//! offers and returns a ranked shortlist of [`MatchResult`]s.

use thiserror::Error;

use crate::{MatchQuery, MatchQueryError, MatchResult, SupplierError};

/// Errors returned by [`Matcher::find_matches`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// The request failed validation; nothing was fetched.
    #[error("invalid match request: {0}")]
    InvalidQuery(#[from] MatchQueryError),
    /// The candidate supplier failed; no partial results are returned.
    #[error("failed to fetch candidate rides: {0}")]
    Supplier(#[from] SupplierError),
}

/// Find compatible rides for a passenger.
///
/// Implementations must:
/// - Return at most `max_results` entries, each ride at most once.
/// - Order results by compatibility score, highest first.
/// - Return an empty list, not an error, when nothing is compatible.
///
/// Matchers must be `Send + Sync` to serve concurrent requests.
///
/// # Examples
///
/// ```rust
/// use ridepool_core::{MatchError, MatchQuery, MatchResult, Matcher};
///
/// struct NoRides;
///
/// impl Matcher for NoRides {
///     fn find_matches(
///         &self,
///         _query: &MatchQuery,
///         _max_results: usize,
///     ) -> Result<Vec<MatchResult>, MatchError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let point = ridepool_core::GeoPoint::new(0.0, 0.0)?;
/// let query = MatchQuery::new(point, point, ridepool_core::TimePoint::now());
/// assert!(NoRides.find_matches(&query, 5)?.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Matcher: Send + Sync {
    /// Return up to `max_results` ranked matches for `query`.
    ///
    /// # Errors
    /// Returns [`MatchError::Supplier`] when candidates cannot be fetched.
    fn find_matches(
        &self,
        query: &MatchQuery,
        max_results: usize,
    ) -> Result<Vec<MatchResult>, MatchError>;
}
