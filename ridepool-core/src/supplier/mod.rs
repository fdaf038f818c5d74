//! Fetch the pool of bookable rides a matching call evaluates.
//!
//! The `CandidateSupplier` trait abstracts the read-only query against
//! whatever store holds ride offers. Callers describe the pool they want with
//! a [`CandidateRequest`] and receive offers sorted by soonest departure.
//!
//! Failures surface as [`SupplierError`]; the matcher never retries.

mod error;
mod request;

pub use error::SupplierError;
pub use request::{CandidateRequest, DepartureWindow};

use crate::RideOffer;

/// Source of candidate ride offers.
///
/// Implementations must return only offers for which
/// [`CandidateRequest::admits`] holds, ordered by ascending departure time
/// and truncated to [`CandidateRequest::pool_cap`]. The matcher trusts these
/// guarantees and performs no further checks on them.
/// Suppliers must be `Send + Sync` so matchers can serve concurrent callers.
///
/// # Examples
///
/// ```rust
/// use ridepool_core::{CandidateRequest, CandidateSupplier, RideOffer, SupplierError};
///
/// struct EmptySupplier;
///
/// impl CandidateSupplier for EmptySupplier {
///     fn fetch_candidates(
///         &self,
///         _request: &CandidateRequest,
///     ) -> Result<Vec<RideOffer>, SupplierError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let request = CandidateRequest::new(ridepool_core::TimePoint::now(), 50);
/// assert!(EmptySupplier.fetch_candidates(&request)?.is_empty());
/// # Ok::<(), SupplierError>(())
/// ```
pub trait CandidateSupplier: Send + Sync {
    /// Return up to `request.pool_cap` bookable offers, soonest first.
    ///
    /// # Errors
    /// Returns [`SupplierError`] when the backing store cannot be read or
    /// yields malformed data.
    fn fetch_candidates(&self, request: &CandidateRequest)
    -> Result<Vec<RideOffer>, SupplierError>;
}

impl<T: CandidateSupplier + ?Sized> CandidateSupplier for &T {
    fn fetch_candidates(
        &self,
        request: &CandidateRequest,
    ) -> Result<Vec<RideOffer>, SupplierError> {
        (**self).fetch_candidates(request)
    }
}

impl<T: CandidateSupplier + ?Sized> CandidateSupplier for Box<T> {
    fn fetch_candidates(
        &self,
        request: &CandidateRequest,
    ) -> Result<Vec<RideOffer>, SupplierError> {
        (**self).fetch_candidates(request)
    }
}

impl<T: CandidateSupplier + ?Sized> CandidateSupplier for std::sync::Arc<T> {
    fn fetch_candidates(
        &self,
        request: &CandidateRequest,
    ) -> Result<Vec<RideOffer>, SupplierError> {
        (**self).fetch_candidates(request)
    }
}
