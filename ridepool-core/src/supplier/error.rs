use std::time::Duration;

use thiserror::Error;

/// Errors from [`crate::CandidateSupplier::fetch_candidates`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupplierError {
    /// The backing store could not be reached or queried.
    #[error("candidate store unavailable: {message}")]
    Unavailable {
        /// Description of the failure reported by the backend.
        message: String,
    },
    /// The fetch did not complete in time.
    #[error("candidate fetch timed out after {elapsed:?}")]
    Timeout {
        /// How long the supplier waited before giving up.
        elapsed: Duration,
    },
    /// A stored ride could not be turned into a valid offer.
    #[error("ride {ride_id} is malformed: {reason}")]
    MalformedRide {
        /// Identifier of the offending ride.
        ride_id: u64,
        /// What was wrong with it.
        reason: String,
    },
}
