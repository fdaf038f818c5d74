//! Core domain types and boundaries for the ride-pooling matching engine.
//!
//! The crate defines the validated value types a matching call works with
//! ([`GeoPoint`], [`TimePoint`], [`RideOffer`], [`MatchQuery`] and
//! [`MatchResult`]), the great-circle [`distance`] evaluator, and the two
//! seams a matcher is assembled from: a [`CandidateSupplier`] that fetches
//! bookable rides and a [`Clock`] that says what "now" is. The [`Matcher`]
//! trait describes the matching call itself.
//!
//! Constructors return `Result` so out-of-range coordinates or unparsable
//! timestamps are rejected before they can reach the scoring arithmetic.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clock;
pub mod distance;
pub mod geo_point;
pub mod matcher;
pub mod query;
pub mod ride;
pub mod stats;
pub mod store;
pub mod supplier;
pub mod time_point;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use clock::{Clock, SystemClock};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use geo_point::{GeoPoint, GeoPointError};
pub use matcher::{MatchError, Matcher};
pub use query::{MatchQuery, MatchQueryError, MatchRequest, MatchResult, TripEndpoints};
pub use ride::{RideDetails, RideOffer, RideStatus, RideStatusParseError};
pub use stats::MatchingStats;
pub use supplier::{CandidateRequest, CandidateSupplier, DepartureWindow, SupplierError};
pub use time_point::{TimePoint, TimePointError};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteRideStoreError, SqliteRideSupplier};
