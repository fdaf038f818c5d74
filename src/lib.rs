//! Facade crate for the ridepool matching engine.
//!
//! This crate re-exports the core domain types and exposes the default
//! matcher and the SQLite ride supplier behind feature flags.
//!
//! ```
//! use ridepool_engine::{GeoPoint, MatchQuery, TimePoint};
//!
//! let query = MatchQuery::new(
//!     GeoPoint::new(40.70, -74.00)?,
//!     GeoPoint::new(40.71, -74.01)?,
//!     TimePoint::parse("2025-03-01T08:30:00Z")?,
//! );
//! assert_eq!(query.start.lat(), 40.70);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub use ridepool_core::{
    CandidateRequest, CandidateSupplier, Clock, DepartureWindow, EARTH_RADIUS_KM, GeoPoint,
    GeoPointError, MatchError, MatchQuery, MatchQueryError, MatchRequest, MatchResult, Matcher,
    MatchingStats, RideDetails, RideOffer, RideStatus, SupplierError, SystemClock, TimePoint,
    TimePointError, TripEndpoints, haversine_km,
};

#[cfg(feature = "store-sqlite")]
pub use ridepool_core::{SqliteRideStoreError, SqliteRideSupplier};

#[cfg(feature = "matcher")]
pub use ridepool_matcher::{CompatibilityMatcher, ConfigError, MatcherConfig, PoolStrategy};
