//! Hard admission gates applied before scoring.
//!
//! A ride is admitted only when its start lies within the deviation radius
//! of the requested pickup, its end lies within the same radius of the
//! requested drop-off, and its departure lies within the time tolerance.
//! The two circles are independent: a perfect pickup does not compensate
//! for a distant drop-off.

use ridepool_core::{MatchQuery, RideOffer, TimePoint, haversine_km};

use crate::MatcherConfig;

/// How far a ride strays from a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviations {
    /// Distance from the requested pickup to the ride's start, in km.
    pub pickup_km: f64,
    /// Distance from the requested drop-off to the ride's end, in km.
    pub dropoff_km: f64,
    /// Absolute departure difference in minutes.
    pub time_minutes: f64,
}

impl Deviations {
    /// Measure `ride` against `query`.
    #[must_use]
    pub fn measure(ride: &RideOffer, query: &MatchQuery) -> Self {
        Self {
            pickup_km: haversine_km(ride.start, query.start),
            dropoff_km: haversine_km(ride.end, query.end),
            time_minutes: TimePoint::minutes_between(ride.departure_time, query.departure_time),
        }
    }
}

/// Gate that turned a ride away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// The ride starts too far from the requested pickup.
    Pickup {
        /// Measured deviation in km.
        km: f64,
    },
    /// The ride ends too far from the requested drop-off.
    Dropoff {
        /// Measured deviation in km.
        km: f64,
    },
    /// The ride departs too early or too late.
    Departure {
        /// Measured difference in minutes.
        minutes: f64,
    },
}

/// Route and time admission gates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityFilter {
    max_deviation_km: f64,
    time_tolerance_minutes: f64,
}

impl CompatibilityFilter {
    /// Build a filter with explicit thresholds. Both bounds are inclusive.
    #[must_use]
    pub fn new(max_deviation_km: f64, time_tolerance_minutes: u32) -> Self {
        Self {
            max_deviation_km,
            time_tolerance_minutes: f64::from(time_tolerance_minutes),
        }
    }

    /// Build a filter from matcher configuration.
    #[must_use]
    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.max_deviation_km, config.time_tolerance_minutes)
    }

    /// Admit `ride` for `query`, returning its deviations, or the first gate
    /// it failed.
    ///
    /// # Errors
    /// Returns the [`Rejection`] naming the failed gate.
    ///
    /// # Examples
    /// ```
    /// use ridepool_core::{GeoPoint, MatchQuery, RideOffer, TimePoint};
    /// use ridepool_matcher::{CompatibilityFilter, Rejection};
    ///
    /// let here = GeoPoint::new(40.70, -74.00)?;
    /// let there = GeoPoint::new(40.71, -74.01)?;
    /// let noon = TimePoint::parse("2025-03-01T12:00:00Z")?;
    /// let query = MatchQuery::new(here, there, noon);
    /// let late = RideOffer::new(1, here, there, noon.offset_minutes(45));
    ///
    /// let filter = CompatibilityFilter::new(2.0, 30);
    /// assert!(matches!(filter.admit(&late, &query), Err(Rejection::Departure { .. })));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn admit(&self, ride: &RideOffer, query: &MatchQuery) -> Result<Deviations, Rejection> {
        let deviations = Deviations::measure(ride, query);
        if deviations.pickup_km > self.max_deviation_km {
            return Err(Rejection::Pickup {
                km: deviations.pickup_km,
            });
        }
        if deviations.dropoff_km > self.max_deviation_km {
            return Err(Rejection::Dropoff {
                km: deviations.dropoff_km,
            });
        }
        if deviations.time_minutes > self.time_tolerance_minutes {
            return Err(Rejection::Departure {
                minutes: deviations.time_minutes,
            });
        }
        Ok(deviations)
    }
}

impl Default for CompatibilityFilter {
    fn default() -> Self {
        Self::from_config(&MatcherConfig::default())
    }
}
