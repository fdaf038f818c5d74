//! Tunable matching thresholds.

use thiserror::Error;

/// How the candidate pool is drawn from the supplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PoolStrategy {
    /// Take the `pool_cap` soonest bookable rides, then filter.
    ///
    /// A compatible ride departing after the first `pool_cap` bookable rides
    /// is never considered.
    #[default]
    SoonestDeparture,
    /// Ask the supplier only for rides departing within the time tolerance of
    /// the requested departure, so the cap is spent on rides that can pass
    /// the time gate.
    DepartureWindow,
}

/// Configuration for [`CompatibilityMatcher`](crate::CompatibilityMatcher).
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Maximum pickup and drop-off deviation, each checked separately, in km.
    pub max_deviation_km: f64,
    /// Maximum departure difference in minutes.
    pub time_tolerance_minutes: u32,
    /// Upper bound on rides fetched per call.
    pub pool_cap: usize,
    /// Result limit applied when a request does not name one.
    pub default_max_results: usize,
    /// Candidate pool selection.
    pub pool_strategy: PoolStrategy,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_deviation_km: 2.0,
            time_tolerance_minutes: 30,
            pool_cap: 50,
            default_max_results: 5,
            pool_strategy: PoolStrategy::SoonestDeparture,
        }
    }
}

/// Errors raised by [`MatcherConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The deviation radius was negative or not finite.
    #[error("max deviation must be a finite, non-negative number of km, got {0}")]
    InvalidDeviationRadius(f64),
    /// A pool cap of zero would never admit a ride.
    #[error("pool cap must be at least 1")]
    ZeroPoolCap,
    /// A default result limit of zero would never return a ride.
    #[error("default max results must be at least 1")]
    ZeroDefaultMaxResults,
}

impl MatcherConfig {
    /// Check that every threshold is usable.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    ///
    /// # Examples
    /// ```
    /// use ridepool_matcher::{ConfigError, MatcherConfig};
    ///
    /// assert!(MatcherConfig::default().validate().is_ok());
    /// let config = MatcherConfig { pool_cap: 0, ..MatcherConfig::default() };
    /// assert_eq!(config.validate(), Err(ConfigError::ZeroPoolCap));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_deviation_km.is_finite() || self.max_deviation_km < 0.0 {
            return Err(ConfigError::InvalidDeviationRadius(self.max_deviation_km));
        }
        if self.pool_cap == 0 {
            return Err(ConfigError::ZeroPoolCap);
        }
        if self.default_max_results == 0 {
            return Err(ConfigError::ZeroDefaultMaxResults);
        }
        Ok(())
    }
}
