//! Matcher thresholds shared by every subcommand.

use ridepool_matcher::{MatcherConfig, PoolStrategy};

use crate::CliError;

/// Optional overrides collected from flags, environment and files.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct EngineOverrides {
    pub(crate) max_deviation_km: Option<f64>,
    pub(crate) time_tolerance_minutes: Option<u32>,
    pub(crate) pool_cap: Option<usize>,
    pub(crate) max_results: Option<usize>,
    pub(crate) departure_window: Option<bool>,
}

impl EngineOverrides {
    /// Apply the overrides to the default matcher configuration.
    pub(crate) fn into_matcher_config(self) -> Result<MatcherConfig, CliError> {
        let defaults = MatcherConfig::default();
        let pool_strategy = if self.departure_window.unwrap_or(false) {
            PoolStrategy::DepartureWindow
        } else {
            PoolStrategy::SoonestDeparture
        };
        let config = MatcherConfig {
            max_deviation_km: self.max_deviation_km.unwrap_or(defaults.max_deviation_km),
            time_tolerance_minutes: self
                .time_tolerance_minutes
                .unwrap_or(defaults.time_tolerance_minutes),
            pool_cap: self.pool_cap.unwrap_or(defaults.pool_cap),
            default_max_results: self.max_results.unwrap_or(defaults.default_max_results),
            pool_strategy,
        };
        config.validate()?;
        Ok(config)
    }
}
