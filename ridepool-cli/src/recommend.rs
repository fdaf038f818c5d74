//! `recommend` command implementation for the ridepool CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ridepool_core::{MatchResult, SqliteRideSupplier, SystemClock};
use ridepool_matcher::{CompatibilityMatcher, MatcherConfig};
use serde::{Deserialize, Serialize};

use crate::fs::require_existing_file;
use crate::matching::write_json;
use crate::settings::EngineOverrides;
use crate::{
    ARG_DEPARTURE_WINDOW, ARG_MAX_DEVIATION_KM, ARG_MAX_RESULTS, ARG_PASSENGER_ID, ARG_POOL_CAP,
    ARG_RIDES_DB, ARG_TIME_TOLERANCE_MINUTES, CliError, ENV_RECOMMEND_PASSENGER_ID,
    ENV_RECOMMEND_RIDES_DB,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Average the pickup and drop-off points of a passenger's \
                 past bookings and rank rides departing soon along that \
                 typical trip.",
    about = "Recommend rides from booking history"
)]
#[ortho_config(prefix = "RIDEPOOL")]
pub(crate) struct RecommendArgs {
    /// Passenger whose bookings seed the recommendation.
    #[arg(long = ARG_PASSENGER_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) passenger_id: Option<u64>,
    /// Path to the SQLite ride database.
    #[arg(long = ARG_RIDES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) rides_db: Option<Utf8PathBuf>,
    /// Maximum pickup and drop-off deviation in km (default 2).
    #[arg(long = ARG_MAX_DEVIATION_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) max_deviation_km: Option<f64>,
    /// Maximum departure difference in minutes (default 30).
    #[arg(long = ARG_TIME_TOLERANCE_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) time_tolerance_minutes: Option<u32>,
    /// Number of bookable rides considered (default 50).
    #[arg(long = ARG_POOL_CAP, value_name = "count")]
    #[serde(default)]
    pub(crate) pool_cap: Option<usize>,
    /// Number of recommendations to print (default 5).
    #[arg(long = ARG_MAX_RESULTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_results: Option<usize>,
    /// Only consider rides departing within the time tolerance.
    #[arg(
        long = ARG_DEPARTURE_WINDOW,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) departure_window: Option<bool>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) passenger_id: u64,
    pub(crate) rides_db: Utf8PathBuf,
    pub(crate) matcher: MatcherConfig,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let matcher = EngineOverrides {
            max_deviation_km: args.max_deviation_km,
            time_tolerance_minutes: args.time_tolerance_minutes,
            pool_cap: args.pool_cap,
            max_results: args.max_results,
            departure_window: args.departure_window,
        }
        .into_matcher_config()?;
        let passenger_id = args.passenger_id.ok_or(CliError::MissingArgument {
            field: ARG_PASSENGER_ID,
            env: ENV_RECOMMEND_PASSENGER_ID,
        })?;
        let rides_db = args.rides_db.ok_or(CliError::MissingArgument {
            field: ARG_RIDES_DB,
            env: ENV_RECOMMEND_RIDES_DB,
        })?;
        Ok(Self {
            passenger_id,
            rides_db,
            matcher,
        })
    }
}

/// JSON document printed by `ridepool recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RecommendOutput {
    pub(crate) recommendations: Vec<MatchResult>,
}

pub(crate) fn run_recommend(args: RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing_file(&config.rides_db, ARG_RIDES_DB)?;
    let output = execute_recommend(&config)?;
    write_json(writer, &output)
}

pub(crate) fn execute_recommend(config: &RecommendConfig) -> Result<RecommendOutput, CliError> {
    let supplier = SqliteRideSupplier::open(config.rides_db.as_std_path())?;
    let history = supplier.passenger_history(config.passenger_id)?;
    log::debug!(
        "passenger {} has {} past bookings",
        config.passenger_id,
        history.len()
    );
    let max_results = config.matcher.default_max_results;
    let matcher = CompatibilityMatcher::with_config(supplier, SystemClock, config.matcher.clone())?;
    let recommendations = matcher
        .recommend(&history, max_results)
        .map_err(|source| CliError::Match { source })?;
    Ok(RecommendOutput { recommendations })
}
