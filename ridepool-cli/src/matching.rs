//! `match` command implementation for the ridepool CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ridepool_core::{MatchRequest, MatchResult, Matcher, SqliteRideSupplier};
use ridepool_matcher::{CompatibilityMatcher, MatcherConfig};
use serde::{Deserialize, Serialize};

use crate::fs::{open_utf8_file, require_existing_file};
use crate::settings::EngineOverrides;
use crate::{
    ARG_DEPARTURE_WINDOW, ARG_MATCH_REQUEST, ARG_MAX_DEVIATION_KM, ARG_MAX_RESULTS, ARG_POOL_CAP,
    ARG_RIDES_DB, ARG_TIME_TOLERANCE_MINUTES, CliError, ENV_MATCH_REQUEST, ENV_MATCH_RIDES_DB,
};

/// CLI arguments for the `match` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank bookable rides for a passenger trip. The trip is read \
                 from a JSON file holding startLat, startLng, endLat, endLng, \
                 departureTime and an optional maxResults; rides come from \
                 the SQLite ride database.",
    about = "Rank rides for a match request"
)]
#[ortho_config(prefix = "RIDEPOOL")]
pub(crate) struct MatchArgs {
    /// Path to a JSON file containing a match request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
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
    /// Number of bookable rides considered per request (default 50).
    #[arg(long = ARG_POOL_CAP, value_name = "count")]
    #[serde(default)]
    pub(crate) pool_cap: Option<usize>,
    /// Result limit when the request names none (default 5).
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

impl MatchArgs {
    pub(crate) fn into_config(self) -> Result<MatchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MatchConfig::try_from(merged)
    }

    const fn overrides(&self) -> EngineOverrides {
        EngineOverrides {
            max_deviation_km: self.max_deviation_km,
            time_tolerance_minutes: self.time_tolerance_minutes,
            pool_cap: self.pool_cap,
            max_results: self.max_results,
            departure_window: self.departure_window,
        }
    }
}

/// Resolved `match` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the SQLite ride database.
    pub(crate) rides_db: Utf8PathBuf,
    /// Matcher thresholds.
    pub(crate) matcher: MatcherConfig,
}

impl MatchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing_file(&self.request_path, ARG_MATCH_REQUEST)?;
        require_existing_file(&self.rides_db, ARG_RIDES_DB)?;
        Ok(())
    }
}

impl TryFrom<MatchArgs> for MatchConfig {
    type Error = CliError;

    fn try_from(args: MatchArgs) -> Result<Self, Self::Error> {
        let matcher = args.overrides().into_matcher_config()?;
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_MATCH_REQUEST,
            env: ENV_MATCH_REQUEST,
        })?;
        let rides_db = args.rides_db.ok_or(CliError::MissingArgument {
            field: ARG_RIDES_DB,
            env: ENV_MATCH_RIDES_DB,
        })?;
        Ok(Self {
            request_path,
            rides_db,
            matcher,
        })
    }
}

/// JSON document printed by `ridepool match`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchOutput {
    pub(crate) match_count: usize,
    pub(crate) matches: Vec<MatchResult>,
}

pub(crate) fn run_match(args: MatchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let output = execute_match(&config)?;
    write_json(writer, &output)
}

pub(crate) fn execute_match(config: &MatchConfig) -> Result<MatchOutput, CliError> {
    let request = load_match_request(&config.request_path)?;
    let (query, max_results) = request
        .validate_detailed(config.matcher.default_max_results)
        .map_err(|source| CliError::InvalidMatchRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let supplier = SqliteRideSupplier::open(config.rides_db.as_std_path())?;
    let matcher = CompatibilityMatcher::with_config(
        supplier,
        ridepool_core::SystemClock,
        config.matcher.clone(),
    )?;
    let matches = matcher
        .find_matches(&query, max_results)
        .map_err(|source| CliError::Match { source })?;
    log::info!("{} rides matched {}", matches.len(), config.request_path);
    Ok(MatchOutput {
        match_count: matches.len(),
        matches,
    })
}

/// Loads a JSON-encoded [`MatchRequest`] from disk.
pub(crate) fn load_match_request(path: &Utf8Path) -> Result<MatchRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenMatchRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseMatchRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print `value` as JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
