//! Command-line interface for the ridepool matching engine.
//!
//! `ridepool match` ranks rides for a JSON-encoded request and
//! `ridepool recommend` suggests rides from a passenger's booking history.
//! `ridepool stats` summarises the bookable pool. All three read from a
//! SQLite ride database and print JSON on stdout.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod matching;
mod recommend;
mod settings;
mod stats;

pub use error::CliError;

use matching::MatchArgs;
use recommend::RecommendArgs;
use stats::StatsArgs;

pub(crate) const ARG_MATCH_REQUEST: &str = "request";
pub(crate) const ENV_MATCH_REQUEST: &str = "RIDEPOOL_CMDS_MATCH_REQUEST_PATH";
pub(crate) const ARG_RIDES_DB: &str = "rides-db";
pub(crate) const ENV_MATCH_RIDES_DB: &str = "RIDEPOOL_CMDS_MATCH_RIDES_DB";
pub(crate) const ENV_RECOMMEND_RIDES_DB: &str = "RIDEPOOL_CMDS_RECOMMEND_RIDES_DB";
pub(crate) const ENV_STATS_RIDES_DB: &str = "RIDEPOOL_CMDS_STATS_RIDES_DB";
pub(crate) const ARG_PASSENGER_ID: &str = "passenger-id";
pub(crate) const ENV_RECOMMEND_PASSENGER_ID: &str = "RIDEPOOL_CMDS_RECOMMEND_PASSENGER_ID";
pub(crate) const ARG_MAX_DEVIATION_KM: &str = "max-deviation-km";
pub(crate) const ARG_TIME_TOLERANCE_MINUTES: &str = "time-tolerance-minutes";
pub(crate) const ARG_POOL_CAP: &str = "pool-cap";
pub(crate) const ARG_MAX_RESULTS: &str = "max-results";
pub(crate) const ARG_DEPARTURE_WINDOW: &str = "departure-window";

/// Run the ridepool CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or matching
/// fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Match(args) => matching::run_match(args, &mut stdout),
        Command::Recommend(args) => recommend::run_recommend(args, &mut stdout),
        Command::Stats(args) => stats::run_stats(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ridepool",
    about = "Match passengers with pooled rides",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank bookable rides against a JSON match request.
    Match(MatchArgs),
    /// Suggest rides resembling a passenger's past bookings.
    Recommend(RecommendArgs),
    /// Print totals for rides that are scheduled or in progress.
    Stats(StatsArgs),
}

#[cfg(test)]
mod tests;
