//! `stats` command implementation for the ridepool CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ridepool_core::{MatchingStats, SqliteRideSupplier};
use serde::{Deserialize, Serialize};

use crate::fs::require_existing_file;
use crate::matching::write_json;
use crate::{ARG_RIDES_DB, CliError, ENV_STATS_RIDES_DB};

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Count rides that are scheduled or in progress, their \
                 bookings and open seats, and print the totals as JSON.",
    about = "Summarise the bookable ride pool"
)]
#[ortho_config(prefix = "RIDEPOOL")]
pub(crate) struct StatsArgs {
    /// Path to the SQLite ride database.
    #[arg(long = ARG_RIDES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) rides_db: Option<Utf8PathBuf>,
}

impl StatsArgs {
    pub(crate) fn into_rides_db(self) -> Result<Utf8PathBuf, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.rides_db.ok_or(CliError::MissingArgument {
            field: ARG_RIDES_DB,
            env: ENV_STATS_RIDES_DB,
        })
    }
}

pub(crate) fn run_stats(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let rides_db = args.into_rides_db()?;
    require_existing_file(&rides_db, ARG_RIDES_DB)?;
    let stats = execute_stats(&rides_db)?;
    write_json(writer, &stats)
}

pub(crate) fn execute_stats(rides_db: &Utf8Path) -> Result<MatchingStats, CliError> {
    let supplier = SqliteRideSupplier::open(rides_db.as_std_path())?;
    Ok(supplier.matching_stats()?)
}
