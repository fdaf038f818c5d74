//! Error types emitted by the ridepool CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ridepool_core::{MatchError, MatchQueryError, SqliteRideStoreError};
use ridepool_matcher::ConfigError;
use thiserror::Error;

/// Errors emitted by the ridepool CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The merged matcher thresholds are unusable.
    #[error("invalid matcher configuration: {0}")]
    InvalidMatcherConfig(#[from] ConfigError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the match request file failed.
    #[error("failed to open match request at {path:?}: {source}")]
    OpenMatchRequest {
        /// Location of the request file.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Match request JSON could not be decoded.
    #[error("failed to parse match request JSON at {path:?}: {source}")]
    ParseMatchRequest {
        /// Location of the request file.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The match request payload failed validation.
    #[error("match request in {path:?} failed validation: {source}")]
    InvalidMatchRequest {
        /// Location of the request file.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: MatchQueryError,
    },
    /// Opening or reading the ride database failed.
    #[error(transparent)]
    RideStore(#[from] SqliteRideStoreError),
    /// The matcher could not produce results.
    #[error("matching failed: {source}")]
    Match {
        /// Underlying matcher failure.
        #[source]
        source: MatchError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
