//! Focused unit tests covering match CLI configuration and request parsing.

use super::helpers::{RideFixture, write_utf8};
use super::*;
use crate::matching::{MatchArgs, MatchConfig, execute_match, load_match_request};
use ridepool_core::{MatchError, MatchQueryError, SupplierError};
use ridepool_matcher::{ConfigError, MatcherConfig, PoolStrategy};
use rstest::rstest;

fn config_for(fixture: &RideFixture) -> MatchConfig {
    MatchConfig {
        request_path: fixture.request_path.clone(),
        rides_db: fixture.rides_db.clone(),
        matcher: MatcherConfig::default(),
    }
}

#[rstest]
#[case(None, Some("rides.db"), ARG_MATCH_REQUEST, ENV_MATCH_REQUEST)]
#[case(Some("request.json"), None, ARG_RIDES_DB, ENV_MATCH_RIDES_DB)]
fn converting_without_required_fields_errors(
    #[case] request: Option<&str>,
    #[case] rides_db: Option<&str>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = MatchArgs {
        request_path: request.map(Into::into),
        rides_db: rides_db.map(Into::into),
        ..MatchArgs::default()
    };
    let err = MatchConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn engine_flags_override_defaults() {
    let args = MatchArgs {
        request_path: Some("request.json".into()),
        rides_db: Some("rides.db".into()),
        max_deviation_km: Some(1.5),
        time_tolerance_minutes: Some(20),
        pool_cap: Some(200),
        max_results: Some(3),
        departure_window: Some(true),
    };
    let config = MatchConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.matcher,
        MatcherConfig {
            max_deviation_km: 1.5,
            time_tolerance_minutes: 20,
            pool_cap: 200,
            default_max_results: 3,
            pool_strategy: PoolStrategy::DepartureWindow,
        }
    );
}

#[rstest]
fn unusable_thresholds_are_rejected() {
    let args = MatchArgs {
        request_path: Some("request.json".into()),
        rides_db: Some("rides.db".into()),
        pool_cap: Some(0),
        ..MatchArgs::default()
    };
    let err = MatchConfig::try_from(args).expect_err("zero pool cap");
    assert!(matches!(
        err,
        CliError::InvalidMatcherConfig(ConfigError::ZeroPoolCap)
    ));
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let fixture = RideFixture::new();
    let err = config_for(&fixture)
        .validate_sources()
        .expect_err("request file is absent");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_MATCH_REQUEST),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let fixture = RideFixture::new();
    fixture.write_valid_request();
    let config = MatchConfig {
        rides_db: fixture.root.clone(),
        ..config_for(&fixture)
    };
    let err = config
        .validate_sources()
        .expect_err("expected directory rejection");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_RIDES_DB),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_match_request_rejects_invalid_json() {
    let fixture = RideFixture::new();
    write_utf8(&fixture.request_path, b"{ not valid json");
    let err = load_match_request(&fixture.request_path).expect_err("invalid JSON");
    assert!(matches!(err, CliError::ParseMatchRequest { .. }));
}

#[rstest]
fn execute_match_ranks_rides_from_the_database() {
    let fixture = RideFixture::new();
    fixture.write_valid_request();
    let output = execute_match(&config_for(&fixture)).expect("match succeeds");
    let ids: Vec<u64> = output.matches.iter().map(|m| m.ride.id).collect();
    let scores: Vec<u8> = output
        .matches
        .iter()
        .map(|m| m.compatibility_score)
        .collect();
    assert_eq!(output.match_count, 2);
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(scores, vec![100, 91]);
}

#[rstest]
fn execute_match_reports_invalid_requests() {
    let fixture = RideFixture::new();
    fixture.write_request(123.0);
    let err = execute_match(&config_for(&fixture)).expect_err("latitude out of range");
    match err {
        CliError::InvalidMatchRequest { source, .. } => {
            assert!(matches!(
                source,
                MatchQueryError::InvalidCoordinate { field: "start", .. }
            ));
        }
        other => panic!("expected InvalidMatchRequest, found {other:?}"),
    }
}

#[rstest]
fn execute_match_surfaces_store_failures() {
    let fixture = RideFixture::new();
    fixture.write_valid_request();
    let empty_db = fixture.root.join("empty.db");
    write_utf8(&empty_db, b"");
    let config = MatchConfig {
        rides_db: empty_db,
        ..config_for(&fixture)
    };
    let err = execute_match(&config).expect_err("no rides table");
    assert!(matches!(
        err,
        CliError::Match {
            source: MatchError::Supplier(SupplierError::Unavailable { .. })
        }
    ));
}
