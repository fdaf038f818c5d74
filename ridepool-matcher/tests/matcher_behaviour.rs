//! Behavioural tests for `CompatibilityMatcher` using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use ridepool_core::test_support::{FailingSupplier, FixedClock, MemorySupplier, at, point, ride};
use ridepool_core::{
    CandidateRequest, CandidateSupplier, MatchError, MatchQuery, MatchResult, Matcher, RideOffer,
    SupplierError, TimePoint,
};
use ridepool_matcher::{CompatibilityMatcher, MatcherConfig};

const PICKUP: (f64, f64) = (40.7000, -74.0000);
const DROPOFF: (f64, f64) = (40.7100, -74.0100);

#[derive(Debug)]
enum SupplierChoice {
    Memory(MemorySupplier),
    Failing(FailingSupplier),
}

impl CandidateSupplier for SupplierChoice {
    fn fetch_candidates(
        &self,
        request: &CandidateRequest,
    ) -> Result<Vec<RideOffer>, SupplierError> {
        match self {
            Self::Memory(supplier) => supplier.fetch_candidates(request),
            Self::Failing(supplier) => supplier.fetch_candidates(request),
        }
    }
}

#[derive(Debug)]
struct MatchWorld {
    rides: RefCell<Vec<RideOffer>>,
    failure: RefCell<Option<SupplierError>>,
    outcome: RefCell<Option<Result<Vec<MatchResult>, MatchError>>>,
}

impl MatchWorld {
    fn new() -> Self {
        Self {
            rides: RefCell::new(Vec::new()),
            failure: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn departure() -> TimePoint {
        at("2025-03-01T08:30:00Z")
    }

    fn on_route(id: u64, minutes_late: i64) -> RideOffer {
        ride(id, PICKUP, DROPOFF, Self::departure().offset_minutes(minutes_late))
    }

    fn expect_matches(&self) -> Vec<MatchResult> {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect("expected match success")
    }
}

#[fixture]
fn world() -> MatchWorld {
    MatchWorld::new()
}

#[given(
    "a ride starting and ending within 100 metres of the passenger departing ten minutes late"
)]
fn given_close_ride(world: &MatchWorld) {
    world.rides.replace(vec![ride(
        1,
        (40.7005, -74.0003),
        (40.7098, -74.0099),
        MatchWorld::departure().offset_minutes(10),
    )]);
}

#[given("a ride on the passenger's exact route departing 45 minutes late")]
fn given_late_ride(world: &MatchWorld) {
    world.rides.replace(vec![MatchWorld::on_route(1, 45)]);
}

#[given("only rides far away from the passenger")]
fn given_distant_rides(world: &MatchWorld) {
    let departure = MatchWorld::departure();
    world.rides.replace(vec![
        ride(1, (34.0522, -118.2437), (34.0622, -118.2537), departure),
        ride(2, (41.8781, -87.6298), (41.8881, -87.6398), departure),
    ]);
}

#[given("a supplier that is unavailable")]
fn given_failing_supplier(world: &MatchWorld) {
    world.failure.replace(Some(SupplierError::Unavailable {
        message: "database is locked".to_owned(),
    }));
}

#[given("rides on the passenger's route departing 20, 0 and 10 minutes late")]
fn given_ranked_rides(world: &MatchWorld) {
    world.rides.replace(vec![
        MatchWorld::on_route(1, 20),
        MatchWorld::on_route(2, 0),
        MatchWorld::on_route(3, 10),
    ]);
}

#[when("the passenger searches for rides")]
fn when_search(world: &MatchWorld) {
    let supplier = world.failure.borrow().clone().map_or_else(
        || SupplierChoice::Memory(MemorySupplier::with_rides(world.rides.borrow().clone())),
        |failure| SupplierChoice::Failing(FailingSupplier::new(failure)),
    );
    let matcher = CompatibilityMatcher::with_config(
        supplier,
        FixedClock(at("2025-03-01T07:00:00Z")),
        MatcherConfig::default(),
    )
    .expect("default config is valid");
    let query = MatchQuery::new(
        point(PICKUP.0, PICKUP.1),
        point(DROPOFF.0, DROPOFF.1),
        MatchWorld::departure(),
    );
    world.outcome.replace(Some(matcher.find_matches(&query, 5)));
}

#[then("exactly one match is returned with score 91")]
fn then_score_91(world: &MatchWorld) {
    let matches = world.expect_matches();
    let scores: Vec<u8> = matches.iter().map(|m| m.compatibility_score).collect();
    assert_eq!(scores, vec![91]);
}

#[then("no matches are returned")]
fn then_no_matches(world: &MatchWorld) {
    assert!(world.expect_matches().is_empty());
}

#[then("the search fails with a supplier error")]
fn then_supplier_error(world: &MatchWorld) {
    let outcome = world
        .outcome
        .borrow()
        .clone()
        .expect("outcome should be recorded before assertions");
    assert!(matches!(
        outcome,
        Err(MatchError::Supplier(SupplierError::Unavailable { .. }))
    ));
}

#[then("the matches are ordered by score from highest to lowest")]
fn then_ranked(world: &MatchWorld) {
    let matches = world.expect_matches();
    let ids: Vec<u64> = matches.iter().map(|m| m.ride.id).collect();
    let scores: Vec<u8> = matches.iter().map(|m| m.compatibility_score).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(scores, vec![100, 92, 84]);
}

#[scenario(path = "tests/features/matcher.feature", index = 0)]
fn close_ride_scores_92(world: MatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matcher.feature", index = 1)]
fn late_ride_rejected(world: MatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matcher.feature", index = 2)]
fn empty_result(world: MatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matcher.feature", index = 3)]
fn supplier_failure(world: MatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/matcher.feature", index = 4)]
fn ranked_matches(world: MatchWorld) {
    let _ = world;
}
