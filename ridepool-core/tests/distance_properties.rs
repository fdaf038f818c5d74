//! Property-based tests for the haversine distance evaluator.
//!
//! # Invariants tested
//!
//! - **Identity:** the distance from a point to itself is zero.
//! - **Symmetry:** swapping the endpoints does not change the distance.
//! - **Bounds:** distances are finite and never exceed half the great circle.
//! - **Triangle inequality:** a detour through a third point is never shorter.

use proptest::prelude::*;
use ridepool_core::{EARTH_RADIUS_KM, GeoPoint, haversine_km};

const TOLERANCE_KM: f64 = 1e-6;

fn geo_point() -> impl Strategy<Value = GeoPoint> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0)
        .prop_map(|(lat, lng)| GeoPoint::new(lat, lng).expect("strategy yields valid points"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn distance_to_self_is_zero(p in geo_point()) {
        prop_assert!(haversine_km(p, p).abs() < TOLERANCE_KM);
    }

    #[test]
    fn distance_is_symmetric(p in geo_point(), q in geo_point()) {
        let forward = haversine_km(p, q);
        let backward = haversine_km(q, p);
        prop_assert!((forward - backward).abs() < TOLERANCE_KM);
    }

    #[test]
    fn distance_is_bounded(p in geo_point(), q in geo_point()) {
        let d = haversine_km(p, q);
        prop_assert!(d.is_finite());
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + TOLERANCE_KM);
    }

    #[test]
    fn detours_are_never_shorter(p in geo_point(), q in geo_point(), r in geo_point()) {
        let direct = haversine_km(p, r);
        let detour = haversine_km(p, q) + haversine_km(q, r);
        prop_assert!(direct <= detour + 1e-3, "direct {direct} km, detour {detour} km");
    }
}
