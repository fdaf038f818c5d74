//! Composite desirability score for admitted rides.
//!
//! ```text
//! route = max(0, 100 - (pickup_km + dropoff_km) * 20)
//! time  = max(0, 100 - minutes * 2)
//! score = round(route * 0.6 + time * 0.4)
//! ```

use crate::Deviations;

const ROUTE_WEIGHT: f64 = 0.6;
const TIME_WEIGHT: f64 = 0.4;
const POINTS_PER_KM: f64 = 20.0;
const POINTS_PER_MINUTE: f64 = 2.0;
const MAX_POINTS: f64 = 100.0;

/// Route proximity in points; floors at zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "route score is a linear penalty on kilometres"
)]
pub fn route_score(pickup_km: f64, dropoff_km: f64) -> f64 {
    (MAX_POINTS - (pickup_km + dropoff_km) * POINTS_PER_KM).max(0.0)
}

/// Departure proximity in points; floors at zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "time score is a linear penalty on minutes"
)]
pub fn time_score(minutes: f64) -> f64 {
    (MAX_POINTS - minutes * POINTS_PER_MINUTE).max(0.0)
}

/// Weighted blend of route and time proximity, rounded to `0..=100`.
///
/// # Examples
/// ```
/// use ridepool_matcher::{Deviations, compatibility_score};
///
/// let perfect = Deviations { pickup_km: 0.0, dropoff_km: 0.0, time_minutes: 0.0 };
/// assert_eq!(compatibility_score(&perfect), 100);
///
/// let ten_minutes_late = Deviations { time_minutes: 10.0, ..perfect };
/// assert_eq!(compatibility_score(&ten_minutes_late), 92);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the blend is clamped to 0..=100 before narrowing to u8"
)]
pub fn compatibility_score(deviations: &Deviations) -> u8 {
    let route = route_score(deviations.pickup_km, deviations.dropoff_km);
    let time = time_score(deviations.time_minutes);
    let blended = route * ROUTE_WEIGHT + time * TIME_WEIGHT;
    blended.round().clamp(0.0, MAX_POINTS) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn deviations(pickup_km: f64, dropoff_km: f64, time_minutes: f64) -> Deviations {
        Deviations {
            pickup_km,
            dropoff_km,
            time_minutes,
        }
    }

    #[rstest]
    #[case(0.0, 0.0, 100.0)]
    #[case(1.0, 0.5, 70.0)]
    #[case(2.0, 2.0, 20.0)]
    #[case(3.0, 3.0, 0.0)]
    fn route_score_floors_at_zero(#[case] pickup: f64, #[case] dropoff: f64, #[case] expected: f64) {
        assert!((route_score(pickup, dropoff) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(0.0, 100.0)]
    #[case(10.0, 80.0)]
    #[case(30.0, 40.0)]
    #[case(75.0, 0.0)]
    fn time_score_floors_at_zero(#[case] minutes: f64, #[case] expected: f64) {
        assert!((time_score(minutes) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(deviations(0.0, 0.0, 0.0), 100)]
    #[case(deviations(0.05, 0.03, 10.0), 91)]
    #[case(deviations(0.0, 0.0, 10.0), 92)]
    #[case(deviations(2.0, 2.0, 30.0), 28)]
    #[case(deviations(1.0, 1.0, 15.0), 64)]
    // 0.6 * 90 + 0.4 * 81 = 86.4
    #[case(deviations(0.25, 0.25, 9.5), 86)]
    // 0.6 * 95 + 0.4 * 82.5 = 90.0
    #[case(deviations(0.125, 0.125, 8.75), 90)]
    fn composite_blends_sixty_forty(#[case] input: Deviations, #[case] expected: u8) {
        assert_eq!(compatibility_score(&input), expected);
    }

    #[rstest]
    fn half_points_round_up() {
        // 0.6 * 100 + 0.4 * 81.25 = 92.5
        assert_eq!(compatibility_score(&deviations(0.0, 0.0, 9.375)), 93);
    }
}
