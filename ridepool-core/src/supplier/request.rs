//! Parameters describing the candidate pool to fetch.

use crate::{RideOffer, TimePoint};

/// Inclusive bounds on the departure times a supplier should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureWindow {
    /// Earliest admissible departure.
    pub earliest: TimePoint,
    /// Latest admissible departure.
    pub latest: TimePoint,
}

impl DepartureWindow {
    /// A window of `tolerance_minutes` either side of `centre`.
    #[must_use]
    pub fn around(centre: TimePoint, tolerance_minutes: u32) -> Self {
        let tolerance = i64::from(tolerance_minutes);
        Self {
            earliest: centre.offset_minutes(-tolerance),
            latest: centre.offset_minutes(tolerance),
        }
    }

    /// Report whether `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: TimePoint) -> bool {
        (self.earliest..=self.latest).contains(&instant)
    }
}

/// What a matcher asks a [`crate::CandidateSupplier`] for.
///
/// # Examples
/// ```
/// use ridepool_core::{CandidateRequest, DepartureWindow, TimePoint};
///
/// let now = TimePoint::parse("2025-03-01T08:00:00Z")?;
/// let departure = TimePoint::parse("2025-03-01T12:00:00Z")?;
/// let request = CandidateRequest::new(now, 50)
///     .with_departure_window(DepartureWindow::around(departure, 30));
/// assert_eq!(request.pool_cap, 50);
/// assert!(request.departure_window.is_some());
/// # Ok::<(), ridepool_core::TimePointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRequest {
    /// Reference instant; only rides departing strictly after it qualify.
    pub now: TimePoint,
    /// Maximum number of offers to return.
    pub pool_cap: usize,
    /// Optional restriction on departure times.
    pub departure_window: Option<DepartureWindow>,
}

impl CandidateRequest {
    /// Request the `pool_cap` soonest bookable rides after `now`.
    #[must_use]
    pub const fn new(now: TimePoint, pool_cap: usize) -> Self {
        Self {
            now,
            pool_cap,
            departure_window: None,
        }
    }

    /// Restrict the pool to departures inside `window`.
    #[must_use]
    pub const fn with_departure_window(mut self, window: DepartureWindow) -> Self {
        self.departure_window = Some(window);
        self
    }

    /// The bookable predicate suppliers apply: scheduled, seats open,
    /// departing after `now`, and inside the window when one is set.
    #[must_use]
    pub fn admits(&self, ride: &RideOffer) -> bool {
        ride.is_bookable_at(self.now)
            && self
                .departure_window
                .is_none_or(|window| window.contains(ride.departure_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;
    use rstest::rstest;

    fn ride_departing(at: &str) -> RideOffer {
        let origin = GeoPoint::new(0.0, 0.0).expect("valid point");
        RideOffer::new(1, origin, origin, TimePoint::parse(at).expect("valid timestamp"))
    }

    #[rstest]
    #[case("2025-03-01T11:30:00Z", true)]
    #[case("2025-03-01T12:30:00Z", true)]
    #[case("2025-03-01T12:30:00.001Z", false)]
    #[case("2025-03-01T11:29:59Z", false)]
    fn window_bounds_are_inclusive(#[case] departure: &str, #[case] expected: bool) {
        let now = TimePoint::parse("2025-03-01T08:00:00Z").expect("valid timestamp");
        let centre = TimePoint::parse("2025-03-01T12:00:00Z").expect("valid timestamp");
        let request =
            CandidateRequest::new(now, 50).with_departure_window(DepartureWindow::around(centre, 30));
        assert_eq!(request.admits(&ride_departing(departure)), expected);
    }

    #[rstest]
    fn without_window_only_bookability_matters() {
        let now = TimePoint::parse("2025-03-01T08:00:00Z").expect("valid timestamp");
        let request = CandidateRequest::new(now, 50);
        assert!(request.admits(&ride_departing("2030-01-01T00:00:00Z")));
        assert!(!request.admits(&ride_departing("2025-03-01T08:00:00Z")));
    }
}
