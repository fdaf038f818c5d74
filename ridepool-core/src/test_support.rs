//! Test-only collaborators: an in-memory supplier, a failing supplier and a
//! pinned clock, plus builders for points and rides.

use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    CandidateRequest, CandidateSupplier, Clock, GeoPoint, RideOffer, SupplierError, TimePoint,
};

/// In-memory `CandidateSupplier` honouring the full supplier contract.
///
/// The supplier performs a linear scan and is intended only for small
/// datasets. Every request is recorded so tests can inspect what the matcher
/// asked for; call [`MemorySupplier::without_recording`] for long-running
/// loops such as benchmarks.
#[derive(Debug, Default)]
pub struct MemorySupplier {
    rides: Vec<RideOffer>,
    requests: Mutex<Vec<CandidateRequest>>,
    skip_recording: bool,
}

impl MemorySupplier {
    /// Create a supplier from a collection of offers.
    pub fn with_rides<I>(rides: I) -> Self
    where
        I: IntoIterator<Item = RideOffer>,
    {
        Self {
            rides: rides.into_iter().collect(),
            requests: Mutex::new(Vec::new()),
            skip_recording: false,
        }
    }

    /// Stop recording requests.
    #[must_use]
    pub const fn without_recording(mut self) -> Self {
        self.skip_recording = true;
        self
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<CandidateRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CandidateSupplier for MemorySupplier {
    fn fetch_candidates(
        &self,
        request: &CandidateRequest,
    ) -> Result<Vec<RideOffer>, SupplierError> {
        if !self.skip_recording {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(*request);
        }
        let mut pool: Vec<RideOffer> = self
            .rides
            .iter()
            .filter(|ride| request.admits(ride))
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal departures.
        pool.sort_by_key(|ride| ride.departure_time);
        pool.truncate(request.pool_cap);
        Ok(pool)
    }
}

/// Supplier that always fails with the configured error.
#[derive(Debug)]
pub struct FailingSupplier {
    error: SupplierError,
    calls: AtomicUsize,
}

impl FailingSupplier {
    /// Fail every fetch with `error`.
    #[must_use]
    pub const fn new(error: SupplierError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches attempted.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CandidateSupplier for FailingSupplier {
    fn fetch_candidates(
        &self,
        _request: &CandidateRequest,
    ) -> Result<Vec<RideOffer>, SupplierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// `Clock` pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub TimePoint);

impl Clock for FixedClock {
    fn now(&self) -> TimePoint {
        self.0
    }
}

/// Build a [`GeoPoint`], panicking on invalid coordinates.
///
/// # Panics
/// Panics when the coordinates are out of range; test inputs are literals.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "test builders fail fast on invalid literals"
)]
pub fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).expect("test coordinates must be valid")
}

/// Parse a [`TimePoint`], panicking on invalid input.
///
/// # Panics
/// Panics when `input` is not a supported timestamp.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "test builders fail fast on invalid literals"
)]
pub fn at(input: &str) -> TimePoint {
    TimePoint::parse(input).expect("test timestamps must be valid")
}

/// Construct a scheduled ride with three open seats between two points.
///
/// # Examples
/// ```rust
/// use ridepool_core::test_support::{at, ride};
///
/// let offer = ride(1, (40.7005, -74.0003), (40.7098, -74.0099), at("2025-03-01T08:40:00Z"));
/// assert_eq!(offer.available_seats, 3);
/// ```
#[must_use]
pub fn ride(id: u64, start: (f64, f64), end: (f64, f64), departure: TimePoint) -> RideOffer {
    let mut offer = RideOffer::new(
        id,
        point(start.0, start.1),
        point(end.0, end.1),
        departure,
    );
    offer.driver_id = id.saturating_add(1000);
    offer.vehicle_id = id.saturating_add(2000);
    offer.available_seats = 3;
    offer.price_per_seat = 12.5;
    offer
}

/// Write `rides` and `(passenger_id, ride_id)` bookings into a fresh SQLite
/// database at `path`, creating the schema first.
///
/// Booking identifiers are assigned sequentially from 1.
///
/// # Errors
/// Returns any `rusqlite` error raised while creating or populating the
/// database.
#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub fn write_rides_database(
    path: &std::path::Path,
    rides: &[RideOffer],
    bookings: &[(u64, u64)],
) -> Result<(), rusqlite::Error> {
    let connection = rusqlite::Connection::open(path)?;
    crate::store::create_schema(&connection)?;
    for offer in rides {
        crate::store::insert_ride(&connection, offer)?;
    }
    for (booking_id, &(passenger_id, ride_id)) in (1_u64..).zip(bookings) {
        crate::store::insert_booking(&connection, booking_id, ride_id, passenger_id)?;
    }
    Ok(())
}
