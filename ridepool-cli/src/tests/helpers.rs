//! Test helpers for composing ride databases and request files.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ridepool_core::test_support::{ride, write_rides_database};
use ridepool_core::{RideStatus, TimePoint};
use tempfile::TempDir;

pub(super) const PICKUP: (f64, f64) = (40.7000, -74.0000);
pub(super) const DROPOFF: (f64, f64) = (40.7100, -74.0100);
pub(super) const PASSENGER: u64 = 77;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary workspace holding a ride database and a request file path.
///
/// Ride departures are relative to the instant the fixture was built:
/// - ride 1 starts and ends within 100 m of the trip, 70 minutes out;
/// - ride 2 follows the trip exactly, 105 minutes out;
/// - ride 3 follows the trip exactly, 60 minutes out;
/// - ride 4 follows the trip exactly, 15 minutes out;
/// - ride 10 departed yesterday and was booked by [`PASSENGER`].
#[derive(Debug)]
pub(super) struct RideFixture {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) rides_db: Utf8PathBuf,
    pub(super) request_path: Utf8PathBuf,
    pub(super) departure: TimePoint,
}

impl RideFixture {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let rides_db = root.join("rides.db");
        let request_path = root.join("request.json");
        let now = TimePoint::now();
        let departure = now.offset_minutes(60);

        let mut past = ride(10, PICKUP, DROPOFF, now.offset_minutes(-24 * 60));
        past.status = RideStatus::Completed;
        let rides = [
            ride(
                1,
                (40.7005, -74.0003),
                (40.7098, -74.0099),
                departure.offset_minutes(10),
            ),
            ride(2, PICKUP, DROPOFF, departure.offset_minutes(45)),
            ride(3, PICKUP, DROPOFF, departure),
            ride(4, PICKUP, DROPOFF, now.offset_minutes(15)),
            past,
        ];
        write_rides_database(rides_db.as_std_path(), &rides, &[(PASSENGER, 10)])
            .expect("write ride database");

        Self {
            _dir: dir,
            root,
            rides_db,
            request_path,
            departure,
        }
    }

    /// Write a request for the fixture trip, optionally overriding the start
    /// latitude.
    pub(super) fn write_request(&self, start_lat: f64) {
        let payload = format!(
            r#"{{
                "startLat": {start_lat}, "startLng": {},
                "endLat": {}, "endLng": {},
                "departureTime": "{}"
            }}"#,
            PICKUP.1, DROPOFF.0, DROPOFF.1, self.departure
        );
        write_utf8(&self.request_path, payload.as_bytes());
    }

    pub(super) fn write_valid_request(&self) {
        self.write_request(PICKUP.0);
    }
}
