//! SQLite-backed candidate supplier.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, ErrorCode, OpenFlags, Row, params};
use thiserror::Error;

use crate::{
    CandidateRequest, CandidateSupplier, GeoPoint, GeoPointError, MatchingStats, RideDetails,
    RideOffer, RideStatus, SupplierError, TimePoint, TripEndpoints,
};

/// How long a fetch waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CANDIDATE_QUERY: &str = "SELECT
        r.id, r.driver_id, r.vehicle_id,
        r.start_lat, r.start_lng, r.end_lat, r.end_lng,
        r.start_address, r.end_address,
        r.departure_time, r.available_seats, r.price_per_seat, r.status,
        u.first_name, u.rating, v.model, v.color
     FROM rides r
     JOIN users u ON r.driver_id = u.id
     JOIN vehicles v ON r.vehicle_id = v.id
     WHERE r.status = 'scheduled'
       AND r.available_seats > 0
       AND r.departure_time > ?1
       AND r.departure_time >= ?2
       AND r.departure_time <= ?3
     ORDER BY r.departure_time ASC, r.id ASC
     LIMIT ?4";

const HISTORY_QUERY: &str = "SELECT r.id, r.start_lat, r.start_lng, r.end_lat, r.end_lng
     FROM bookings b
     JOIN rides r ON b.ride_id = r.id
     WHERE b.passenger_id = ?1
     ORDER BY b.id ASC";

const STATS_QUERY: &str = "SELECT
        (SELECT COUNT(*) FROM rides
            WHERE status IN ('scheduled', 'in_progress')),
        (SELECT COUNT(*) FROM bookings b JOIN rides r ON b.ride_id = r.id
            WHERE r.status IN ('scheduled', 'in_progress')),
        (SELECT AVG(CAST(available_seats AS REAL)) FROM rides
            WHERE status IN ('scheduled', 'in_progress')),
        (SELECT COUNT(*) FROM bookings b JOIN rides r ON b.ride_id = r.id
            WHERE r.status IN ('scheduled', 'in_progress') AND b.status = 'completed')";

/// Error raised when opening the ride database or reading booking history.
#[derive(Debug, Error)]
pub enum SqliteRideStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A ride referenced by the booking history carries invalid coordinates.
    #[error("ride {ride_id} has invalid coordinates: {source}")]
    InvalidCoordinates {
        /// Identifier of the offending ride.
        ride_id: i64,
        /// Coordinate validation failure.
        #[source]
        source: GeoPointError,
    },
    /// The passenger identifier does not fit SQLite's signed integer range.
    #[error("passenger id {passenger_id} is out of range")]
    PassengerIdOutOfRange {
        /// The rejected identifier.
        passenger_id: u64,
    },
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only candidate supplier backed by the platform's SQLite schema.
///
/// Each fetch opens a fresh read-only connection, so the supplier is
/// `Send + Sync` and always sees the latest committed rides. A fetch that
/// waits longer than the busy timeout on a locked database fails with
/// [`SupplierError::Timeout`].
#[derive(Debug, Clone)]
pub struct SqliteRideSupplier {
    database_path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteRideSupplier {
    /// Open the ride database at `database_path`.
    ///
    /// The database is opened once to fail fast on a bad path.
    ///
    /// # Errors
    /// Returns [`SqliteRideStoreError::OpenDatabase`] when the file cannot be
    /// opened read-only.
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self, SqliteRideStoreError> {
        let database_path = database_path.as_ref().to_path_buf();
        open_read_only(&database_path)?;
        Ok(Self {
            database_path,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        })
    }

    /// Replace the busy timeout applied to each candidate fetch.
    #[must_use]
    pub const fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Location of the backing database.
    #[must_use]
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Return the ride endpoints of every booking made by `passenger_id`,
    /// oldest booking first.
    ///
    /// # Errors
    /// Returns [`SqliteRideStoreError`] when the query fails or a booked ride
    /// carries invalid coordinates.
    pub fn passenger_history(
        &self,
        passenger_id: u64,
    ) -> Result<Vec<TripEndpoints>, SqliteRideStoreError> {
        let passenger = i64::try_from(passenger_id)
            .map_err(|_| SqliteRideStoreError::PassengerIdOutOfRange { passenger_id })?;
        let connection = open_read_only(&self.database_path)?;
        let mut statement = connection.prepare(HISTORY_QUERY)?;
        let mut rows = statement.query(params![passenger])?;
        let mut trips = Vec::new();
        while let Some(row) = rows.next()? {
            let ride_id: i64 = row.get(0)?;
            let to_error = |source| SqliteRideStoreError::InvalidCoordinates { ride_id, source };
            let pickup = GeoPoint::new(row.get(1)?, row.get(2)?).map_err(to_error)?;
            let dropoff = GeoPoint::new(row.get(3)?, row.get(4)?).map_err(to_error)?;
            trips.push(TripEndpoints { pickup, dropoff });
        }
        Ok(trips)
    }

    /// Aggregate figures over rides that are scheduled or in progress.
    ///
    /// # Errors
    /// Returns [`SqliteRideStoreError`] when the database cannot be opened or
    /// queried.
    pub fn matching_stats(&self) -> Result<MatchingStats, SqliteRideStoreError> {
        let connection = open_read_only(&self.database_path)?;
        let stats = connection.query_row(STATS_QUERY, [], |row| {
            Ok(MatchingStats {
                total_available_rides: row.get(0)?,
                total_bookings: row.get(1)?,
                average_seats_available: row.get(2)?,
                completed_bookings: row.get(3)?,
            })
        })?;
        Ok(stats)
    }

    fn query_rows(&self, request: &CandidateRequest) -> Result<Vec<RideRow>, rusqlite::Error> {
        let connection = Connection::open_with_flags(
            &self.database_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        connection.busy_timeout(self.busy_timeout)?;
        let (earliest, latest) = request
            .departure_window
            .map_or((i64::MIN, i64::MAX), |window| {
                (window.earliest.as_millis(), window.latest.as_millis())
            });
        let limit = i64::try_from(request.pool_cap).unwrap_or(i64::MAX);
        let mut statement = connection.prepare(CANDIDATE_QUERY)?;
        let rows = statement.query_map(
            params![request.now.as_millis(), earliest, latest, limit],
            RideRow::read,
        )?;
        rows.collect()
    }

    fn supplier_error(&self, err: &rusqlite::Error) -> SupplierError {
        if err.sqlite_error_code() == Some(ErrorCode::DatabaseBusy) {
            SupplierError::Timeout {
                elapsed: self.busy_timeout,
            }
        } else {
            SupplierError::Unavailable {
                message: err.to_string(),
            }
        }
    }
}

impl CandidateSupplier for SqliteRideSupplier {
    fn fetch_candidates(
        &self,
        request: &CandidateRequest,
    ) -> Result<Vec<RideOffer>, SupplierError> {
        let rows = self
            .query_rows(request)
            .map_err(|err| self.supplier_error(&err))?;
        log::debug!(
            "loaded {} candidate rides from {}",
            rows.len(),
            self.database_path.display()
        );
        rows.into_iter().map(RideRow::into_offer).collect()
    }
}

fn open_read_only(path: &Path) -> Result<Connection, SqliteRideStoreError> {
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(|source| {
        SqliteRideStoreError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Raw column values for one candidate row.
struct RideRow {
    id: i64,
    driver_id: i64,
    vehicle_id: i64,
    start: (f64, f64),
    end: (f64, f64),
    start_address: Option<String>,
    end_address: Option<String>,
    departure_ms: i64,
    available_seats: i64,
    price_per_seat: f64,
    status: String,
    driver_name: Option<String>,
    driver_rating: Option<f64>,
    vehicle_model: Option<String>,
    vehicle_color: Option<String>,
}

impl RideRow {
    fn read(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            driver_id: row.get(1)?,
            vehicle_id: row.get(2)?,
            start: (row.get(3)?, row.get(4)?),
            end: (row.get(5)?, row.get(6)?),
            start_address: row.get(7)?,
            end_address: row.get(8)?,
            departure_ms: row.get(9)?,
            available_seats: row.get(10)?,
            price_per_seat: row.get(11)?,
            status: row.get(12)?,
            driver_name: row.get(13)?,
            driver_rating: row.get(14)?,
            vehicle_model: row.get(15)?,
            vehicle_color: row.get(16)?,
        })
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "driver ratings are small display values"
    )]
    fn into_offer(self) -> Result<RideOffer, SupplierError> {
        let ride_id = u64::try_from(self.id).map_err(|_| SupplierError::MalformedRide {
            ride_id: 0,
            reason: format!("negative ride id {}", self.id),
        })?;
        let malformed = |reason: String| SupplierError::MalformedRide { ride_id, reason };
        let id_field = |value: i64, name: &str| {
            u64::try_from(value).map_err(|_| malformed(format!("negative {name} {value}")))
        };
        let start = GeoPoint::new(self.start.0, self.start.1)
            .map_err(|err| malformed(format!("start: {err}")))?;
        let end = GeoPoint::new(self.end.0, self.end.1)
            .map_err(|err| malformed(format!("end: {err}")))?;
        let departure_time =
            TimePoint::from_millis(self.departure_ms).map_err(|err| malformed(err.to_string()))?;
        let available_seats = u32::try_from(self.available_seats)
            .map_err(|_| malformed(format!("invalid seat count {}", self.available_seats)))?;
        if !self.price_per_seat.is_finite() || self.price_per_seat < 0.0 {
            return Err(malformed(format!("invalid price {}", self.price_per_seat)));
        }
        let status = self
            .status
            .parse::<RideStatus>()
            .map_err(|err| malformed(err.to_string()))?;

        Ok(RideOffer {
            id: ride_id,
            driver_id: id_field(self.driver_id, "driver id")?,
            vehicle_id: id_field(self.vehicle_id, "vehicle id")?,
            start,
            end,
            departure_time,
            available_seats,
            price_per_seat: self.price_per_seat,
            status,
            details: RideDetails {
                start_address: self.start_address,
                end_address: self.end_address,
                driver_name: self.driver_name,
                driver_rating: self.driver_rating.map(|rating| rating as f32),
                vehicle_model: self.vehicle_model,
                vehicle_color: self.vehicle_color,
            },
        })
    }
}

/// Create the tables the supplier reads from.
#[cfg(any(test, feature = "test-support"))]
pub(crate) fn create_schema(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            rating REAL DEFAULT 5.0
        );
        CREATE TABLE IF NOT EXISTS vehicles (
            id INTEGER PRIMARY KEY,
            owner_id INTEGER NOT NULL REFERENCES users(id),
            model TEXT NOT NULL,
            color TEXT
        );
        CREATE TABLE IF NOT EXISTS rides (
            id INTEGER PRIMARY KEY,
            driver_id INTEGER NOT NULL REFERENCES users(id),
            vehicle_id INTEGER NOT NULL REFERENCES vehicles(id),
            start_lat REAL NOT NULL,
            start_lng REAL NOT NULL,
            end_lat REAL NOT NULL,
            end_lng REAL NOT NULL,
            start_address TEXT,
            end_address TEXT,
            departure_time INTEGER NOT NULL,
            available_seats INTEGER NOT NULL,
            price_per_seat REAL NOT NULL,
            status TEXT NOT NULL DEFAULT 'scheduled'
        );
        CREATE TABLE IF NOT EXISTS bookings (
            id INTEGER PRIMARY KEY,
            ride_id INTEGER NOT NULL REFERENCES rides(id),
            passenger_id INTEGER NOT NULL REFERENCES users(id),
            seats_booked INTEGER NOT NULL DEFAULT 1,
            status TEXT NOT NULL DEFAULT 'confirmed'
        );
        CREATE INDEX IF NOT EXISTS idx_rides_departure_time ON rides(departure_time);
        CREATE INDEX IF NOT EXISTS idx_rides_status ON rides(status);
        CREATE INDEX IF NOT EXISTS idx_bookings_passenger_id ON bookings(passenger_id);",
    )
}

/// Insert `ride` together with placeholder driver and vehicle rows.
#[cfg(any(test, feature = "test-support"))]
pub(crate) fn insert_ride(connection: &Connection, ride: &RideOffer) -> Result<(), rusqlite::Error> {
    let driver_name = ride
        .details
        .driver_name
        .clone()
        .unwrap_or_else(|| format!("driver-{}", ride.driver_id));
    connection.execute(
        "INSERT OR IGNORE INTO users (id, first_name, rating) VALUES (?1, ?2, ?3)",
        params![ride.driver_id, driver_name, ride.details.driver_rating.map(f64::from)],
    )?;
    let model = ride
        .details
        .vehicle_model
        .clone()
        .unwrap_or_else(|| "Sedan".to_owned());
    connection.execute(
        "INSERT OR IGNORE INTO vehicles (id, owner_id, model, color) VALUES (?1, ?2, ?3, ?4)",
        params![ride.vehicle_id, ride.driver_id, model, ride.details.vehicle_color],
    )?;
    connection.execute(
        "INSERT INTO rides (
            id, driver_id, vehicle_id, start_lat, start_lng, end_lat, end_lng,
            start_address, end_address, departure_time, available_seats,
            price_per_seat, status
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            ride.id,
            ride.driver_id,
            ride.vehicle_id,
            ride.start.lat(),
            ride.start.lng(),
            ride.end.lat(),
            ride.end.lng(),
            ride.details.start_address,
            ride.details.end_address,
            ride.departure_time.as_millis(),
            ride.available_seats,
            ride.price_per_seat,
            ride.status.as_str(),
        ],
    )?;
    Ok(())
}

/// Record that `passenger_id` booked `ride_id`.
#[cfg(any(test, feature = "test-support"))]
pub(crate) fn insert_booking(
    connection: &Connection,
    booking_id: u64,
    ride_id: u64,
    passenger_id: u64,
) -> Result<(), rusqlite::Error> {
    connection.execute(
        "INSERT OR IGNORE INTO users (id, first_name) VALUES (?1, ?2)",
        params![passenger_id, format!("passenger-{passenger_id}")],
    )?;
    connection.execute(
        "INSERT INTO bookings (id, ride_id, passenger_id) VALUES (?1, ?2, ?3)",
        params![booking_id, ride_id, passenger_id],
    )?;
    Ok(())
}
