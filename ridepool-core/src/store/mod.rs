//! Persistent ride storage backends.
//!
//! The SQLite backend reads ride offers, driver and vehicle display data,
//! booking history and pool-wide statistics from the platform's relational
//! schema. It only ever reads; posting, booking and seat bookkeeping belong to
//! other services.

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{DEFAULT_BUSY_TIMEOUT, SqliteRideStoreError, SqliteRideSupplier};

#[cfg(all(feature = "store-sqlite", any(test, feature = "test-support")))]
pub(crate) use sqlite::{create_schema, insert_booking, insert_ride};
