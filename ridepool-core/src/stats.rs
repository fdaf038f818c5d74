//! Aggregate figures about the ride pool.

use serde::{Deserialize, Serialize};

/// Counts over rides that are scheduled or in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingStats {
    /// Rides that are scheduled or in progress.
    pub total_available_rides: u64,
    /// Bookings made on those rides.
    pub total_bookings: u64,
    /// Mean open seats per ride, or `None` when there are no rides.
    pub average_seats_available: Option<f64>,
    /// Bookings on those rides whose status is `completed`.
    pub completed_bookings: u64,
}
