//! Ride offers posted by drivers.
//!
//! Offers are created by the ride-posting side of the platform and are
//! read-only to the matching engine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GeoPoint, TimePoint};

/// Lifecycle state of a ride offer.
///
/// Only [`RideStatus::Scheduled`] rides are bookable.
///
/// # Examples
/// ```
/// use ridepool_core::RideStatus;
///
/// assert_eq!(RideStatus::InProgress.as_str(), "in_progress");
/// assert_eq!("scheduled".parse::<RideStatus>(), Ok(RideStatus::Scheduled));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    /// Published and open for booking.
    #[default]
    Scheduled,
    /// The driver has departed.
    InProgress,
    /// The ride has finished.
    Completed,
    /// The driver withdrew the offer.
    Cancelled,
}

impl RideStatus {
    /// Return the storage representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ride status {0:?}")]
pub struct RideStatusParseError(pub String);

impl FromStr for RideStatus {
    type Err = RideStatusParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(RideStatusParseError(other.to_owned())),
        }
    }
}

/// Display-only attributes carried alongside a ride offer.
///
/// Nothing here influences admission or scoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideDetails {
    /// Human-readable pickup address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_address: Option<String>,
    /// Human-readable drop-off address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_address: Option<String>,
    /// Driver's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    /// Driver's average rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_rating: Option<f32>,
    /// Vehicle model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    /// Vehicle colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_color: Option<String>,
}

/// A driver's published trip with open seats.
///
/// # Examples
/// ```
/// use ridepool_core::{GeoPoint, RideOffer, RideStatus, TimePoint};
///
/// let offer = RideOffer::new(
///     7,
///     GeoPoint::new(40.7005, -74.0003)?,
///     GeoPoint::new(40.7098, -74.0099)?,
///     TimePoint::parse("2025-03-01T08:40:00Z")?,
/// );
/// assert_eq!(offer.status, RideStatus::Scheduled);
/// assert_eq!(offer.available_seats, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideOffer {
    /// Ride identifier.
    pub id: u64,
    /// Identifier of the posting driver.
    pub driver_id: u64,
    /// Identifier of the vehicle used.
    pub vehicle_id: u64,
    /// Where the driver sets off.
    pub start: GeoPoint,
    /// Where the driver is heading.
    pub end: GeoPoint,
    /// Scheduled departure.
    pub departure_time: TimePoint,
    /// Seats still open for booking.
    pub available_seats: u32,
    /// Price charged per seat.
    pub price_per_seat: f64,
    /// Lifecycle state.
    #[serde(default)]
    pub status: RideStatus,
    /// Display-only attributes.
    #[serde(flatten)]
    pub details: RideDetails,
}

impl RideOffer {
    /// Construct a scheduled single-seat offer with zeroed ids and price.
    ///
    /// Callers fill in the remaining public fields as needed.
    #[must_use]
    pub fn new(id: u64, start: GeoPoint, end: GeoPoint, departure_time: TimePoint) -> Self {
        Self {
            id,
            driver_id: 0,
            vehicle_id: 0,
            start,
            end,
            departure_time,
            available_seats: 1,
            price_per_seat: 0.0,
            status: RideStatus::Scheduled,
            details: RideDetails::default(),
        }
    }

    /// Report whether the offer can currently take a booking at `now`.
    #[must_use]
    pub fn is_bookable_at(&self, now: TimePoint) -> bool {
        self.status == RideStatus::Scheduled
            && self.available_seats > 0
            && self.departure_time > now
    }
}
