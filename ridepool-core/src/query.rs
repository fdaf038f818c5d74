//! Matching requests and their results.
//!
//! [`MatchRequest`] is the loosely shaped form a transport hands over;
//! [`MatchRequest::validate_detailed`] turns it into a typed [`MatchQuery`]
//! before any candidate is fetched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GeoPoint, GeoPointError, RideOffer, TimePoint, TimePointError};

/// A passenger's desired trip.
///
/// Exists only for the duration of one matching call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    /// Requested pickup point.
    pub start: GeoPoint,
    /// Requested drop-off point.
    pub end: GeoPoint,
    /// Requested departure.
    pub departure_time: TimePoint,
}

impl MatchQuery {
    /// Construct a query from validated parts.
    #[must_use]
    pub const fn new(start: GeoPoint, end: GeoPoint, departure_time: TimePoint) -> Self {
        Self {
            start,
            end,
            departure_time,
        }
    }
}

/// Errors raised while validating a [`MatchRequest`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchQueryError {
    /// A required field was absent.
    #[error("missing required field {field}")]
    MissingField {
        /// Wire name of the absent field.
        field: &'static str,
    },
    /// A coordinate pair was out of range or non-finite.
    #[error("invalid {field} coordinate: {source}")]
    InvalidCoordinate {
        /// Which end of the trip was rejected (`start` or `end`).
        field: &'static str,
        /// Underlying validation failure.
        #[source]
        source: GeoPointError,
    },
    /// The departure time could not be parsed.
    #[error("invalid departure time: {source}")]
    InvalidDepartureTime {
        /// Underlying parse failure.
        #[source]
        source: TimePointError,
    },
    /// The caller asked for zero or fewer results.
    #[error("maxResults must be positive, got {value}")]
    NonPositiveMaxResults {
        /// The rejected value.
        value: i64,
    },
}

/// Wire form of a matching request.
///
/// Every field is optional so that absent values surface as
/// [`MatchQueryError::MissingField`] rather than a generic decode failure.
///
/// # Examples
/// ```
/// use ridepool_core::MatchRequest;
///
/// let request: MatchRequest = serde_json::from_str(
///     r#"{
///         "startLat": 40.70, "startLng": -74.00,
///         "endLat": 40.71, "endLng": -74.01,
///         "departureTime": "2025-03-01T08:30:00Z"
///     }"#,
/// )?;
/// let (query, max_results) = request.validate_detailed(5)?;
/// assert_eq!(max_results, 5);
/// assert_eq!(query.start.lat(), 40.70);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    /// Pickup latitude in degrees.
    #[serde(default)]
    pub start_lat: Option<f64>,
    /// Pickup longitude in degrees.
    #[serde(default)]
    pub start_lng: Option<f64>,
    /// Drop-off latitude in degrees.
    #[serde(default)]
    pub end_lat: Option<f64>,
    /// Drop-off longitude in degrees.
    #[serde(default)]
    pub end_lng: Option<f64>,
    /// Requested departure as a timestamp string.
    #[serde(default)]
    pub departure_time: Option<String>,
    /// Upper bound on returned matches.
    #[serde(default)]
    pub max_results: Option<i64>,
}

impl MatchRequest {
    /// Validate the request, returning the typed query and the result limit.
    ///
    /// `default_max_results` applies when the request carries no limit.
    ///
    /// # Errors
    /// Returns the first [`MatchQueryError`] encountered, checking fields in
    /// declaration order.
    pub fn validate_detailed(
        &self,
        default_max_results: usize,
    ) -> Result<(MatchQuery, usize), MatchQueryError> {
        let start = point(self.start_lat, "startLat", self.start_lng, "startLng", "start")?;
        let end = point(self.end_lat, "endLat", self.end_lng, "endLng", "end")?;
        let raw_departure = self
            .departure_time
            .as_deref()
            .ok_or(MatchQueryError::MissingField {
                field: "departureTime",
            })?;
        let departure_time = TimePoint::parse(raw_departure)
            .map_err(|source| MatchQueryError::InvalidDepartureTime { source })?;
        let max_results = match self.max_results {
            None => default_max_results,
            Some(value) => usize::try_from(value)
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(MatchQueryError::NonPositiveMaxResults { value })?,
        };
        Ok((MatchQuery::new(start, end, departure_time), max_results))
    }
}

fn point(
    lat: Option<f64>,
    lat_field: &'static str,
    lng: Option<f64>,
    lng_field: &'static str,
    field: &'static str,
) -> Result<GeoPoint, MatchQueryError> {
    let lat_value = lat.ok_or(MatchQueryError::MissingField { field: lat_field })?;
    let lng_value = lng.ok_or(MatchQueryError::MissingField { field: lng_field })?;
    GeoPoint::new(lat_value, lng_value)
        .map_err(|source| MatchQueryError::InvalidCoordinate { field, source })
}

/// A ride offer that passed both admission gates, with its derived scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// The matched offer.
    #[serde(flatten)]
    pub ride: RideOffer,
    /// Composite desirability in `0..=100`.
    pub compatibility_score: u8,
    /// Distance between the requested pickup and the ride's start, in km.
    pub pickup_deviation_km: f64,
    /// Distance between the requested drop-off and the ride's end, in km.
    pub dropoff_deviation_km: f64,
    /// Absolute departure difference in minutes.
    pub time_difference_minutes: f64,
}

/// Pickup and drop-off points of a past trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripEndpoints {
    /// Where the passenger was picked up.
    pub pickup: GeoPoint,
    /// Where the passenger was dropped off.
    pub dropoff: GeoPoint,
}

impl TripEndpoints {
    /// Average the pickup and drop-off coordinates of `trips`.
    ///
    /// Returns `None` for an empty history. Latitudes and longitudes are
    /// averaged independently in degrees.
    ///
    /// # Examples
    /// ```
    /// use ridepool_core::{GeoPoint, TripEndpoints};
    ///
    /// let trips = [
    ///     TripEndpoints { pickup: GeoPoint::new(10.0, 20.0)?, dropoff: GeoPoint::new(0.0, 0.0)? },
    ///     TripEndpoints { pickup: GeoPoint::new(20.0, 40.0)?, dropoff: GeoPoint::new(2.0, 4.0)? },
    /// ];
    /// let centre = TripEndpoints::centroid(&trips).expect("non-empty history");
    /// assert_eq!(centre.pickup, GeoPoint::new(15.0, 30.0)?);
    /// assert_eq!(centre.dropoff, GeoPoint::new(1.0, 2.0)?);
    /// assert!(TripEndpoints::centroid(&[]).is_none());
    /// # Ok::<(), ridepool_core::GeoPointError>(())
    /// ```
    #[must_use]
    pub fn centroid(trips: &[Self]) -> Option<Self> {
        let pickup = mean_point(trips.iter().map(|trip| trip.pickup))?;
        let dropoff = mean_point(trips.iter().map(|trip| trip.dropoff))?;
        Some(Self { pickup, dropoff })
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging coordinates divides degree sums by the trip count"
)]
fn mean_point(points: impl Iterator<Item = GeoPoint>) -> Option<GeoPoint> {
    let (count, lat_sum, lng_sum) = points.fold((0_usize, 0.0_f64, 0.0_f64), |acc, p| {
        (acc.0 + 1, acc.1 + p.lat(), acc.2 + p.lng())
    });
    if count == 0 {
        return None;
    }
    let n = count as f64;
    GeoPoint::new(
        (lat_sum / n).clamp(-90.0, 90.0),
        (lng_sum / n).clamp(-180.0, 180.0),
    )
    .ok()
}
