//! Validated WGS84 positions.

use std::fmt;

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// A coordinate was NaN or infinite.
    #[error("coordinates must be finite (lat {lat}, lng {lng})")]
    NonFinite {
        /// Latitude as supplied.
        lat: f64,
        /// Longitude as supplied.
        lng: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A position on the globe in degrees.
///
/// The point is stored as a [`Coord`] with `x = longitude` and
/// `y = latitude`. No datum correction is applied.
///
/// # Examples
/// ```
/// use ridepool_core::GeoPoint;
///
/// let point = GeoPoint::new(40.7128, -74.0060)?;
/// assert_eq!(point.lat(), 40.7128);
/// assert_eq!(point.lng(), -74.0060);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// # Ok::<(), ridepool_core::GeoPointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    coord: Coord<f64>,
}

impl GeoPoint {
    /// Validate and construct a point from latitude and longitude.
    ///
    /// # Errors
    /// Returns [`GeoPointError`] when either value is non-finite or out of
    /// range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(GeoPointError::NonFinite { lat, lng });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointError::LongitudeOutOfRange(lng));
        }
        Ok(Self {
            coord: Coord { x: lng, y: lat },
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.coord.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.coord.x
    }

    /// The underlying `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        self.coord
    }
}

impl TryFrom<Coord<f64>> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(coord: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(coord.y, coord.x)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat(), self.lng())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            lat: point.lat(),
            lng: point.lng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_coordinates(#[case] lat: f64, #[case] lng: f64) {
        let point = GeoPoint::new(lat, lng).expect("boundary coordinates are valid");
        assert_eq!(point.coord(), Coord { x: lng, y: lat });
    }

    #[rstest]
    #[case(90.000_1, 0.0)]
    #[case(-91.0, 0.0)]
    fn rejects_latitude_out_of_range(#[case] lat: f64, #[case] lng: f64) {
        let err = GeoPoint::new(lat, lng).expect_err("latitude out of range");
        assert_eq!(err, GeoPointError::LatitudeOutOfRange(lat));
    }

    #[rstest]
    #[case(0.0, 180.5)]
    #[case(0.0, -200.0)]
    fn rejects_longitude_out_of_range(#[case] lat: f64, #[case] lng: f64) {
        let err = GeoPoint::new(lat, lng).expect_err("longitude out of range");
        assert_eq!(err, GeoPointError::LongitudeOutOfRange(lng));
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_non_finite(#[case] lat: f64, #[case] lng: f64) {
        let err = GeoPoint::new(lat, lng).expect_err("non-finite coordinates");
        assert!(matches!(err, GeoPointError::NonFinite { .. }));
    }

    #[rstest]
    fn deserialising_revalidates() {
        let ok: GeoPoint =
            serde_json::from_str(r#"{"lat": 40.7, "lng": -74.0}"#).expect("valid point");
        assert_eq!(ok.lat(), 40.7);
        let err = serde_json::from_str::<GeoPoint>(r#"{"lat": 140.0, "lng": -74.0}"#);
        assert!(err.is_err());
    }
}
