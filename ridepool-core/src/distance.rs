//! Great-circle distance between two [`GeoPoint`]s.
//!
//! Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_KM`]:
//!
//! ```text
//! a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)
//! d = 2·R·atan2(√a, √(1−a))
//! ```

use crate::GeoPoint;

/// Mean Earth radius used for all distance calculations, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Return the great-circle distance between `from` and `to` in kilometres.
///
/// The function is total for valid points, symmetric, and returns `0.0` for
/// identical points.
///
/// # Examples
/// ```
/// use ridepool_core::{GeoPoint, haversine_km};
///
/// let new_york = GeoPoint::new(40.7128, -74.0060)?;
/// let los_angeles = GeoPoint::new(34.0522, -118.2437)?;
/// let d = haversine_km(new_york, los_angeles);
/// assert!((3935.0..=3945.0).contains(&d));
/// assert_eq!(haversine_km(new_york, new_york), 0.0);
/// # Ok::<(), ridepool_core::GeoPointError>(())
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is floating-point trigonometry"
)]
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();
    let half_d_lat = (to.lat() - from.lat()).to_radians() / 2.0;
    let half_d_lng = (to.lng() - from.lng()).to_radians() / 2.0;

    let raw = half_d_lat.sin().powi(2) + lat1.cos() * lat2.cos() * half_d_lng.sin().powi(2);
    // Rounding can push the term a hair past 1 for antipodal points.
    let a = raw.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}
