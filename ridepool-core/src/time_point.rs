//! UTC instants with millisecond precision.
//!
//! Comparisons and differences are computed on millisecond epoch values;
//! no timezone negotiation takes place.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Naive layouts accepted in addition to RFC 3339. They are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Errors returned when constructing a [`TimePoint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimePointError {
    /// The input was not a recognised timestamp.
    #[error("unparsable timestamp {input:?}")]
    Unparsable {
        /// The rejected input.
        input: String,
    },
    /// A millisecond epoch value could not be represented.
    #[error("epoch milliseconds {0} are out of range")]
    OutOfRange(i64),
}

/// An absolute instant normalised to UTC.
///
/// # Examples
/// ```
/// use ridepool_core::TimePoint;
///
/// let departure = TimePoint::parse("2025-03-01T08:30:00Z")?;
/// let later = TimePoint::parse("2025-03-01T09:00:00+00:00")?;
/// assert_eq!(TimePoint::minutes_between(departure, later), 30.0);
/// # Ok::<(), ridepool_core::TimePointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimePoint(DateTime<Utc>);

impl TimePoint {
    /// Parse an RFC 3339 timestamp or a naive ISO-8601 timestamp read as UTC.
    ///
    /// # Errors
    /// Returns [`TimePointError::Unparsable`] when no supported layout
    /// matches.
    pub fn parse(input: &str) -> Result<Self, TimePointError> {
        let trimmed = input.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(parsed.with_timezone(&Utc)));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
            .ok_or_else(|| TimePointError::Unparsable {
                input: input.to_owned(),
            })
    }

    /// Construct an instant from milliseconds since the Unix epoch.
    ///
    /// # Errors
    /// Returns [`TimePointError::OutOfRange`] when `millis` cannot be
    /// represented as a calendar date.
    pub fn from_millis(millis: i64) -> Result<Self, TimePointError> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(Self)
            .ok_or(TimePointError::OutOfRange(millis))
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The current wall-clock instant.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Absolute distance between two instants in fractional minutes.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "minute differences are fractional; epoch deltas stay far below 2^52"
    )]
    pub fn minutes_between(a: Self, b: Self) -> f64 {
        let delta = a.as_millis().abs_diff(b.as_millis());
        delta as f64 / MILLIS_PER_MINUTE
    }

    /// Shift the instant by a signed number of whole minutes, saturating at
    /// the representable range.
    #[must_use]
    pub fn offset_minutes(&self, minutes: i64) -> Self {
        chrono::TimeDelta::try_minutes(minutes)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map_or(*self, Self)
    }

    /// The underlying `chrono` timestamp.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for TimePoint {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl TryFrom<String> for TimePoint {
    type Error = TimePointError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimePoint> for String {
    fn from(value: TimePoint) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
