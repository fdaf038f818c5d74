//! Source of "now" for candidate fetches.

use crate::TimePoint;

/// Report the current instant.
///
/// Matchers take a clock rather than reading the system time directly so
/// tests can pin "now".
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> TimePoint;
}

/// Wall-clock time in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimePoint {
        TimePoint::now()
    }
}
