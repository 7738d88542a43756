//! Errors raised while mapping instants onto the local calendar.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the time resolution step.
///
/// Gesture and ring operations never fail; only calendar conversions can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    /// The millisecond value does not map onto a local date-time.
    #[error("instant {0} ms is outside the representable local date range")]
    InstantOutOfRange(i64),
    /// A calendar adjustment landed in a local-time gap (for example a DST
    /// transition) and no instant carries that wall-clock time.
    #[error("{date} {hour:02}:{minute:02} does not exist in the local time zone")]
    NonexistentLocalTime {
        /// Calendar date of the requested wall-clock time.
        date: NaiveDate,
        /// Requested hour.
        hour: u32,
        /// Requested minute.
        minute: u32,
    },
}
