//! Millisecond instants and their local-calendar view.
//!
//! Every node on the timeline carries a [`Timestamp`] aligned to :00 or :30.
//! Labels are derived from the local-time representation in the fixed 24-hour
//! `HH:mm` format.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Timelike};

use crate::error::TimelineError;

/// Milliseconds in one half-hour slot.
pub const HALF_HOUR_MILLIS: i64 = 30 * 60 * 1000;

/// Milliseconds in one hour.
pub const HOUR_MILLIS: i64 = 2 * HALF_HOUR_MILLIS;

const LABEL_FORMAT: &str = "%H:%M";
const INVALID_LABEL: &str = "--:--";

/// An instant in milliseconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the epoch.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw milliseconds since the epoch.
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Current wall-clock instant.
    pub fn now() -> Self {
        Self::from_local(&Local::now())
    }

    /// Converts a zoned date-time, keeping millisecond precision.
    pub fn from_local<Tz: TimeZone>(date_time: &DateTime<Tz>) -> Self {
        Self(date_time.timestamp_millis())
    }

    /// Returns the instant shifted by `slots` half-hours.
    pub fn offset_slots(self, slots: i32) -> Self {
        Self(self.0.saturating_add(i64::from(slots) * HALF_HOUR_MILLIS))
    }

    /// Returns the local-time view of this instant.
    pub fn to_local(self) -> Result<DateTime<Local>, TimelineError> {
        self.in_zone(&Local)
    }

    /// Returns the view of this instant in `zone`.
    pub fn in_zone<Tz: TimeZone>(self, zone: &Tz) -> Result<DateTime<Tz>, TimelineError> {
        zone.timestamp_millis_opt(self.0)
            .single()
            .ok_or(TimelineError::InstantOutOfRange(self.0))
    }

    /// Whether the local wall-clock minute is zero.
    pub fn is_on_the_hour(self) -> bool {
        self.to_local().is_ok_and(|local| local.minute() == 0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time(*self))
    }
}

/// Formats an instant as a zero-padded 24-hour `HH:mm` label in local time.
///
/// Instants that cannot be represented locally format as `--:--`.
pub fn format_time(timestamp: Timestamp) -> String {
    match timestamp.to_local() {
        Ok(local) => local.format(LABEL_FORMAT).to_string(),
        Err(_) => INVALID_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;

    fn local_millis(hour: u32, minute: u32) -> Timestamp {
        let date_time = Local
            .with_ymd_and_hms(2024, 6, 12, hour, minute, 0)
            .single()
            .expect("mid-June wall-clock times are unambiguous");
        Timestamp::from_local(&date_time)
    }

    #[test]
    fn labels_are_zero_padded_24_hour() {
        assert_eq!(format_time(local_millis(7, 5)), "07:05");
        assert_eq!(format_time(local_millis(23, 30)), "23:30");
        assert_eq!(format_time(local_millis(0, 0)), "00:00");
    }

    #[test]
    fn unrepresentable_instants_get_placeholder_label() {
        assert_eq!(format_time(Timestamp(i64::MAX)), "--:--");
        assert!(matches!(
            Timestamp(i64::MAX).to_local(),
            Err(TimelineError::InstantOutOfRange(_))
        ));
    }

    #[test]
    fn offset_slots_moves_by_half_hours() {
        let base = local_millis(10, 0);
        assert_eq!(base.offset_slots(1).as_millis() - base.as_millis(), HALF_HOUR_MILLIS);
        assert_eq!(base.offset_slots(-23), Timestamp(base.0 - 23 * HALF_HOUR_MILLIS));
    }

    #[test]
    fn on_the_hour_detection() {
        assert!(local_millis(12, 0).is_on_the_hour());
        assert!(!local_millis(12, 30).is_on_the_hour());
    }
}
