//! Resolution of an arbitrary instant into the selected half-hour slot.
//!
//! ## Usage
//!
//! `set_date` style callers want a sensible default for a day, `bind_time`
//! style callers want the instant they passed, aligned to the nearest slot.
//! [`ResolveMode`] chooses between the two.

use chrono::{DateTime, Offset, TimeZone, Timelike};

use crate::{
    error::TimelineError,
    timestamp::{HALF_HOUR_MILLIS, HOUR_MILLIS, Timestamp},
};

const DEFAULT_LOOKBACK_MILLIS: i64 = 2 * HOUR_MILLIS;
const OTHER_DAY_DEFAULT_HOUR: u32 = 12;

/// How a requested instant is turned into the selected slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Pick a default slot for the requested day: noon on other days, the
    /// first full hour after "two hours ago" on today.
    #[default]
    UseDefault,
    /// Align the requested instant itself to the nearest half-hour.
    UseExact,
}

/// Resolves `requested` into a slot with zero seconds and milliseconds.
///
/// Calendar fields are read in the time zone of `now`. `requested == None`
/// stands for "nothing set yet" and resolves against `now`.
pub fn resolve_slot<Tz: TimeZone>(
    requested: Option<Timestamp>,
    mode: ResolveMode,
    now: &DateTime<Tz>,
) -> Result<Timestamp, TimelineError> {
    match mode {
        ResolveMode::UseDefault => resolve_default(requested, now),
        ResolveMode::UseExact => {
            let requested = requested.unwrap_or_else(|| Timestamp::from_local(now));
            resolve_exact(requested, &now.timezone())
        }
    }
}

fn resolve_default<Tz: TimeZone>(
    requested: Option<Timestamp>,
    now: &DateTime<Tz>,
) -> Result<Timestamp, TimelineError> {
    let zone = now.timezone();
    let today = now.date_naive();
    let chosen_day = match requested {
        Some(requested) => requested.in_zone(&zone)?.date_naive(),
        None => today,
    };

    if chosen_day != today {
        let noon = chosen_day
            .and_hms_opt(OTHER_DAY_DEFAULT_HOUR, 0, 0)
            .and_then(|naive| zone.from_local_datetime(&naive).earliest())
            .ok_or(TimelineError::NonexistentLocalTime {
                date: chosen_day,
                hour: OTHER_DAY_DEFAULT_HOUR,
                minute: 0,
            })?;
        return Ok(Timestamp::from_local(&noon));
    }

    let lookback = Timestamp(now.timestamp_millis() - DEFAULT_LOOKBACK_MILLIS);
    let hour_start = truncate_to_hour(lookback, &zone)?;
    Ok(Timestamp(hour_start.0 + HOUR_MILLIS))
}

fn resolve_exact<Tz: TimeZone>(
    requested: Timestamp,
    zone: &Tz,
) -> Result<Timestamp, TimelineError> {
    let minute = requested.in_zone(zone)?.minute();
    let hour_start = truncate_to_hour(requested, zone)?;
    let slot = match minute {
        16..=45 => hour_start.0 + HALF_HOUR_MILLIS,
        46.. => hour_start.0 + HOUR_MILLIS,
        _ => hour_start.0,
    };
    Ok(Timestamp(slot))
}

/// Drops the wall-clock minute, second and sub-second components.
fn truncate_to_hour<Tz: TimeZone>(
    timestamp: Timestamp,
    zone: &Tz,
) -> Result<Timestamp, TimelineError> {
    let local = timestamp.in_zone(zone)?;
    let into_hour = i64::from(local.minute()) * 60_000
        + i64::from(local.second()) * 1_000
        + i64::from(local.timestamp_subsec_millis());
    Ok(Timestamp(timestamp.0 - into_hour))
}

/// Aligns an instant down to the wall-clock half-hour grid of `zone`.
///
/// Used when [`resolve_slot`] fails so a slot is still produced. The zone's
/// UTC offset at that instant is honoured when it can be looked up, so zones
/// with :30 or :45 offsets still get :00 and :30 labels; otherwise the UTC
/// grid is used.
pub fn fallback_slot<Tz: TimeZone>(timestamp: Timestamp, zone: &Tz) -> Timestamp {
    let offset_millis = zone
        .timestamp_millis_opt(timestamp.0)
        .single()
        .map_or(0, |local| i64::from(local.offset().fix().local_minus_utc()) * 1_000);
    let wall = timestamp.0.saturating_add(offset_millis);
    Timestamp((wall - wall.rem_euclid(HALF_HOUR_MILLIS)).saturating_sub(offset_millis))
}
