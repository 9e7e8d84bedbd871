//! Interval helpers
//!
//! Compute how long to wait from a reference timestamp until a time of day
//! occurs. The `_in` variants resolve local wall times in an explicit zone;
//! the others use the host zone.

use chrono::{Duration, Local, TimeZone};

use crate::Timestamp;

/// Interval from `now` until `time_of_day` on the calendar day after `now`
///
/// Both ends are converted to absolute instants before subtracting, so a DST
/// transition between them changes the result by the shifted amount.
pub fn calculate_interval_for_same_time_next_day(
    now: Timestamp,
    time_of_day: Timestamp,
) -> Duration {
    calculate_interval_for_same_time_next_day_in(now, time_of_day, &Local)
}

pub fn calculate_interval_for_same_time_next_day_in<Tz: TimeZone>(
    now: Timestamp,
    time_of_day: Timestamp,
    zone: &Tz,
) -> Duration {
    let tomorrow = (now + Duration::days(1)).date();
    let target = Timestamp::new(
        tomorrow.and_time(time_of_day.time_millis()),
        time_of_day.disposition(),
    );

    target.instant_in(zone) - now.instant_in(zone)
}

/// Interval from `now` until the next occurrence of `time_of_day`
///
/// When today's occurrence (hour, minute and second only) is still ahead of
/// `now`, the naive wall-clock difference is returned. Otherwise this falls
/// back to [`calculate_interval_for_same_time_next_day`].
pub fn calculate_interval_for_same_time(now: Timestamp, time_of_day: Timestamp) -> Duration {
    calculate_interval_for_same_time_in(now, time_of_day, &Local)
}

pub fn calculate_interval_for_same_time_in<Tz: TimeZone>(
    now: Timestamp,
    time_of_day: Timestamp,
    zone: &Tz,
) -> Duration {
    let today = now.date().and_hms_opt(
        time_of_day.hour(),
        time_of_day.minute(),
        time_of_day.second(),
    );

    match today {
        Some(today) if today > now.wall() => today - now.wall(),
        _ => calculate_interval_for_same_time_next_day_in(now, time_of_day, zone),
    }
}

/// Interval from `now` until `time_of_day` is strictly in the future
///
/// An exact match never yields zero: the next day's occurrence is used
/// instead. Both the same-day and next-day paths measure real elapsed time,
/// and today's occurrence only counts when that elapsed time is positive.
pub fn calculate_interval_until(now: Timestamp, time_of_day: Timestamp) -> Duration {
    calculate_interval_until_in(now, time_of_day, &Local)
}

pub fn calculate_interval_until_in<Tz: TimeZone>(
    now: Timestamp,
    time_of_day: Timestamp,
    zone: &Tz,
) -> Duration {
    let today = Timestamp::new(
        now.date().and_time(time_of_day.time_millis()),
        time_of_day.disposition(),
    );

    let until_today = today.instant_in(zone) - now.instant_in(zone);
    if until_today > Duration::zero() {
        until_today
    } else {
        calculate_interval_for_same_time_next_day_in(now, time_of_day, zone)
    }
}
