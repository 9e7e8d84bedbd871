//! Time-of-day values
//!
//! A time of day is a [`Timestamp`] pinned to 0001-01-01. Only the hour,
//! minute, second, millisecond and disposition carry meaning.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::{Disposition, Timestamp};

const SECONDS_PER_DAY: i64 = 86_400;
const NANOS_PER_MILLI: u32 = 1_000_000;

const SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(date) => date,
    None => panic!("0001-01-01 is within chrono's date range"),
};

/// The date every time-of-day value is pinned to (0001-01-01)
pub fn sentinel_date() -> NaiveDate {
    SENTINEL_DATE
}

impl Timestamp {
    /// A time of day on the sentinel date
    pub fn time_of_day(time: NaiveTime, disposition: Disposition) -> Self {
        Self::new(sentinel_date().and_time(time), disposition)
    }

    /// Build a time of day from clock fields, `None` if any field is out of range
    pub fn from_hms_milli(
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
        disposition: Disposition,
    ) -> Option<Self> {
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond)?;
        Some(Self::time_of_day(time, disposition))
    }

    /// Wall-clock time truncated to millisecond precision
    pub(crate) fn time_millis(&self) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(
            self.hour(),
            self.minute(),
            self.second(),
            self.millisecond(),
        )
        .unwrap_or_else(|| self.time())
    }
}

/// Convert a span into a local time of day
///
/// See [`try_convert_to_time_of_day_with`].
pub fn try_convert_to_time_of_day(span: Duration) -> Option<Timestamp> {
    try_convert_to_time_of_day_with(span, Disposition::Local)
}

/// Convert a span into a UTC time of day
///
/// See [`try_convert_to_time_of_day_with`].
pub fn try_convert_to_utc_time_of_day(span: Duration) -> Option<Timestamp> {
    try_convert_to_time_of_day_with(span, Disposition::Utc)
}

/// Convert a span into a time of day with the given disposition
///
/// The hour, minute, second and millisecond components of `span` are
/// extracted. Whole days are ignored. Returns `None` for negative spans.
/// Sub-millisecond precision is dropped.
pub fn try_convert_to_time_of_day_with(
    span: Duration,
    disposition: Disposition,
) -> Option<Timestamp> {
    if span < Duration::zero() {
        return None;
    }

    let seconds_of_day = u32::try_from(span.num_seconds() % SECONDS_PER_DAY).ok()?;
    let millis = u32::try_from(span.subsec_nanos()).ok()? / NANOS_PER_MILLI;
    let time =
        NaiveTime::from_num_seconds_from_midnight_opt(seconds_of_day, millis * NANOS_PER_MILLI)?;

    Some(Timestamp::time_of_day(time, disposition))
}
