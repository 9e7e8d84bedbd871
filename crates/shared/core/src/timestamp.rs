use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Reference frame of a wall-clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Disposition {
    /// Wall-clock time of the local time zone
    Local,
    /// Coordinated Universal Time
    Utc,
    /// No frame recorded. Converted as if it were local time.
    #[default]
    Unspecified,
}

/// A wall-clock reading tagged with its [`Disposition`]
///
/// Arithmetic works on the wall-clock value: adding a [`Duration`] keeps the
/// disposition, and subtracting two timestamps yields their naive difference.
/// Use [`Timestamp::to_utc`] (or [`Timestamp::to_utc_in`]) before subtracting
/// when the real elapsed time across a DST transition matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    wall: NaiveDateTime,
    disposition: Disposition,
}

impl Timestamp {
    pub fn new(wall: NaiveDateTime, disposition: Disposition) -> Self {
        Self { wall, disposition }
    }

    pub fn local(wall: NaiveDateTime) -> Self {
        Self::new(wall, Disposition::Local)
    }

    pub fn utc(wall: NaiveDateTime) -> Self {
        Self::new(wall, Disposition::Utc)
    }

    pub fn unspecified(wall: NaiveDateTime) -> Self {
        Self::new(wall, Disposition::Unspecified)
    }

    /// Build a timestamp from calendar fields, `None` if any field is out of range
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        disposition: Disposition,
    ) -> Option<Self> {
        let wall = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
        Some(Self::new(wall, disposition))
    }

    /// Current wall-clock time of the host zone
    pub fn now_local() -> Self {
        Self::local(Local::now().naive_local())
    }

    /// Current UTC time
    pub fn now_utc() -> Self {
        Self::utc(Utc::now().naive_utc())
    }

    pub fn wall(&self) -> NaiveDateTime {
        self.wall
    }

    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    pub fn date(&self) -> NaiveDate {
        self.wall.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.wall.time()
    }

    pub fn hour(&self) -> u32 {
        self.wall.hour()
    }

    pub fn minute(&self) -> u32 {
        self.wall.minute()
    }

    pub fn second(&self) -> u32 {
        self.wall.second()
    }

    pub fn millisecond(&self) -> u32 {
        self.wall.nanosecond() / 1_000_000
    }

    /// Same wall-clock value under another disposition
    pub fn with_disposition(self, disposition: Disposition) -> Self {
        Self::new(self.wall, disposition)
    }

    /// Absolute instant of this reading, resolving local wall time in the host zone
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant_in(&Local)
    }

    /// Absolute instant of this reading, resolving local wall time in `zone`
    ///
    /// Wall times repeated by a fall-back transition resolve to standard time
    /// (the later instant). Wall times skipped by a spring-forward transition
    /// are shifted with the offset in effect before the gap.
    pub fn instant_in<Tz: TimeZone>(&self, zone: &Tz) -> DateTime<Utc> {
        match self.disposition {
            Disposition::Utc => Utc.from_utc_datetime(&self.wall),
            Disposition::Local | Disposition::Unspecified => resolve_local(self.wall, zone),
        }
    }

    /// Convert to a UTC-disposition timestamp for the same instant (host zone)
    pub fn to_utc(&self) -> Timestamp {
        self.to_utc_in(&Local)
    }

    /// Convert to a UTC-disposition timestamp for the same instant, with local
    /// wall time interpreted in `zone`
    pub fn to_utc_in<Tz: TimeZone>(&self, zone: &Tz) -> Timestamp {
        Timestamp::from(self.instant_in(zone))
    }
}

fn resolve_local<Tz: TimeZone>(wall: NaiveDateTime, zone: &Tz) -> DateTime<Utc> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(resolved) => resolved.with_timezone(&Utc),
        LocalResult::Ambiguous(_, standard) => standard.with_timezone(&Utc),
        LocalResult::None => {
            let before_gap = zone
                .offset_from_utc_datetime(&(wall - Duration::days(1)))
                .fix();
            let shifted = wall - Duration::seconds(i64::from(before_gap.local_minus_utc()));
            Utc.from_utc_datetime(&shifted)
        }
    }
}

impl Default for Timestamp {
    /// Midnight of 0001-01-01, unspecified
    fn default() -> Self {
        Self::unspecified(crate::time_of_day::sentinel_date().and_time(NaiveTime::default()))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::utc(value.naive_utc())
    }
}

impl From<DateTime<Local>> for Timestamp {
    fn from(value: DateTime<Local>) -> Self {
        Self::local(value.naive_local())
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp::new(self.wall + rhs, self.disposition)
    }
}

impl AddAssign<Duration> for Timestamp {
    fn add_assign(&mut self, rhs: Duration) {
        self.wall += rhs;
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Duration) -> Timestamp {
        Timestamp::new(self.wall - rhs, self.disposition)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Timestamp) -> Duration {
        self.wall - rhs.wall
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wall.format("%Y-%m-%dT%H:%M:%S%.3f"))?;
        match self.disposition {
            Disposition::Utc => write!(f, "Z"),
            Disposition::Local => write!(f, " (local)"),
            Disposition::Unspecified => Ok(()),
        }
    }
}
