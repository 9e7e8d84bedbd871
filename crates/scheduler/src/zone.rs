use chrono::{Local, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;
use tempo_core::{
    Duration, Timestamp, calculate_interval_for_same_time_next_day_in,
    calculate_interval_until_in,
};

use crate::config::ConfigError;

/// Time zone used to resolve local wall-clock times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneSpec {
    /// Host time zone
    #[default]
    Local,
    /// UTC, local wall times are read as UTC
    Utc,
    /// IANA time zone, e.g. `Europe/Berlin`
    Named(Tz),
}

impl ZoneSpec {
    /// Parse an optional zone name
    ///
    /// Absent, empty, `local` or `current` select the host zone, `utc` selects
    /// UTC, anything else must be an IANA name.
    pub fn parse(name: Option<&str>) -> Result<Self, ConfigError> {
        let Some(name) = name else {
            return Ok(ZoneSpec::Local);
        };
        let trimmed = name.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("local")
            || trimmed.eq_ignore_ascii_case("current")
        {
            return Ok(ZoneSpec::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") {
            return Ok(ZoneSpec::Utc);
        }
        let tz: Tz = trimmed
            .parse()
            .map_err(|_| ConfigError::InvalidTimeZone(trimmed.to_string()))?;
        Ok(ZoneSpec::Named(tz))
    }

    /// See [`tempo_core::calculate_interval_for_same_time_next_day`]
    pub fn interval_for_same_time_next_day(
        &self,
        now: Timestamp,
        time_of_day: Timestamp,
    ) -> Duration {
        match self {
            ZoneSpec::Local => {
                calculate_interval_for_same_time_next_day_in(now, time_of_day, &Local)
            }
            ZoneSpec::Utc => calculate_interval_for_same_time_next_day_in(now, time_of_day, &Utc),
            ZoneSpec::Named(tz) => {
                calculate_interval_for_same_time_next_day_in(now, time_of_day, tz)
            }
        }
    }

    /// See [`tempo_core::calculate_interval_until`]
    pub fn interval_until(&self, now: Timestamp, time_of_day: Timestamp) -> Duration {
        match self {
            ZoneSpec::Local => calculate_interval_until_in(now, time_of_day, &Local),
            ZoneSpec::Utc => calculate_interval_until_in(now, time_of_day, &Utc),
            ZoneSpec::Named(tz) => calculate_interval_until_in(now, time_of_day, tz),
        }
    }
}

impl FromStr for ZoneSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

impl fmt::Display for ZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneSpec::Local => write!(f, "local"),
            ZoneSpec::Utc => write!(f, "UTC"),
            ZoneSpec::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}
