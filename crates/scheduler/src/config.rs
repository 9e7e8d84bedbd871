use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tempo_core::{Disposition, Timestamp, try_convert_to_time_of_day_with};
use thiserror::Error;

use crate::zone::ZoneSpec;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid start time: {0} (expected HH:MM, HH:MM:SS or HH:MM:SS.fff)")]
    InvalidStartTime(String),
    #[error("Invalid time zone: {0} (expected local, utc or an IANA name)")]
    InvalidTimeZone(String),
}

/// Configuration for a single daily job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyJobConfig {
    /// Label for the job's log messages
    #[serde(default = "default_name")]
    pub name: String,
    /// Time of day the job runs at, e.g. `"04:15:00"`
    pub start_time: String,
    /// Zone the start time is read in. Defaults to the host zone.
    #[serde(default)]
    pub time_zone: Option<String>,
}

fn default_name() -> String {
    "daily-job".to_string()
}

impl DailyJobConfig {
    /// The configured zone
    pub fn zone(&self) -> Result<ZoneSpec, ConfigError> {
        ZoneSpec::parse(self.time_zone.as_deref())
    }

    /// The configured start time as a time of day
    ///
    /// The disposition is UTC when the zone is UTC and local otherwise.
    pub fn start_time_of_day(&self) -> Result<Timestamp, ConfigError> {
        let invalid = || ConfigError::InvalidStartTime(self.start_time.clone());
        let trimmed = self.start_time.trim();
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| invalid())?;

        let disposition = match self.zone()? {
            ZoneSpec::Utc => Disposition::Utc,
            ZoneSpec::Local | ZoneSpec::Named(_) => Disposition::Local,
        };
        let since_midnight = time.signed_duration_since(NaiveTime::default());

        try_convert_to_time_of_day_with(since_midnight, disposition).ok_or_else(invalid)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.zone()?;
        self.start_time_of_day()?;
        Ok(())
    }
}

/// Load a daily job configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DailyJobConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load a daily job configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<DailyJobConfig, ConfigError> {
    let config: DailyJobConfig = serde_json::from_str(json)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_config() {
        let config = load_config_from_str(r#"{ "start_time": "04:15:00" }"#).unwrap();

        assert_eq!(config.name, "daily-job");
        assert_eq!(config.zone().unwrap(), ZoneSpec::Local);

        let start = config.start_time_of_day().unwrap();
        assert_eq!((start.hour(), start.minute(), start.second()), (4, 15, 0));
        assert_eq!(start.disposition(), Disposition::Local);
    }

    #[test]
    fn test_utc_zone_gives_utc_start_time() {
        let config = load_config_from_str(
            r#"{ "name": "cleanup", "start_time": "23:30", "time_zone": "utc" }"#,
        )
        .unwrap();

        let start = config.start_time_of_day().unwrap();
        assert_eq!((start.hour(), start.minute()), (23, 30));
        assert_eq!(start.disposition(), Disposition::Utc);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fractional_seconds() {
        let config = DailyJobConfig {
            name: "precise".to_string(),
            start_time: "04:15:00.250".to_string(),
            time_zone: Some("Europe/Berlin".to_string()),
        };

        let start = config.start_time_of_day().unwrap();
        assert_eq!(start.millisecond(), 250);
    }

    #[test]
    fn test_invalid_values() {
        let bad_time = DailyJobConfig {
            name: "bad".to_string(),
            start_time: "25:00".to_string(),
            time_zone: None,
        };
        assert!(matches!(
            bad_time.validate(),
            Err(ConfigError::InvalidStartTime(_))
        ));

        let bad_zone = DailyJobConfig {
            start_time: "04:15".to_string(),
            time_zone: Some("Nowhere/Special".to_string()),
            ..bad_time
        };
        assert!(matches!(
            bad_zone.validate(),
            Err(ConfigError::InvalidTimeZone(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_config_from_str("{ not json"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
