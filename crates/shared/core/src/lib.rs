//! Tempo Core
//!
//! Time values and interval arithmetic shared by every Tempo crate.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod interval;
pub mod time_of_day;
pub mod timestamp;

// Re-export commonly used items at crate root
pub use interval::{
    calculate_interval_for_same_time, calculate_interval_for_same_time_in,
    calculate_interval_for_same_time_next_day, calculate_interval_for_same_time_next_day_in,
    calculate_interval_until, calculate_interval_until_in,
};
pub use time_of_day::{
    sentinel_date, try_convert_to_time_of_day, try_convert_to_time_of_day_with,
    try_convert_to_utc_time_of_day,
};
pub use timestamp::{Disposition, Timestamp};

/// Signed span of time
pub type Duration = chrono::Duration;
