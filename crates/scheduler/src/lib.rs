//! Tempo Scheduler
//!
//! Runs a job at the same time every day. The scheduler reads "now" from a
//! [`Clock`](tempo_ports::Clock), asks the interval helpers how long to wait
//! until the next occurrence and arms a one-shot tokio timer for that long.
//!
//! ## Usage
//!
//! ```ignore
//! use tempo_scheduler::{DailyJob, Job, ZoneSpec};
//! use tempo_clock::UtcClock;
//! use std::sync::Arc;
//!
//! let job = DailyJob::builder()
//!     .start_time(start_time)
//!     .zone(ZoneSpec::Utc)
//!     .clock(Arc::new(UtcClock::new()))
//!     .job(Arc::new(MyCleanupJob))
//!     .build()?;
//!
//! job.start();
//! ```

pub mod config;
pub mod daily;
pub mod job;
pub mod zone;

pub use config::{ConfigError, DailyJobConfig, load_config, load_config_from_str};
pub use daily::{DailyJob, DailyJobBuilder};
pub use job::Job;
pub use zone::ZoneSpec;
