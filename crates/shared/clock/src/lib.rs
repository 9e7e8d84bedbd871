//! Tempo Clock Infrastructure
//!
//! Provides time sources for production and tests:
//!
//! ```text
//! Clock (port)
//!     │
//!     ├── LocalClock  (host wall-clock time, Local disposition)
//!     ├── UtcClock    (host UTC time, Utc disposition)
//!     └── TestClock   (fixed, advanced by hand, or replaying a script)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use tempo_clock::{Clock, TestClock, UtcClock};
//! use tempo_core::{Disposition, Duration, Timestamp};
//! use std::sync::Arc;
//!
//! // Production wiring
//! let clock: Arc<dyn Clock> = Arc::new(UtcClock::new());
//!
//! // Test wiring
//! let start = Timestamp::from_ymd_hms(2021, 5, 30, 11, 15, 0, Disposition::Utc).unwrap();
//! let clock = TestClock::with_sequence([start, start + Duration::days(1)])?;
//! clock.advance_time(Duration::hours(1));
//! assert_eq!(clock.now(), start + Duration::hours(1));
//! ```

mod system;
mod test_clock;

pub use system::{LocalClock, UtcClock};
pub use test_clock::TestClock;

// Re-export the Clock trait for convenience
pub use tempo_ports::{Clock, ClockError, ClockResult};
