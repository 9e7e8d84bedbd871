//! Tempo Ports
//!
//! Port definitions (traits) for Tempo.
//! These define the boundaries between calling code and time sources.

mod clock;
mod error;

pub use clock::Clock;
pub use error::{ClockError, ClockResult};
