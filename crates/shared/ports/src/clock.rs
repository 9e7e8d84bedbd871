use std::sync::Arc;

use tempo_core::Timestamp;

/// Port for time abstraction
///
/// This allows the system to use different time sources:
/// - Host local time or UTC for production
/// - Fixed, advanced or scripted time for deterministic tests
///
/// Calling code depends on this trait only and never reads the host clock
/// itself.
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
