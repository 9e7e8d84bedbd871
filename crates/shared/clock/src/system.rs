use tempo_core::Timestamp;
use tempo_ports::Clock;

/// Host clock returning local wall-clock time
///
/// The value depends on the time zone configured for the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl LocalClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for LocalClock {
    fn now(&self) -> Timestamp {
        Timestamp::now_local()
    }

    fn name(&self) -> &str {
        "LocalClock"
    }
}

/// Host clock returning UTC time
///
/// UTC is a continuous timeline with no DST switches, so this is the
/// preferred clock for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcClock;

impl UtcClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for UtcClock {
    fn now(&self) -> Timestamp {
        Timestamp::now_utc()
    }

    fn name(&self) -> &str {
        "UtcClock"
    }
}
