use chrono::Duration;
use log::{debug, trace};
use parking_lot::Mutex;
use tempo_core::Timestamp;
use tempo_ports::{Clock, ClockError, ClockResult};

/// Clock whose time is controlled by the test
///
/// Three modes:
/// - [`TestClock::new`]: frozen at the UTC time of construction
/// - [`TestClock::with_time`]: frozen at a given time
/// - [`TestClock::with_sequence`]: replays scripted times, one per read
///
/// In every mode [`TestClock::advance_time`] shifts the current time by hand.
/// Advancing does not consume scripted entries, and the next scripted entry
/// replaces whatever the current time was when it is reached.
///
/// Reads mutate the script cursor. Share one clock across threads only when
/// the interleaving of reads does not matter to the test.
#[derive(Debug)]
pub struct TestClock {
    initial_time: Timestamp,
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    current: Timestamp,
    script: Option<Script>,
}

/// Scripted times and the position of the next one to hand out
#[derive(Debug)]
struct Script {
    times: Vec<Timestamp>,
    cursor: usize,
}

impl Script {
    fn next(&mut self) -> Option<Timestamp> {
        let next = self.times.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(next)
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.times.len()
    }
}

impl TestClock {
    /// Create a clock frozen at the current UTC time
    pub fn new() -> Self {
        Self::with_time(Timestamp::now_utc())
    }

    /// Create a clock frozen at `initial_time`
    pub fn with_time(initial_time: Timestamp) -> Self {
        Self {
            initial_time,
            state: Mutex::new(State {
                current: initial_time,
                script: None,
            }),
        }
    }

    /// Create a clock that replays `times`
    ///
    /// The first entry becomes the initial time. Every read returns the
    /// current time and then moves on to the next entry; once the script runs
    /// out the last entry is returned forever.
    ///
    /// Fails with [`ClockError::InvalidArgument`] when `times` is empty.
    pub fn with_sequence(times: impl IntoIterator<Item = Timestamp>) -> ClockResult<Self> {
        let mut script = Script {
            times: times.into_iter().collect(),
            cursor: 0,
        };
        let Some(initial_time) = script.next() else {
            return Err(ClockError::InvalidArgument(
                "scripted times must contain at least one entry".to_string(),
            ));
        };

        debug!(
            "TestClock scripted with {} entries starting at {}",
            script.times.len(),
            initial_time
        );

        Ok(Self {
            initial_time,
            state: Mutex::new(State {
                current: initial_time,
                script: Some(script),
            }),
        })
    }

    /// The time this clock started at. Never changes.
    pub fn initial_time(&self) -> Timestamp {
        self.initial_time
    }

    /// Move the current time by `delta` (which may be negative)
    ///
    /// Returns `self` for chaining.
    pub fn advance_time(&self, delta: Duration) -> &Self {
        let mut state = self.state.lock();
        state.current += delta;
        trace!("TestClock advanced by {} to {}", delta, state.current);
        self
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Option<Vec<Timestamp>>> for TestClock {
    type Error = ClockError;

    /// Scripted construction where the script itself may be absent
    ///
    /// Fails with [`ClockError::NullArgument`] for `None`.
    fn try_from(times: Option<Vec<Timestamp>>) -> ClockResult<Self> {
        let times = times.ok_or(ClockError::NullArgument("times"))?;
        Self::with_sequence(times)
    }
}

impl Clock for TestClock {
    fn now(&self) -> Timestamp {
        let mut state = self.state.lock();
        let time = state.current;

        if let Some(script) = state.script.as_mut() {
            if let Some(next) = script.next() {
                trace!("TestClock moving to scripted time {}", next);
                if script.is_exhausted() {
                    debug!("TestClock script exhausted, holding at {}", next);
                }
                state.current = next;
            }
        }

        time
    }

    fn name(&self) -> &str {
        "TestClock"
    }
}
