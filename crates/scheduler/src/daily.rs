use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use tempo_core::{Duration, Timestamp};
use tempo_ports::{Clock, ClockError, ClockResult};
use tokio::task::JoinHandle;

use crate::config::{ConfigError, DailyJobConfig};
use crate::job::Job;
use crate::zone::ZoneSpec;

/// Runs a [`Job`] at the same time every day
///
/// [`DailyJob::start`] arms a one-shot timer for the next day's occurrence of
/// the start time. When it fires the job executes and the timer is armed
/// again from a fresh clock reading. The first execution is on the day after
/// `start` is called.
///
/// Starting requires a tokio runtime. Dropping the job stops it.
pub struct DailyJob {
    name: String,
    schedule: Arc<Schedule>,
    job: Arc<dyn Job>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

/// When the job runs and where "now" comes from
struct Schedule {
    start_time: Timestamp,
    zone: ZoneSpec,
    clock: Arc<dyn Clock>,
}

impl Schedule {
    fn next_interval(&self) -> std::time::Duration {
        let now = self.clock.now();
        let interval = self
            .zone
            .interval_for_same_time_next_day(now, self.start_time);

        interval.to_std().unwrap_or_else(|_| {
            warn!(
                "Negative interval {} from {} to start time {}, firing immediately",
                interval, now, self.start_time
            );
            std::time::Duration::ZERO
        })
    }
}

impl DailyJob {
    pub fn builder() -> DailyJobBuilder {
        DailyJobBuilder::default()
    }

    /// Label used in log messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time of day the job runs at
    pub fn start_time(&self) -> Timestamp {
        self.schedule.start_time
    }

    pub fn zone(&self) -> ZoneSpec {
        self.schedule.zone
    }

    /// How long from the clock's current time until the next run
    pub fn next_interval(&self) -> Duration {
        self.schedule
            .zone
            .interval_for_same_time_next_day(self.schedule.clock.now(), self.schedule.start_time)
    }

    /// Arm the timer, replacing any timer that is already armed
    pub fn start(&self) {
        let mut timer = self.timer.lock();
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        let name = self.name.clone();
        let schedule = self.schedule.clone();
        let job = self.job.clone();
        let first = schedule.next_interval();
        info!(
            "Daily job '{}' started, first run in {:?} (start time {}, zone {})",
            name,
            first,
            schedule.start_time,
            schedule.zone
        );

        *timer = Some(tokio::spawn(async move {
            let mut interval = first;
            loop {
                tokio::time::sleep(interval).await;
                debug!("Daily job '{}' executing", name);
                job.execute().await;
                interval = schedule.next_interval();
                debug!("Daily job '{}' re-armed for {:?}", name, interval);
            }
        }));
    }

    /// Disarm the timer. Does nothing if the job is not running.
    pub fn stop(&self) {
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
            info!("Daily job '{}' stopped", self.name);
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Execute the job immediately, independent of the timer
    pub async fn execute(&self) {
        self.job.execute().await;
    }
}

impl Drop for DailyJob {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().take() {
            handle.abort();
        }
    }
}

/// Builder for [`DailyJob`]
#[derive(Default)]
pub struct DailyJobBuilder {
    name: Option<String>,
    start_time: Option<Timestamp>,
    zone: ZoneSpec,
    clock: Option<Arc<dyn Clock>>,
    job: Option<Arc<dyn Job>>,
}

impl DailyJobBuilder {
    /// Builder with name, start time and zone taken from `config`
    pub fn from_config(config: &DailyJobConfig) -> Result<Self, ConfigError> {
        Ok(Self::default()
            .name(config.name.clone())
            .start_time(config.start_time_of_day()?)
            .zone(config.zone()?))
    }

    /// Label for log messages. Defaults to the job's own name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Time of day to run at. The date part is ignored.
    pub fn start_time(mut self, start_time: Timestamp) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn zone(mut self, zone: ZoneSpec) -> Self {
        self.zone = zone;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn job(mut self, job: Arc<dyn Job>) -> Self {
        self.job = Some(job);
        self
    }

    /// Fails with [`ClockError::NullArgument`] when the start time, clock or
    /// job was not supplied
    pub fn build(self) -> ClockResult<DailyJob> {
        let start_time = self
            .start_time
            .ok_or(ClockError::NullArgument("start_time"))?;
        let clock = self.clock.ok_or(ClockError::NullArgument("clock"))?;
        let job = self.job.ok_or(ClockError::NullArgument("job"))?;
        let name = self.name.unwrap_or_else(|| job.name().to_string());

        Ok(DailyJob {
            name,
            schedule: Arc::new(Schedule {
                start_time,
                zone: self.zone,
                clock,
            }),
            job,
            timer: Mutex::new(None),
        })
    }
}
