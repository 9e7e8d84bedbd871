//! Daily job integration tests
//!
//! Time is paused so the runtime jumps straight to the next timer deadline.

use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;
use tempo_clock::{Clock, ClockError, TestClock};
use tempo_core::{Disposition, Duration, Timestamp};
use tempo_scheduler::{DailyJob, DailyJobBuilder, Job, ZoneSpec, load_config};

#[derive(Default)]
struct CountingJob {
    runs: AtomicUsize,
}

impl CountingJob {
    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Job for CountingJob {
    async fn execute(&self) {
        self.runs.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
    Timestamp::from_ymd_hms(y, mo, d, h, mi, s, Disposition::Utc).unwrap()
}

fn utc_start_time() -> Timestamp {
    Timestamp::from_hms_milli(4, 15, 0, 0, Disposition::Utc).unwrap()
}

fn build(clock: Arc<dyn Clock>, job: Arc<CountingJob>) -> DailyJob {
    DailyJob::builder()
        .start_time(utc_start_time())
        .zone(ZoneSpec::Utc)
        .clock(clock)
        .job(job)
        .build()
        .unwrap()
}

fn hours(h: u64) -> StdDuration {
    StdDuration::from_secs(h * 3600)
}

#[tokio::test(start_paused = true)]
async fn test_first_run_is_on_next_day() {
    let _ = env_logger::try_init();

    let clock = Arc::new(TestClock::with_time(utc(2021, 5, 30, 4, 14, 59)));
    let job = Arc::new(CountingJob::default());
    let daily = build(clock, job.clone());

    // 04:15 today is one second away, but the job waits for tomorrow
    daily.start();
    assert!(daily.is_running());

    tokio::time::sleep(hours(24)).await;
    assert_eq!(job.runs(), 0);

    tokio::time::sleep(StdDuration::from_secs(2)).await;
    assert_eq!(job.runs(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rearms_from_fresh_clock_reading() {
    let first = utc(2021, 5, 30, 4, 14, 59);
    let second = utc(2021, 5, 31, 4, 15, 0);
    let clock = Arc::new(TestClock::with_sequence([first, second]).unwrap());
    let job = Arc::new(CountingJob::default());
    let daily = build(clock, job.clone());

    daily.start();

    // First interval: 24h + 1s from the first reading
    tokio::time::sleep(hours(24) + StdDuration::from_millis(1500)).await;
    assert_eq!(job.runs(), 1);

    // Second interval: exactly 24h from the second reading
    tokio::time::sleep(hours(24)).await;
    assert_eq!(job.runs(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_pending_run() {
    let clock = Arc::new(TestClock::with_time(utc(2021, 5, 30, 12, 0, 0)));
    let job = Arc::new(CountingJob::default());
    let daily = build(clock, job.clone());

    daily.start();
    daily.stop();
    assert!(!daily.is_running());

    tokio::time::sleep(hours(48)).await;
    assert_eq!(job.runs(), 0);

    // Stopping twice is harmless
    daily.stop();
}

#[tokio::test(start_paused = true)]
async fn test_restart_replaces_timer() {
    let clock = Arc::new(TestClock::with_time(utc(2021, 5, 30, 12, 0, 0)));
    let job = Arc::new(CountingJob::default());
    let daily = build(clock.clone(), job.clone());

    daily.start();
    clock.advance_time(Duration::hours(6));
    daily.start();

    // Old timer would fire after 16h15m, the new one after 10h15m
    tokio::time::sleep(hours(11)).await;
    assert_eq!(job.runs(), 1);

    tokio::time::sleep(hours(6)).await;
    assert_eq!(job.runs(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_timer() {
    let clock = Arc::new(TestClock::with_time(utc(2021, 5, 30, 12, 0, 0)));
    let job = Arc::new(CountingJob::default());

    let daily = build(clock, job.clone());
    daily.start();
    drop(daily);

    tokio::time::sleep(hours(48)).await;
    assert_eq!(job.runs(), 0);
}

#[tokio::test]
async fn test_execute_runs_immediately() {
    let clock = Arc::new(TestClock::new());
    let job = Arc::new(CountingJob::default());
    let daily = build(clock, job.clone());

    daily.execute().await;

    assert_eq!(job.runs(), 1);
    assert!(!daily.is_running());
}

#[test]
fn test_next_interval_uses_zone() {
    let now = Timestamp::from_ymd_hms(2017, 10, 28, 18, 0, 0, Disposition::Local).unwrap();
    let start = Timestamp::from_hms_milli(4, 15, 0, 0, Disposition::Local).unwrap();

    let daily = DailyJob::builder()
        .start_time(start)
        .zone(ZoneSpec::Named(chrono_tz::Europe::Berlin))
        .clock(Arc::new(TestClock::with_time(now)))
        .job(Arc::new(CountingJob::default()))
        .build()
        .unwrap();

    assert_eq!(daily.next_interval(), Duration::hours(11) + Duration::minutes(15));
    assert_eq!(daily.start_time(), start);
}

#[test]
fn test_name_defaults_to_job_name() {
    let daily = build(Arc::new(TestClock::new()), Arc::new(CountingJob::default()));
    assert_eq!(daily.name(), "counting");

    let labelled = DailyJob::builder()
        .name("cleanup")
        .start_time(utc_start_time())
        .clock(Arc::new(TestClock::new()))
        .job(Arc::new(CountingJob::default()))
        .build()
        .unwrap();
    assert_eq!(labelled.name(), "cleanup");
}

#[tokio::test(start_paused = true)]
async fn test_stop_outside_runtime_context_is_allowed() {
    let clock = Arc::new(TestClock::with_time(utc(2021, 5, 30, 12, 0, 0)));
    let job = Arc::new(CountingJob::default());
    let daily = Arc::new(build(clock, job.clone()));
    daily.start();

    // Disarming only aborts the task handle, so a plain thread can do it
    let stopper = daily.clone();
    std::thread::spawn(move || stopper.stop()).join().unwrap();
    assert!(!daily.is_running());

    tokio::time::sleep(hours(48)).await;
    assert_eq!(job.runs(), 0);
}

#[test]
fn test_builder_requires_collaborators() {
    let result = DailyJob::builder()
        .start_time(utc_start_time())
        .job(Arc::new(CountingJob::default()))
        .build();
    assert!(matches!(result, Err(ClockError::NullArgument("clock"))));

    let result = DailyJob::builder()
        .start_time(utc_start_time())
        .clock(Arc::new(TestClock::new()))
        .build();
    assert!(matches!(result, Err(ClockError::NullArgument("job"))));

    let result = DailyJob::builder()
        .clock(Arc::new(TestClock::new()))
        .job(Arc::new(CountingJob::default()))
        .build();
    assert!(matches!(result, Err(ClockError::NullArgument("start_time"))));
}

#[test]
fn test_builder_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "name": "nightly", "start_time": "04:15:00", "time_zone": "utc" }}"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let daily = DailyJobBuilder::from_config(&config)
        .unwrap()
        .clock(Arc::new(TestClock::with_time(utc(2017, 10, 4, 12, 0, 0))))
        .job(Arc::new(CountingJob::default()))
        .build()
        .unwrap();

    assert_eq!(daily.name(), "nightly");
    assert_eq!(daily.zone(), ZoneSpec::Utc);
    assert_eq!(daily.start_time(), utc_start_time());
    assert_eq!(daily.next_interval(), Duration::hours(16) + Duration::minutes(15));
}
