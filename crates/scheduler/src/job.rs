use async_trait::async_trait;

/// Work executed by a [`DailyJob`](crate::DailyJob)
#[async_trait]
pub trait Job: Send + Sync + 'static {
    /// Run the job once
    async fn execute(&self);

    /// Job name for logging
    fn name(&self) -> &str {
        "Job"
    }
}
