use crate::core::scheduler::Deferred;
use crate::domain::report::DrillOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Runs a unit of work once, after a delay, and hands its result to a [`Deferred`].
pub trait Scheduler: Send + Sync {
    fn schedule<T, F>(&self, delay: Duration, work: F) -> Deferred<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static;
}

/// Persists run artifacts; `write_file` returns the location written.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[async_trait]
pub trait Drill: Send + Sync {
    fn name(&self) -> &str;

    /// Number of scenarios this drill will run.
    fn planned(&self) -> usize;

    async fn run(&self) -> Result<Vec<DrillOutcome>>;
}
