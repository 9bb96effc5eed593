use crate::core::scheduler::{Deferred, TokioScheduler};
use crate::core::Scheduler;
use crate::utils::error::DrillError;
use std::time::Duration;

/// Fixed wait before a successful square becomes observable.
pub const SQUARE_DELAY: Duration = Duration::from_millis(1000);

/// Squares non-negative numbers after [`SQUARE_DELAY`]; rejects negatives
/// immediately.
#[derive(Debug, Clone, Default)]
pub struct DelayedSquare<S: Scheduler> {
    scheduler: S,
}

impl<S: Scheduler> DelayedSquare<S> {
    pub fn new(scheduler: S) -> Self {
        Self { scheduler }
    }

    /// Returns right away. `n >= 0` settles with `n * n` once the delay has
    /// elapsed; anything else (negatives and NaN) is already settled with
    /// [`DrillError::NegativeInput`].
    pub fn compute(&self, n: f64) -> Deferred<f64> {
        if n >= 0.0 {
            tracing::debug!("Squaring {} in {:?}", n, SQUARE_DELAY);
            self.scheduler.schedule(SQUARE_DELAY, move || Ok(n * n))
        } else {
            tracing::debug!("Rejecting {}: negative input", n);
            Deferred::settled(Err(DrillError::NegativeInput))
        }
    }
}

/// [`DelayedSquare::compute`] on the tokio scheduler. Must be called within a
/// tokio runtime.
pub fn compute_delayed_square(n: f64) -> Deferred<f64> {
    DelayedSquare::new(TokioScheduler::new()).compute(n)
}
