use crate::core::Scheduler;
use crate::utils::error::{DrillError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::oneshot;

/// A result that becomes available later, exactly once.
///
/// Either already settled (no timer involved) or waiting on a scheduled
/// completion. There is no way to cancel the pending work through this
/// handle; dropping it only discards the result.
#[derive(Debug)]
pub struct Deferred<T> {
    state: State<T>,
}

#[derive(Debug)]
enum State<T> {
    Settled(Result<T>),
    Pending(oneshot::Receiver<Result<T>>),
    Done,
}

impl<T> Deferred<T> {
    /// A container that resolves on its first poll.
    pub fn settled(result: Result<T>) -> Self {
        Self {
            state: State::Settled(result),
        }
    }

    pub(crate) fn pending(receiver: oneshot::Receiver<Result<T>>) -> Self {
        Self {
            state: State::Pending(receiver),
        }
    }
}

// 不做 pin projection，內部欄位可以自由移動
impl<T> Unpin for Deferred<T> {}

impl<T> Future for Deferred<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;

        if let State::Pending(receiver) = &mut this.state {
            let result = match Pin::new(receiver).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(result)) => result,
                // 排程任務在送出結果前就被丟棄 (例如 runtime 關閉)
                Poll::Ready(Err(_)) => Err(DrillError::TaskDropped),
            };
            this.state = State::Done;
            return Poll::Ready(result);
        }

        match std::mem::replace(&mut this.state, State::Done) {
            State::Settled(result) => Poll::Ready(result),
            State::Pending(_) | State::Done => panic!("`Deferred` polled after completion"),
        }
    }
}

/// Scheduler backed by tokio timers. Every scheduled unit runs on its own task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    fn schedule<T, F>(&self, delay: Duration, work: F) -> Deferred<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();

        tracing::trace!("Scheduling work to complete in {:?}", delay);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // 接收端可能已被丟棄，此時結果無人需要
            let _ = sender.send(work());
        });

        Deferred::pending(receiver)
    }
}
