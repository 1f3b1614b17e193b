//! Cancellation and deadlines for store calls
//!
//! A [`Context`] is passed to every store operation. Derived contexts inherit
//! their parent's cancel signals and deadline, and can only tighten them.

use crate::error::{RepositoryError, RepositoryResult};
use futures::future::select_all;
use std::future::{pending, Future};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

/// Request-scoped cancel signal and deadline
#[derive(Debug, Clone, Default)]
pub struct Context {
    signals: Vec<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels the context returned alongside it by [`Context::with_cancel`]
/// and every context derived from it.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    /// Context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that is also cancelled by the returned handle
    pub fn with_cancel(&self) -> (Context, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let mut ctx = self.clone();
        ctx.signals.push(receiver);
        (
            ctx,
            CancelHandle {
                sender: Arc::new(sender),
            },
        )
    }

    /// Derive a context whose deadline is at most `timeout` from now
    pub fn with_timeout(&self, timeout: Duration) -> Context {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a context whose deadline is at most `deadline`
    pub fn with_deadline(&self, deadline: Instant) -> Context {
        let mut ctx = self.clone();
        ctx.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        ctx
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.signals.iter().any(|signal| *signal.borrow())
    }

    /// Why this context is done, or `None` while it is still live
    pub fn err(&self) -> Option<RepositoryError> {
        if self.is_cancelled() {
            Some(RepositoryError::Cancelled)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(RepositoryError::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Drive `work` until it completes, the context is cancelled, or the
    /// deadline passes. In-flight work is dropped on cancellation.
    pub async fn run<T, F>(&self, work: F) -> RepositoryResult<T>
    where
        F: Future<Output = RepositoryResult<T>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancelled() => {
                tracing::debug!("store call cancelled");
                Err(RepositoryError::Cancelled)
            }
            _ = deadline => {
                tracing::debug!("store call exceeded its deadline");
                Err(RepositoryError::DeadlineExceeded)
            }
            result = work => result,
        }
    }

    /// Resolves once any cancel signal fires
    async fn cancelled(&self) {
        if self.signals.is_empty() {
            return pending().await;
        }
        let waits = self.signals.iter().cloned().map(|mut signal| {
            Box::pin(async move {
                let fired = signal.wait_for(|cancelled| *cancelled).await.is_ok();
                // A dropped handle that never cancelled never fires
                if !fired {
                    pending::<()>().await;
                }
            })
        });
        select_all(waits).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_runs_to_completion() {
        let ctx = Context::background();
        let result = ctx.run(async { Ok(7) }).await.unwrap();
        assert_eq!(result, 7);
        assert!(ctx.err().is_none());
    }

    #[tokio::test]
    async fn test_cancel_before_run() {
        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();
        assert!(ctx.is_cancelled());
        let err = ctx.run(async { Ok(()) }).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_in_flight_work() {
        let (ctx, handle) = Context::background().with_cancel();
        let task = tokio::spawn(async move {
            ctx.run(async {
                pending::<()>().await;
                Ok(())
            })
            .await
        });
        tokio::task::yield_now().await;
        handle.cancel();
        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, RepositoryError::Cancelled));
    }

    #[tokio::test]
    async fn test_parent_cancel_reaches_child() {
        let (parent, handle) = Context::background().with_cancel();
        let (child, _child_handle) = parent.with_cancel();
        handle.cancel();
        assert!(child.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (ctx, handle) = Context::background().with_cancel();
        drop(handle);
        let result = ctx
            .with_timeout(Duration::from_millis(20))
            .run(async { Ok(1) })
            .await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_secs(1));
        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::DeadlineExceeded));
    }

    #[test]
    fn test_deadline_only_tightens() {
        let now = Instant::now();
        let ctx = Context::background().with_deadline(now + Duration::from_secs(1));
        let child = ctx.with_deadline(now + Duration::from_secs(10));
        assert_eq!(child.deadline(), Some(now + Duration::from_secs(1)));
    }
}
