//! Unified cancellation context: deadline, explicit cancel, derivation.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Why a context was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The deadline elapsed before completion.
    DeadlineExceeded,
    /// The context was cancelled explicitly, or released before completion.
    Canceled,
}

/// A cancellation context carrying a "done" signal, an optional deadline,
/// and the recorded cancellation reason.
///
/// The deadline is enforced by an internal timer task. Dropping the context
/// aborts that task and cancels the token, so no exit path leaks the timer
/// and derived children never wait on a dead ancestor.
pub struct CancelContext {
    token: CancellationToken,
    reason: Arc<OnceLock<CancelReason>>,
    timer: Option<JoinHandle<()>>,
}

impl CancelContext {
    /// A context with no deadline. Cancels only via [`cancel`](Self::cancel)
    /// or drop.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            reason: Arc::new(OnceLock::new()),
            timer: None,
        }
    }

    /// A context that cancels itself with [`CancelReason::DeadlineExceeded`]
    /// once `bound` has elapsed.
    pub fn with_timeout(bound: Duration) -> Self {
        let mut ctx = Self::new();
        let token = ctx.token.clone();
        let reason = ctx.reason.clone();
        ctx.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(bound).await;
            let _ = reason.set(CancelReason::DeadlineExceeded);
            token.cancel();
        }));
        ctx
    }

    /// Derive a child context: cancelled whenever this one is, independently
    /// cancellable without affecting this one. The child reports the
    /// ancestor's recorded reason.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            reason: self.reason.clone(),
            timer: None,
        }
    }

    /// Cancel explicitly, recording [`CancelReason::Canceled`]. Repeated
    /// cancels are no-ops.
    pub fn cancel(&self) {
        let _ = self.reason.set(CancelReason::Canceled);
        self.token.cancel();
    }

    /// Resolves once the context is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The recorded cancellation reason. `None` until a cause is recorded;
    /// a context released by drop records none.
    pub fn reason(&self) -> Option<CancelReason> {
        self.reason.get().copied()
    }
}

impl Default for CancelContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CancelContext {
    // The release action of every exit path: stop the timer and cancel the
    // token so derived children unblock.
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_cancel_records_canceled() {
        let ctx = CancelContext::new();
        assert!(!ctx.is_cancelled());
        assert_eq!(ctx.reason(), None);

        ctx.cancel();
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.reason(), Some(CancelReason::Canceled));
    }

    #[tokio::test]
    async fn deadline_records_deadline_exceeded() {
        let ctx = CancelContext::with_timeout(Duration::from_millis(20));
        ctx.cancelled().await;
        assert_eq!(ctx.reason(), Some(CancelReason::DeadlineExceeded));
    }

    #[tokio::test]
    async fn first_recorded_cause_wins() {
        let ctx = CancelContext::with_timeout(Duration::from_millis(20));
        ctx.cancel();
        ctx.cancelled().await;

        // The deadline fires later but cannot overwrite the recorded cause.
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(ctx.reason(), Some(CancelReason::Canceled));
    }

    #[tokio::test]
    async fn child_cancels_with_parent() {
        let parent = CancelContext::with_timeout(Duration::from_millis(20));
        let child = parent.child();

        child.cancelled().await;
        assert_eq!(child.reason(), Some(CancelReason::DeadlineExceeded));
        assert!(parent.is_cancelled());
    }

    #[tokio::test]
    async fn child_cancel_leaves_parent_running() {
        let parent = CancelContext::new();
        let child = parent.child();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn drop_releases_timer_and_cancels_children() {
        let parent = CancelContext::with_timeout(Duration::from_secs(60));
        let child = parent.child();

        drop(parent);

        // Resolves immediately, not after the 60s deadline, and without a
        // recorded cause.
        child.cancelled().await;
        assert_eq!(child.reason(), None);
    }
}
