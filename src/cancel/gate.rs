//! One-shot cancellation gate.

use std::sync::Arc;

use crate::cancel::context::CancelContext;

/// A closeable one-shot gate communicating "stop waiting" to a call in
/// flight. A thin wrapper over a deadline-less [`CancelContext`]; the
/// caller wires its own timer (or any other event) to [`close`](Self::close).
///
/// Closing an already-closed gate is a guarded no-op.
#[derive(Clone)]
pub struct CancelGate {
    ctx: Arc<CancelContext>,
}

impl CancelGate {
    pub fn new() -> Self {
        Self {
            ctx: Arc::new(CancelContext::new()),
        }
    }

    /// Close the gate. Idempotent.
    pub fn close(&self) {
        self.ctx.cancel();
    }

    /// Whether the gate has been closed.
    pub fn is_closed(&self) -> bool {
        self.ctx.is_cancelled()
    }

    /// The context consumed by the executor's waiting logic.
    pub fn context(&self) -> &CancelContext {
        &self.ctx
    }
}

impl Default for CancelGate {
    fn default() -> Self {
        Self::new()
    }
}
