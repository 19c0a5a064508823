//! Process lifecycle.
//!
//! Startup is main's job (config, bind, serve); this module owns the
//! shutdown side: a broadcast trigger the server and tests use to stop
//! serving without killing the process.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Hand out receivers via [`subscribe`](Self::subscribe); fire once via
/// [`trigger`](Self::trigger).
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver that resolves when [`trigger`](Self::trigger) fires.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. Safe to call with no subscribers.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
