//! Shutdown coordination for the gateway.

use tokio::sync::broadcast;

/// Broadcast handle that every long-running task (server, metrics, CLI loops)
/// subscribes to before it starts.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Wake all subscribers. A trigger with no subscribers is dropped.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve when `rx` observes a trigger, or when every sender is gone.
pub async fn notified(mut rx: broadcast::Receiver<()>) {
    // Lagged means a trigger was sent and overwritten; treat it as a trigger.
    let _ = rx.recv().await;
}
