//! Observer notifications
//!
//! State transitions are published over a broadcast channel so the UI layer
//! (or any other observer) re-renders from a fresh read instead of mutating
//! displayed state in place. Per item id, `InstallStarted` is always observed
//! before its `InstallFinished`, which precedes the `CatalogChanged` it
//! triggers. No ordering holds across different ids.

use tokio::sync::broadcast;

use crate::types::ItemId;

/// Default channel capacity; lagging observers lose the oldest events.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The catalog was replaced or an item's install state changed.
    CatalogChanged,
    /// An install job was accepted for this id.
    InstallStarted(ItemId),
    /// An install job completed. `success` is false for a nonzero exit,
    /// a launch failure, or a missing retrieval tool.
    InstallFinished { id: ItemId, success: bool },
    /// A normalized local-resource reference for the external renderer.
    LaunchRequested(String),
}

/// Cloneable sender side of the notification channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Notification>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Synchronously publish a notification. Having no subscribers is not an
    /// error.
    pub fn emit(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_all_subscribers() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.emit(Notification::CatalogChanged);

        assert_eq!(a.recv().await.unwrap(), Notification::CatalogChanged);
        assert_eq!(b.recv().await.unwrap(), Notification::CatalogChanged);
    }

    #[test]
    fn test_emit_without_subscribers_is_ok() {
        let bus = EventBus::default();
        bus.emit(Notification::InstallStarted(ItemId::new("a")));
    }
}
