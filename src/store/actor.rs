//! Catalog store actor
//!
//! The catalog's mutable fields are written from install jobs that complete
//! concurrently, so the catalog lives in a dedicated task and everything else
//! talks to it through a cloneable [`StoreHandle`]. Install results are
//! written back by id lookup against the current catalog, never through a
//! retained reference, since the catalog may have been replaced mid-install.

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::catalog::Catalog;
use crate::events::{EventBus, Notification};
use crate::types::{Item, ItemId};

const MAILBOX_CAPACITY: usize = 64;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("catalog store actor is gone")]
    ActorGone,
}

/// Messages understood by the store actor.
enum StoreEvent {
    /// Replace the whole catalog; previous state is discarded.
    Replace {
        catalog: Catalog,
        resp: oneshot::Sender<()>,
    },
    /// Copy of the current catalog for display.
    Snapshot { resp: oneshot::Sender<Catalog> },
    /// Copy of a single item by id.
    Get {
        id: ItemId,
        resp: oneshot::Sender<Option<Item>>,
    },
    /// Write back one install result by id lookup.
    ApplyInstallResult {
        id: ItemId,
        success: bool,
        path: PathBuf,
        resp: oneshot::Sender<bool>,
    },
    Shutdown,
}

/// A handle to the catalog store actor that is Send + Sync and Clone.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<StoreEvent>,
}

impl StoreHandle {
    /// Spawn the store actor with an empty catalog.
    pub fn spawn(bus: EventBus) -> Self {
        let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
        tokio::spawn(run_store_event_loop(receiver, bus));
        Self { sender }
    }

    /// Helper to send a request and wait for the response
    async fn request<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(oneshot::Sender<T>) -> StoreEvent,
    {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(f(tx))
            .await
            .map_err(|_| StoreError::ActorGone)?;
        rx.await.map_err(|_| StoreError::ActorGone)
    }

    /// Replace the catalog wholesale. Emits `CatalogChanged`.
    pub async fn replace(&self, catalog: Catalog) -> Result<(), StoreError> {
        self.request(|resp| StoreEvent::Replace { catalog, resp })
            .await
    }

    pub async fn snapshot(&self) -> Result<Catalog, StoreError> {
        self.request(|resp| StoreEvent::Snapshot { resp }).await
    }

    pub async fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        self.request(|resp| StoreEvent::Get { id, resp }).await
    }

    /// Record the outcome of an install job against the current catalog.
    ///
    /// Returns `false` when the id is no longer present (the catalog was
    /// reloaded while the job ran); the update is dropped in that case.
    pub async fn apply_install_result(
        &self,
        id: ItemId,
        success: bool,
        path: PathBuf,
    ) -> Result<bool, StoreError> {
        self.request(|resp| StoreEvent::ApplyInstallResult {
            id,
            success,
            path,
            resp,
        })
        .await
    }

    /// Stop the actor. Outstanding handles get `ActorGone` afterwards.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(StoreEvent::Shutdown).await;
    }
}

/// The actual event loop owning the catalog
async fn run_store_event_loop(mut receiver: mpsc::Receiver<StoreEvent>, bus: EventBus) {
    let mut catalog = Catalog::default();

    while let Some(event) = receiver.recv().await {
        match event {
            StoreEvent::Replace { catalog: next, resp } => {
                catalog = next;
                let _ = resp.send(());
                bus.emit(Notification::CatalogChanged);
            }
            StoreEvent::Snapshot { resp } => {
                let _ = resp.send(catalog.clone());
            }
            StoreEvent::Get { id, resp } => {
                let _ = resp.send(catalog.get(&id).cloned());
            }
            StoreEvent::ApplyInstallResult {
                id,
                success,
                path,
                resp,
            } => {
                let applied = match catalog.get_mut(&id) {
                    Some(item) => {
                        item.installed = success;
                        item.local_path = success.then_some(path);
                        true
                    }
                    None => {
                        debug!(item = %id, "id vanished from catalog, dropping install result");
                        false
                    }
                };
                let _ = resp.send(applied);
            }
            StoreEvent::Shutdown => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: ItemId::new(id),
            title: String::new(),
            description: String::new(),
            author: String::new(),
            version: String::new(),
            source_url: format!("https://x/{id}.git"),
            installed: false,
            local_path: None,
        }
    }

    fn catalog_of(ids: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for id in ids {
            catalog.push(item(id));
        }
        catalog
    }

    #[tokio::test]
    async fn test_replace_and_snapshot() {
        let bus = EventBus::default();
        let store = StoreHandle::spawn(bus.clone());
        let mut events = bus.subscribe();

        store.replace(catalog_of(&["a", "b"])).await.unwrap();

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(events.recv().await.unwrap(), Notification::CatalogChanged);
    }

    #[tokio::test]
    async fn test_apply_install_result_success() {
        let store = StoreHandle::spawn(EventBus::default());
        store.replace(catalog_of(&["a"])).await.unwrap();

        let path = PathBuf::from("/data/items/a");
        let applied = store
            .apply_install_result(ItemId::new("a"), true, path.clone())
            .await
            .unwrap();
        assert!(applied);

        let item = store.get(ItemId::new("a")).await.unwrap().unwrap();
        assert!(item.installed);
        assert_eq!(item.local_path, Some(path));
    }

    #[tokio::test]
    async fn test_apply_install_result_failure_clears_path() {
        let store = StoreHandle::spawn(EventBus::default());
        let mut catalog = catalog_of(&["a"]);
        catalog.get_mut(&ItemId::new("a")).unwrap().installed = true;
        catalog.get_mut(&ItemId::new("a")).unwrap().local_path =
            Some(PathBuf::from("/data/items/a"));
        store.replace(catalog).await.unwrap();

        store
            .apply_install_result(ItemId::new("a"), false, PathBuf::from("/data/items/a"))
            .await
            .unwrap();

        let item = store.get(ItemId::new("a")).await.unwrap().unwrap();
        assert!(!item.installed);
        assert!(item.local_path.is_none());
    }

    #[tokio::test]
    async fn test_result_for_vanished_id_is_dropped() {
        let store = StoreHandle::spawn(EventBus::default());
        store.replace(catalog_of(&["a"])).await.unwrap();
        // Reload that no longer contains "a", racing an in-flight install.
        store.replace(catalog_of(&["b"])).await.unwrap();

        let applied = store
            .apply_install_result(ItemId::new("a"), true, PathBuf::from("/data/items/a"))
            .await
            .unwrap();
        assert!(!applied);

        let snapshot = store.snapshot().await.unwrap();
        assert!(snapshot.get(&ItemId::new("a")).is_none());
    }

    #[tokio::test]
    async fn test_shutdown_poisons_handle() {
        let store = StoreHandle::spawn(EventBus::default());
        store.shutdown().await;
        // Give the actor a chance to drain its mailbox and exit.
        tokio::task::yield_now().await;
        assert!(matches!(store.snapshot().await, Err(StoreError::ActorGone)));
    }
}
