//! End-to-end library flow: load, install, launch

use std::path::PathBuf;

use tempfile::{TempDir, tempdir};

use shelf::catalog::{self, CatalogSource, LocalFileSource, SourceError};
use shelf::events::{EventBus, Notification};
use shelf::ops::install::{InstallCoordinator, Retriever};
use shelf::ops::launch;
use shelf::paths::InstallRoot;
use shelf::store::StoreHandle;
use shelf::types::ItemId;

struct Flow {
    _dir: TempDir,
    root: InstallRoot,
    bus: EventBus,
    store: StoreHandle,
    manifest: PathBuf,
}

impl Flow {
    fn new(manifest_json: &str) -> Self {
        let dir = tempdir().expect("failed to create temp dir");
        let root = InstallRoot::new(dir.path().join("items"));
        root.ensure().expect("failed to create install root");

        let manifest = dir.path().join("catalog.json");
        std::fs::write(&manifest, manifest_json).expect("failed to write manifest");

        let bus = EventBus::default();
        let store = StoreHandle::spawn(bus.clone());
        Self {
            _dir: dir,
            root,
            bus,
            store,
            manifest,
        }
    }

    /// Fake retrieval tool invoked as `tool clone <url> <target>`.
    fn fake_tool(&self, script: &str) -> Retriever {
        use std::os::unix::fs::PermissionsExt;
        let path = self._dir.path().join("fake-git");
        std::fs::write(&path, script).expect("failed to write fake tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake tool");
        Retriever::new(path.to_str().unwrap(), "clone")
    }

    async fn load_into_store(&self) {
        let source = LocalFileSource::new(self.manifest.clone());
        let outcome = catalog::load(&source, &self.root)
            .await
            .expect("load failed");
        assert!(outcome.diagnostics.is_empty());
        self.store.replace(outcome.catalog).await.expect("replace failed");
    }
}

#[tokio::test]
async fn test_full_install_and_launch_scenario() {
    let flow = Flow::new(
        r#"[{"id": "a", "title": "A", "repoUrl": "https://x/repo.git",
             "author": "ada", "version": "1.0"}]"#,
    );
    flow.load_into_store().await;

    // Freshly loaded, nothing on disk yet.
    let item = flow.store.get(ItemId::new("a")).await.unwrap().unwrap();
    assert!(!item.installed);

    let mut events = flow.bus.subscribe();
    let coordinator = InstallCoordinator::with_retriever(
        flow.store.clone(),
        flow.root.clone(),
        flow.bus.clone(),
        flow.fake_tool("#!/bin/sh\nmkdir -p \"$3\"\necho hi > \"$3/index.html\"\nexit 0\n"),
    );

    assert!(coordinator.install_by_id(&ItemId::new("a")).await.unwrap());
    coordinator.wait_idle().await;

    assert_eq!(
        events.recv().await.unwrap(),
        Notification::InstallStarted(ItemId::new("a"))
    );
    assert_eq!(
        events.recv().await.unwrap(),
        Notification::InstallFinished {
            id: ItemId::new("a"),
            success: true
        }
    );
    assert_eq!(events.recv().await.unwrap(), Notification::CatalogChanged);

    let item = flow.store.get(ItemId::new("a")).await.unwrap().unwrap();
    assert!(item.installed);

    let entry = launch::resolve_entry(&item).unwrap().unwrap();
    assert_eq!(entry, flow.root.resolve(&ItemId::new("a")).unwrap().join("index.html"));

    let reference = launch::launch(&item, &flow.bus).unwrap();
    assert!(reference.starts_with("file://"));
    assert!(reference.ends_with("/a/index.html"));
}

#[tokio::test]
async fn test_failed_load_keeps_previous_catalog() {
    let flow = Flow::new(r#"[{"id": "a", "repoUrl": "https://x/a.git"}]"#);
    flow.load_into_store().await;

    // Manifest goes bad; the load fails and the store is left alone.
    std::fs::write(&flow.manifest, "{ not json").unwrap();
    let source = LocalFileSource::new(flow.manifest.clone());
    let result = catalog::load(&source, &flow.root).await;
    assert!(matches!(result, Err(SourceError::Malformed(_))));

    let snapshot = flow.store.snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.get(&ItemId::new("a")).is_some());
}

#[tokio::test]
async fn test_reload_during_install_drops_stale_result() {
    let flow = Flow::new(r#"[{"id": "a", "repoUrl": "https://x/a.git"}]"#);
    flow.load_into_store().await;

    let coordinator = InstallCoordinator::with_retriever(
        flow.store.clone(),
        flow.root.clone(),
        flow.bus.clone(),
        flow.fake_tool("#!/bin/sh\nsleep 0.3\nmkdir -p \"$3\"\nexit 0\n"),
    );
    coordinator.install_by_id(&ItemId::new("a")).await.unwrap();

    // Reload away the item while its job runs.
    std::fs::write(&flow.manifest, r#"[{"id": "b", "repoUrl": "https://x/b.git"}]"#).unwrap();
    flow.load_into_store().await;

    coordinator.wait_idle().await;

    // The stale result was dropped; "a" never reappears in the catalog.
    let snapshot = flow.store.snapshot().await.unwrap();
    assert!(snapshot.get(&ItemId::new("a")).is_none());
    assert!(snapshot.get(&ItemId::new("b")).is_some());
}
