//! Install command

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use shelf::catalog::{self, CatalogSource};
use shelf::events::{EventBus, Notification};
use shelf::ops::InstallCoordinator;
use shelf::store::StoreHandle;
use shelf::types::ItemId;

/// Install the given items, reporting per-item outcomes as they arrive
pub async fn install(source: &dyn CatalogSource, ids: &[String]) -> Result<()> {
    let root = super::install_root()?;

    let bus = EventBus::default();
    let store = StoreHandle::spawn(bus.clone());

    let outcome = catalog::load(source, &root)
        .await
        .context("Failed to load catalog")?;
    for diagnostic in &outcome.diagnostics {
        tracing::warn!("manifest record skipped: {diagnostic}");
    }
    store.replace(outcome.catalog).await?;

    let coordinator = InstallCoordinator::new(store.clone(), root, bus.clone());
    let mut events = bus.subscribe();

    let mut pending = HashSet::new();
    for id in ids {
        let id = ItemId::from(id.as_str());
        match coordinator.install_by_id(&id).await {
            Ok(true) => {
                pending.insert(id);
            }
            Ok(false) => println!("{id}: install already in progress"),
            Err(err) => {
                tracing::error!(item = %id, "{err}");
                eprintln!("{id}: {err}");
            }
        }
    }

    let mut failures = 0usize;
    while !pending.is_empty() {
        match events.recv().await {
            Ok(Notification::InstallStarted(id)) => println!("{id}: cloning..."),
            Ok(Notification::InstallFinished { id, success }) => {
                if pending.remove(&id) {
                    if success {
                        println!("{id}: installed");
                    } else {
                        failures += 1;
                        println!("{id}: install failed");
                    }
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }

    if failures > 0 {
        bail!("{failures} install(s) failed");
    }
    Ok(())
}
