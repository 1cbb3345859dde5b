//! Launch command

use anyhow::{Context, Result, bail};
use shelf::catalog::{self, CatalogSource};
use shelf::events::EventBus;
use shelf::ops;
use shelf::types::ItemId;

/// Print the display reference for an installed item's entry document
pub async fn launch(source: &dyn CatalogSource, id: &str) -> Result<()> {
    let root = super::install_root()?;
    let outcome = catalog::load(source, &root)
        .await
        .context("Failed to load catalog")?;

    let id = ItemId::new(id);
    let Some(item) = outcome.catalog.get(&id) else {
        bail!("unknown item: {id}");
    };

    let bus = EventBus::default();
    let reference = ops::launch::launch(item, &bus)?;
    println!("{reference}");
    Ok(())
}
