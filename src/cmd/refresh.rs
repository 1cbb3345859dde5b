//! Refresh command

use anyhow::{Context, Result};
use shelf::catalog::{self, CatalogSource};

/// Reload the catalog and report item and diagnostic counts
pub async fn refresh(source: &dyn CatalogSource) -> Result<()> {
    let root = super::install_root()?;
    let outcome = catalog::load(source, &root)
        .await
        .context("Failed to load catalog")?;

    let installed = outcome.catalog.installed().count();
    println!(
        "{} item(s), {} installed, {} record(s) skipped",
        outcome.catalog.len(),
        installed,
        outcome.diagnostics.len()
    );
    for diagnostic in &outcome.diagnostics {
        println!("  skipped: {diagnostic}");
    }
    Ok(())
}
