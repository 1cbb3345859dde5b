//! List command

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use shelf::catalog::{self, CatalogSource};

/// List catalog items with their install status
pub async fn list(source: &dyn CatalogSource, installed_only: bool) -> Result<()> {
    let root = super::install_root()?;
    let outcome = catalog::load(source, &root)
        .await
        .context("Failed to load catalog")?;

    for diagnostic in &outcome.diagnostics {
        tracing::warn!("manifest record skipped: {diagnostic}");
    }

    if outcome.catalog.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Version", "Author", "Status"]);

    for item in outcome.catalog.iter() {
        if installed_only && !item.installed {
            continue;
        }
        let status = if item.installed { "installed" } else { "-" };
        table.add_row(vec![
            item.id.as_str(),
            item.title.as_str(),
            item.version.as_str(),
            item.author.as_str(),
            status,
        ]);
    }

    println!("{table}");
    Ok(())
}
