//! Command modules - one file per CLI command

pub mod install;
pub mod launch;
pub mod list;
pub mod refresh;

use std::path::PathBuf;

use anyhow::{Context, Result};
use shelf::catalog::{CatalogSource, LocalFileSource, RemoteSource};
use shelf::paths::InstallRoot;

/// Pick the manifest provider: remote URL if given, else a local file
/// (defaulting to `~/.shelf/catalog.json`).
pub fn source_from(
    manifest: Option<PathBuf>,
    manifest_url: Option<String>,
) -> Result<Box<dyn CatalogSource>> {
    if let Some(url) = manifest_url {
        let source = RemoteSource::new(url).context("Failed to build manifest HTTP client")?;
        return Ok(Box::new(source));
    }
    let path = manifest.unwrap_or_else(shelf::manifest_path);
    Ok(Box::new(LocalFileSource::new(path)))
}

/// Install root with its one-time directory creation applied.
pub fn install_root() -> Result<InstallRoot> {
    let root = InstallRoot::new(shelf::install_root_path());
    root.ensure().context("Failed to create install root")?;
    Ok(root)
}
