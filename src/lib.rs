//! shelf - local content-catalog manager
//!
//! Tracks a catalog of installable web-content items, reconciles each item's
//! on-disk presence with a JSON manifest, and drives asynchronous install and
//! launch operations against an external version-control tool.
//!
//! # Architecture
//!
//! - **Actor Pattern**: the in-memory catalog is owned by a dedicated task and
//!   accessed through [`StoreHandle`], so all mutation flows through a single
//!   serialized path even while install jobs complete concurrently.
//! - **Explicit job table**: [`ops::install::InstallCoordinator`] tracks every
//!   in-flight clone job by item id; at most one job runs per id.
//! - **Event bus**: observers subscribe to [`events::Notification`] values
//!   (catalog-changed, install-started, install-finished, launch-requested)
//!   instead of reaching into shared state.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.shelf/
//! ├── items/         # One directory per installed item, named by item id
//! └── catalog.json   # Default local manifest
//! ```

pub mod catalog;
pub mod events;
pub mod ops;
pub mod paths;
pub mod session;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use catalog::Catalog;
pub use store::StoreHandle;
pub use types::{Item, ItemId};

use dirs::home_dir;
use std::path::PathBuf;

/// Returns the primary data directory, or None if the user's home cannot be resolved.
pub fn try_shelf_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("SHELF_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".shelf"))
}

/// Returns the canonical shelf home directory (`~/.shelf`).
///
/// # Panics
/// Panics if the home directory cannot be determined.
pub fn shelf_home() -> PathBuf {
    try_shelf_home().expect("Could not determine home directory")
}

/// Install root for item content: ~/.shelf/items
pub fn install_root_path() -> PathBuf {
    shelf_home().join("items")
}

/// Default local manifest path: ~/.shelf/catalog.json
pub fn manifest_path() -> PathBuf {
    shelf_home().join("catalog.json")
}

/// User Agent string for the remote manifest provider
pub const USER_AGENT: &str = concat!("shelf/", env!("CARGO_PKG_VERSION"));
