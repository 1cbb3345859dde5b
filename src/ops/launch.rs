//! Entry-document resolution for installed items
//!
//! Locates the file an item exposes as its launch target and emits a single
//! normalized `file://` reference for the external renderer. Resolution never
//! renders anything itself.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::events::{EventBus, Notification};
use crate::ops::LaunchError;
use crate::types::Item;

const ENTRY_NAME: &str = "index.html";
const ENTRY_EXTENSION: &str = "html";

/// Locate the entry document inside an installed item's directory.
///
/// Prefers a file literally named `index.html`; otherwise the first immediate
/// child with an `.html` extension wins. Directory-listing order is
/// platform-defined, so which sibling wins is a documented nondeterminism.
/// Returns `Ok(None)` when the item is installed but exposes no entry
/// document.
pub fn resolve_entry(item: &Item) -> Result<Option<PathBuf>, LaunchError> {
    let dir = match (&item.local_path, item.installed) {
        (Some(dir), true) => dir.as_path(),
        _ => return Err(LaunchError::NotInstalled(item.id.clone())),
    };

    let preferred = dir.join(ENTRY_NAME);
    if preferred.is_file() {
        return Ok(Some(preferred));
    }

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_entry_doc = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(ENTRY_EXTENSION));
        if is_entry_doc {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Resolve an item's entry document and emit a `LaunchRequested` event with
/// its normalized absolute `file://` reference. Emits nothing on failure.
pub fn launch(item: &Item, bus: &EventBus) -> Result<String, LaunchError> {
    let Some(entry) = resolve_entry(item)? else {
        warn!(item = %item.id, "no entry document found");
        return Err(LaunchError::EntryNotFound(item.id.clone()));
    };

    let reference = file_reference(&entry)?;
    bus.emit(Notification::LaunchRequested(reference.clone()));
    Ok(reference)
}

/// Normalize a local path into an absolute, URL-escaped `file://` reference.
fn file_reference(path: &Path) -> Result<String, LaunchError> {
    let absolute = path.canonicalize()?;
    let url = reqwest::Url::from_file_path(&absolute)
        .map_err(|()| LaunchError::UnrepresentablePath(absolute))?;
    Ok(url.to_string())
}
