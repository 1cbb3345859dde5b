//! Domain-specific errors for item operations

use std::path::PathBuf;

use thiserror::Error;

use crate::paths::PathError;
use crate::store::StoreError;
use crate::types::ItemId;

/// Errors raised while accepting an install request. Failures of the install
/// job itself are not errors; they surface as `InstallFinished` events with
/// `success = false`.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("invalid install target: {0}")]
    Path(#[from] PathError),

    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("catalog store unavailable: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("item is not installed: {0}")]
    NotInstalled(ItemId),

    #[error("no entry document found for item: {0}")]
    EntryNotFound(ItemId),

    #[error("entry document path cannot be expressed as a file URL: {0}")]
    UnrepresentablePath(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
