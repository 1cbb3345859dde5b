//! Install root layout and id-to-directory resolution
//!
//! Item ids become directory names, so every id is checked as a safe path
//! segment before it is joined with the root. The root directory itself is
//! created by an explicit [`InstallRoot::ensure`] call at composition time,
//! never as a hidden constructor side effect.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::ItemId;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("item id is empty")]
    Empty,

    #[error("item id is not a safe path segment: {0:?}")]
    UnsafeSegment(String),
}

/// Root directory under which every item installs as `root/{id}`.
#[derive(Debug, Clone)]
pub struct InstallRoot {
    root: PathBuf,
}

impl InstallRoot {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the root directory and any missing ancestors. Idempotent.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Map an item id to its installation directory.
    ///
    /// Fails before any filesystem operation if the id is empty, contains a
    /// path separator or NUL, or is a relative-path token (`.` / `..`).
    pub fn resolve(&self, id: &ItemId) -> Result<PathBuf, PathError> {
        validate_segment(id.as_str())?;
        Ok(self.root.join(id.as_str()))
    }
}

fn validate_segment(id: &str) -> Result<(), PathError> {
    if id.is_empty() {
        return Err(PathError::Empty);
    }
    if id == "." || id == ".." {
        return Err(PathError::UnsafeSegment(id.to_string()));
    }
    if id.contains(['/', '\\', '\0']) {
        return Err(PathError::UnsafeSegment(id.to_string()));
    }
    Ok(())
}
