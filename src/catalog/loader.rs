//! Manifest decoding and filesystem reconciliation
//!
//! A load replaces the previous catalog wholesale: every record is decoded,
//! validated, resolved to its install directory, and checked for on-disk
//! presence. Bad records are skipped and reported as aggregated diagnostics;
//! only a malformed top-level manifest fails the load as a whole, in which
//! case the caller keeps its previous catalog unchanged.

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::catalog::source::{CatalogSource, SourceError};
use crate::paths::{InstallRoot, PathError};
use crate::types::{Item, ItemId};

/// Per-record diagnostic. Non-fatal; the rest of the load proceeds.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("record {index} has no id")]
    MissingId { index: usize },

    #[error("record {id} has no repoUrl")]
    MissingSource { id: ItemId },

    #[error("record {id} duplicates an earlier id")]
    DuplicateId { id: ItemId },

    #[error("record {id} has an unusable id: {source}")]
    UnsafeId {
        id: ItemId,
        #[source]
        source: PathError,
    },

    #[error("record {index} is not an object: {detail}")]
    Record { index: usize, detail: String },
}

/// Result of a successful load: the new catalog plus skipped-record
/// diagnostics.
#[derive(Debug)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub diagnostics: Vec<ManifestError>,
}

/// Manifest wire format: unknown fields ignored, everything optional so that
/// validation (not deserialization) decides which records survive.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "repoUrl", default)]
    repo_url: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// Load a catalog from `source`, cross-checking each item against the
/// filesystem under `root`.
///
/// Items come back in manifest order. `installed` reflects directory
/// presence at load time; `local_path` is set iff installed.
pub async fn load(
    source: &dyn CatalogSource,
    root: &InstallRoot,
) -> Result<LoadOutcome, SourceError> {
    let bytes = source.fetch().await?;
    let records: Vec<serde_json::Value> = serde_json::from_slice(&bytes)?;

    let mut catalog = Catalog::new();
    let mut diagnostics = Vec::new();

    for (index, value) in records.into_iter().enumerate() {
        let record: RawRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(err) => {
                diagnostics.push(ManifestError::Record {
                    index,
                    detail: err.to_string(),
                });
                continue;
            }
        };

        let Some(id) = record.id.filter(|s| !s.is_empty()) else {
            diagnostics.push(ManifestError::MissingId { index });
            continue;
        };
        let id = ItemId::from(id);

        let Some(source_url) = record.repo_url.filter(|s| !s.is_empty()) else {
            diagnostics.push(ManifestError::MissingSource { id });
            continue;
        };

        let path = match root.resolve(&id) {
            Ok(path) => path,
            Err(err) => {
                diagnostics.push(ManifestError::UnsafeId { id, source: err });
                continue;
            }
        };

        if catalog.get(&id).is_some() {
            diagnostics.push(ManifestError::DuplicateId { id });
            continue;
        }

        let installed = path.is_dir();
        catalog.push(Item {
            id,
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            author: record.author.unwrap_or_default(),
            version: record.version.unwrap_or_default(),
            source_url,
            installed,
            local_path: installed.then_some(path),
        });
    }

    Ok(LoadOutcome {
        catalog,
        diagnostics,
    })
}
