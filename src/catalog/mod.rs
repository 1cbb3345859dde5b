//! Catalog loading and the in-memory item collection
//!
//! A catalog is replaced wholesale on each load and never merged across
//! loads; install completions flip single fields in place through the store
//! actor. Items keep manifest order, which is stable for deterministic
//! listing.

pub mod loader;
pub mod source;

pub use loader::{LoadOutcome, ManifestError, load};
pub use source::{CatalogSource, LocalFileSource, RemoteSource, SourceError};

use crate::types::{Item, ItemId};

/// Ordered collection of items, keyed by id. Ids are unique within one load.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, keeping source order.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Items whose content is present on disk.
    pub fn installed(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.installed)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
