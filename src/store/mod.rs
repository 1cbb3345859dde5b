//! Serialized ownership of the in-memory catalog

pub mod actor;

pub use actor::{StoreError, StoreHandle};
