//! Core records and identifier newtypes

pub mod item;

pub use item::{Item, ItemId};
