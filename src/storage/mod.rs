// Storage module
// Flat-file persistence for the item catalog

pub mod items;

pub use items::{Item, ItemDraft, ItemId, ItemStore, StorageError};
