// Item persistence module
// Handles loading and saving the item catalog as a single JSON array file

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Unique identifier for an item (milliseconds since epoch at creation time)
pub type ItemId = i64;

/// Error types for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A catalog item
///
/// Only `id` is guaranteed to be present. The catalog carries no schema
/// enforcement: records may legally lack `name`, `category`, or `price`,
/// and any extra fields a client sent at creation time survive round trips
/// via the flattened map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier, assigned by the server at creation time
    pub id: ItemId,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Price in whole currency units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Unrecognized fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An item as submitted by a client, before the server assigns an id
///
/// Deliberately unvalidated: any JSON object is accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDraft {
    /// Display name (optional, not validated)
    #[serde(default)]
    pub name: Option<String>,
    /// Category label (optional, not validated)
    #[serde(default)]
    pub category: Option<String>,
    /// Price (optional, not validated)
    #[serde(default)]
    pub price: Option<f64>,
    /// Any other fields the client sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemDraft {
    /// Turn a draft into a stored item with the given id
    ///
    /// A client-supplied `id` field is discarded; the server always assigns.
    pub fn into_item(self, id: ItemId) -> Item {
        let mut extra = self.extra;
        extra.remove("id");
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            extra,
        }
    }
}

/// Whole-file store for the item catalog
///
/// Every operation reads or rewrites the entire backing file. There is no
/// locking: concurrent writers race and the last whole-file write wins.
#[derive(Debug, Clone)]
pub struct ItemStore {
    path: PathBuf,
}

impl ItemStore {
    /// Create a store backed by the given file path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the full collection from the backing file
    ///
    /// # Returns
    /// * `Ok(Vec<Item>)` if the file was read and parsed
    /// * `Err(StorageError)` if the file is unreadable or contains malformed JSON
    pub fn load(&self) -> Result<Vec<Item>, StorageError> {
        let raw = fs::read_to_string(&self.path)?;
        let items: Vec<Item> = serde_json::from_str(&raw)?;
        Ok(items)
    }

    /// Serialize the full collection and overwrite the backing file
    ///
    /// Pretty-printed, matching the on-disk format produced by the create
    /// endpoint. Not atomic: a concurrent reader may observe a partial write.
    pub fn save(&self, items: &[Item]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Current modification time of the backing file
    pub fn modified(&self) -> Result<SystemTime, StorageError> {
        let metadata = fs::metadata(&self.path)?;
        Ok(metadata.modified()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn sample_item(id: ItemId, name: &str, category: &str, price: f64) -> Item {
        Item {
            id,
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            price: Some(price),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = ItemStore::new(temp_file.path());

        let items = vec![
            sample_item(1, "Laptop Pro", "Electronics", 2499.0),
            sample_item(2, "Standing Desk", "Furniture", 1199.0),
        ];

        store.save(&items).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, items);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        drop(temp_file);

        let store = ItemStore::new(&path);
        assert!(matches!(store.load(), Err(StorageError::Io(_))));
    }

    #[test]
    fn test_load_malformed_json_is_an_error() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not json at all").unwrap();

        let store = ItemStore::new(temp_file.path());
        assert!(matches!(store.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_missing_fields_survive_round_trip() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = ItemStore::new(temp_file.path());

        // A record with no category and no price is legal
        let items = vec![Item {
            id: 7,
            name: Some("Mystery Box".to_string()),
            category: None,
            price: None,
            extra: Map::new(),
        }];

        store.save(&items).unwrap();

        // Absent fields must not be written as nulls
        let raw = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(!raw.contains("category"));
        assert!(!raw.contains("price"));

        let loaded = store.load().unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_extra_fields_are_preserved() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = ItemStore::new(temp_file.path());

        let mut extra = Map::new();
        extra.insert("color".to_string(), json!("red"));
        let items = vec![Item {
            id: 3,
            name: Some("Desk Lamp".to_string()),
            category: Some("Furniture".to_string()),
            price: Some(49.0),
            extra,
        }];

        store.save(&items).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].extra.get("color"), Some(&json!("red")));
    }

    #[test]
    fn test_draft_discards_client_supplied_id() {
        let mut extra = Map::new();
        extra.insert("id".to_string(), json!(999));
        let draft = ItemDraft {
            name: Some("Wireless Mouse".to_string()),
            category: Some("Electronics".to_string()),
            price: Some(59.0),
            extra,
        };

        let item = draft.into_item(1234);
        assert_eq!(item.id, 1234);
        assert!(!item.extra.contains_key("id"));
    }
}
