// Application state management
// Contains the item store and the stats cache

use crate::services::StatsCache;
use crate::storage::ItemStore;
use std::path::Path;

/// Main application state
///
/// Shared across requests as `Arc<RwLock<AppState>>`. The store is just a
/// path holder (every operation re-reads the file), so the only mutable
/// state here is the stats cache.
#[derive(Debug)]
pub struct AppState {
    /// Whole-file item store
    pub store: ItemStore,
    /// Lazily refreshed stats cache over the same file
    pub stats: StatsCache,
}

impl AppState {
    /// Create state backed by the given data file
    pub fn new<P: AsRef<Path>>(data_path: P) -> Self {
        Self {
            store: ItemStore::new(data_path),
            stats: StatsCache::new(),
        }
    }
}
