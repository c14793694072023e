//! Stats cache
//!
//! A derived aggregate over the item catalog (count and average price),
//! cached in process memory and tagged with the backing file's modification
//! time. Two producers invalidate it: the synchronous staleness check on
//! read, and the background file watcher. Either alone would suffice; both
//! are kept for responsiveness vs. correctness under notification loss.

use crate::error::AppError;
use crate::storage::{Item, ItemStore};
use serde::Serialize;
use std::time::SystemTime;
use tracing::warn;

/// Derived aggregate over the whole catalog
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of items in the catalog
    pub total: usize,
    /// Mean price across all items (0 for an empty catalog)
    pub average_price: f64,
}

/// Lazily refreshed stats cache
///
/// Scoped to the owning `AppState` rather than process-global, so tests can
/// run against tempfile-backed stores.
#[derive(Debug, Default)]
pub struct StatsCache {
    snapshot: Option<StatsSnapshot>,
    modified: Option<SystemTime>,
}

impl StatsCache {
    /// Create an empty cache; the first read computes the snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute a snapshot from a loaded collection
    ///
    /// An item without a price contributes 0 to the sum.
    pub fn compute(items: &[Item]) -> StatsSnapshot {
        let total = items.len();
        let average_price = if total > 0 {
            items.iter().map(|item| item.price.unwrap_or(0.0)).sum::<f64>() / total as f64
        } else {
            0.0
        };
        StatsSnapshot {
            total,
            average_price,
        }
    }

    /// Drop the cached snapshot; the next read recomputes
    pub fn invalidate(&mut self) {
        self.snapshot = None;
        self.modified = None;
    }

    /// Whether the cached snapshot still matches the backing file
    ///
    /// Valid only when a snapshot exists and its recorded modification time
    /// equals the file's current one.
    fn is_valid(&self, store: &ItemStore) -> bool {
        match (self.snapshot, self.modified, store.modified()) {
            (Some(_), Some(cached), Ok(current)) => cached == current,
            _ => false,
        }
    }

    /// Recompute the snapshot from the backing file
    ///
    /// On any read or parse failure the cache is cleared rather than left
    /// holding a stale value.
    fn refresh(&mut self, store: &ItemStore) {
        let result = store
            .load()
            .and_then(|items| Ok((Self::compute(&items), store.modified()?)));
        match result {
            Ok((snapshot, modified)) => {
                self.snapshot = Some(snapshot);
                self.modified = Some(modified);
            }
            Err(e) => {
                warn!("Failed to refresh stats cache: {}", e);
                self.invalidate();
            }
        }
    }

    /// Return a valid snapshot, refreshing first if the cache is stale
    pub fn get(&mut self, store: &ItemStore) -> Result<StatsSnapshot, AppError> {
        if !self.is_valid(store) {
            self.refresh(store);
        }
        self.snapshot.ok_or(AppError::StatsUnavailable)
    }
}
