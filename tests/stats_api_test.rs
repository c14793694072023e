//! End-to-end tests for the stats endpoint and its cache invalidation

use axum::extract::State;
use axum::Json;
use catalog_backend::api::items::create_item;
use catalog_backend::api::stats::get_stats;
use catalog_backend::error::AppError;
use catalog_backend::services::watcher::spawn_watcher;
use catalog_backend::state::AppState;
use catalog_backend::storage::{Item, ItemDraft, ItemStore};
use serde_json::Map;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::sync::RwLock;

fn priced_item(id: i64, price: f64) -> Item {
    Item {
        id,
        name: Some(format!("Item {}", id)),
        category: Some("Test".to_string()),
        price: Some(price),
        extra: Map::new(),
    }
}

fn seeded_state(items: &[Item]) -> (NamedTempFile, Arc<RwLock<AppState>>) {
    let temp_file = NamedTempFile::new().unwrap();
    let state = AppState::new(temp_file.path());
    state.store.save(items).unwrap();
    (temp_file, Arc::new(RwLock::new(state)))
}

#[tokio::test]
async fn stats_for_an_empty_catalog_are_zero() {
    let (_guard, state) = seeded_state(&[]);

    let snapshot = get_stats(State(state)).await.unwrap();
    assert_eq!(snapshot.total, 0);
    assert_eq!(snapshot.average_price, 0.0);
}

#[tokio::test]
async fn stats_average_the_prices() {
    let items: Vec<Item> = [100.0, 150.0, 200.0, 250.0, 300.0]
        .iter()
        .enumerate()
        .map(|(i, &p)| priced_item(i as i64 + 1, p))
        .collect();
    let (_guard, state) = seeded_state(&items);

    let snapshot = get_stats(State(state)).await.unwrap();
    assert_eq!(snapshot.total, 5);
    assert_eq!(snapshot.average_price, 200.0);
}

#[tokio::test]
async fn stats_reflect_items_created_through_the_api() {
    let (_guard, state) = seeded_state(&[priced_item(1, 100.0)]);

    let first = get_stats(State(state.clone())).await.unwrap();
    assert_eq!(first.total, 1);

    // The sleep guards against filesystems with coarse mtime resolution;
    // the whole-file rewrite below must land on a distinct timestamp.
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let draft = ItemDraft {
        name: Some("Wireless Mouse".to_string()),
        category: Some("Electronics".to_string()),
        price: Some(300.0),
        extra: Map::new(),
    };
    create_item(State(state.clone()), Json(draft)).await.unwrap();

    // No watcher is running: the staleness check alone must catch the change
    let snapshot = get_stats(State(state)).await.unwrap();
    assert_eq!(snapshot.total, 2);
    assert_eq!(snapshot.average_price, 200.0);
}

#[tokio::test]
async fn stats_error_when_the_file_is_corrupt_and_no_snapshot_exists() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "[ truncated").unwrap();
    let state = Arc::new(RwLock::new(AppState::new(temp_file.path())));

    let result = get_stats(State(state)).await;
    match result {
        Err(AppError::StatsUnavailable) => {}
        other => panic!("Expected StatsUnavailable, got: {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn watcher_invalidates_the_cache_when_the_file_changes_externally() {
    let (guard, state) = seeded_state(&[priced_item(1, 50.0)]);

    let first = get_stats(State(state.clone())).await.unwrap();
    assert_eq!(first.total, 1);

    let handle = spawn_watcher(state.clone(), Duration::from_millis(20));

    // Simulate an external writer bypassing the API entirely
    tokio::time::sleep(Duration::from_millis(50)).await;
    let external = ItemStore::new(guard.path());
    external
        .save(&[priced_item(1, 50.0), priced_item(2, 150.0)])
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let snapshot = get_stats(State(state)).await.unwrap();
    assert_eq!(snapshot.total, 2);
    assert_eq!(snapshot.average_price, 100.0);

    handle.abort();
}
