//! Data file watcher
//!
//! Background task that polls the catalog file's modification time and
//! clears the stats cache when it changes. This is the reactive half of the
//! cache's invalidation: the staleness check on read still runs, so a missed
//! poll only delays invalidation rather than breaking it.

use crate::state::AppState;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

/// Spawn the mtime poller
///
/// The task runs for the life of the process; the returned handle is only
/// used by tests to shut it down.
pub fn spawn_watcher(state: Arc<RwLock<AppState>>, poll_interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(poll_interval);
        // An unreadable file reads as "no timestamp": a change to or from
        // that state counts as a modification too.
        let mut last_seen: Option<SystemTime> = {
            let state = state.read().await;
            state.store.modified().ok()
        };

        loop {
            interval.tick().await;
            let current = {
                let state = state.read().await;
                state.store.modified().ok()
            };
            if current != last_seen {
                info!("Data file changed, invalidating stats cache");
                state.write().await.stats.invalidate();
                last_seen = current;
            }
        }
    })
}
