//! Stats API handler

use crate::error::AppError;
use crate::services::StatsSnapshot;
use crate::state::AppState;
use axum::{extract::State, response::Json};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /api/stats - Catalog aggregate (count and average price)
///
/// Served from the stats cache; a stale or missing snapshot is recomputed
/// from the data file before answering.
pub async fn get_stats(
    State(state): State<Arc<RwLock<AppState>>>,
) -> Result<Json<StatsSnapshot>, AppError> {
    let state = &mut *state.write().await;
    let snapshot = state.stats.get(&state.store)?;
    Ok(Json(snapshot))
}
