//! Item API handlers
//!
//! Contains HTTP request handlers for listing, fetching, and creating
//! catalog items.

use crate::error::AppError;
use crate::services::{CatalogService, ItemPage, ListParams};
use crate::state::AppState;
use crate::storage::{Item, ItemDraft, ItemId};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Query parameters for listing items
///
/// Kept as raw strings so that junk values coerce to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    /// 1-based page number
    pub page: Option<String>,
    /// Page size
    pub limit: Option<String>,
    /// Free-text search over name and category
    pub q: Option<String>,
}

impl From<ListItemsQuery> for ListParams {
    fn from(query: ListItemsQuery) -> Self {
        ListParams::from_raw(query.page.as_deref(), query.limit.as_deref(), query.q)
    }
}

/// GET /api/items - List items with search and pagination
pub async fn list_items(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<ItemPage>, AppError> {
    let params = ListParams::from(query);
    let state = state.read().await;
    let page = CatalogService::list(&state.store, &params)?;
    Ok(Json(page))
}

/// GET /api/items/:id - Get a specific item
///
/// The path segment is taken as a raw string: non-numeric input parses to a
/// sentinel that matches no item, so it answers 404 rather than 400.
pub async fn get_item(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let id: ItemId = id.parse().unwrap_or(-1);
    let state = state.read().await;
    let item = CatalogService::get(&state.store, id)?;
    Ok(Json(item))
}

/// POST /api/items - Create a new item
///
/// The payload is intentionally unvalidated; any JSON object is accepted
/// and stored as-is with a server-assigned id.
pub async fn create_item(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(draft): Json<ItemDraft>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let state = state.read().await;
    let item = CatalogService::create(&state.store, draft)?;
    Ok((StatusCode::CREATED, Json(item)))
}
