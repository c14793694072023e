//! Catalog query service
//!
//! Filtering, pagination, and creation over the whole-file item store.
//! Every operation loads the full collection; there is no index and no
//! cross-request state.

use crate::error::AppError;
use crate::storage::{Item, ItemDraft, ItemId, ItemStore};
use serde::Serialize;

/// Default page size when the client sends no `limit`
pub const DEFAULT_LIMIT: i64 = 10;
/// Upper bound on page size (large to support virtualized scrolling clients)
pub const MAX_LIMIT: i64 = 1000;

/// Normalized list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number, already floored to 1
    pub page: usize,
    /// Page size, already clamped to [1, MAX_LIMIT]
    pub limit: usize,
    /// Free-text search query
    pub q: Option<String>,
}

impl ListParams {
    /// Coerce raw query-string values into valid parameters
    ///
    /// Unparseable input falls back to the default; `page` is floored to 1
    /// and `limit` is clamped to [1, 1000], so `limit=-5` serves a page of
    /// one and `limit=999999` serves a page of one thousand.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, q: Option<String>) -> Self {
        let page = page
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(1)
            .max(1);
        let limit = limit
            .and_then(|l| l.parse::<i64>().ok())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        Self {
            page: page as usize,
            limit: limit as usize,
            q,
        }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::from_raw(None, None, None)
    }
}

/// Where a result page sits within the filtered result set
///
/// Derived per request, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// The requested page number
    pub current_page: usize,
    /// Total pages in the filtered result set (0 when empty)
    pub total_pages: usize,
    /// Total items matching the filter
    pub total_items: usize,
    /// Served page size
    pub items_per_page: usize,
    /// Whether a later page exists
    pub has_next_page: bool,
    /// Whether an earlier page exists
    pub has_prev_page: bool,
    /// The next page number, or null on the last page
    pub next_page: Option<usize>,
    /// The previous page number, or null on the first page
    pub prev_page: Option<usize>,
}

/// One page of items plus its pagination metadata
#[derive(Debug, Serialize)]
pub struct ItemPage {
    /// The items on this page
    pub items: Vec<Item>,
    /// Where this page sits in the filtered result set
    pub pagination: PaginationMeta,
}

/// Catalog operations
pub struct CatalogService;

impl CatalogService {
    /// List items: load, filter by `q`, paginate
    ///
    /// Search is a case-insensitive substring match against `name` or
    /// `category`. A record missing `name` (or missing `category` when the
    /// name did not match) fails the whole request: the store enforces no
    /// schema, so malformed records surface here instead of being skipped.
    pub fn list(store: &ItemStore, params: &ListParams) -> Result<ItemPage, AppError> {
        let items = store.load()?;

        let filtered = match params.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let term = q.to_lowercase();
                let mut matches = Vec::new();
                for item in items {
                    if Self::matches(&item, &term)? {
                        matches.push(item);
                    }
                }
                matches
            }
            _ => items,
        };

        let total_items = filtered.len();
        let total_pages = total_items.div_ceil(params.limit);
        // Saturate: page is client-supplied and unbounded above, and a page
        // past the end must serve an empty slice rather than overflow.
        let offset = params.page.saturating_sub(1).saturating_mul(params.limit);
        let page_items: Vec<Item> = filtered
            .into_iter()
            .skip(offset)
            .take(params.limit)
            .collect();

        let has_next_page = params.page < total_pages;
        let has_prev_page = params.page > 1;

        Ok(ItemPage {
            items: page_items,
            pagination: PaginationMeta {
                current_page: params.page,
                total_pages,
                total_items,
                items_per_page: params.limit,
                has_next_page,
                has_prev_page,
                next_page: has_next_page.then(|| params.page + 1),
                prev_page: has_prev_page.then(|| params.page - 1),
            },
        })
    }

    /// Whether an item matches a lowercased search term
    ///
    /// `category` is only consulted when `name` does not match, mirroring
    /// the short-circuit of the original filter.
    fn matches(item: &Item, term: &str) -> Result<bool, AppError> {
        let name = item
            .name
            .as_deref()
            .ok_or_else(|| AppError::MalformedItem(format!("item {} has no name", item.id)))?;
        if name.to_lowercase().contains(term) {
            return Ok(true);
        }
        let category = item
            .category
            .as_deref()
            .ok_or_else(|| AppError::MalformedItem(format!("item {} has no category", item.id)))?;
        Ok(category.to_lowercase().contains(term))
    }

    /// Get the first item with the given id
    pub fn get(store: &ItemStore, id: ItemId) -> Result<Item, AppError> {
        let items = store.load()?;
        items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or(AppError::ItemNotFound)
    }

    /// Create an item: assign an id, append, rewrite the whole file
    ///
    /// The id is the current wall-clock time in milliseconds, so rapid
    /// concurrent creates can collide. The read-modify-write is not atomic:
    /// two concurrent creates can each load the same state and the second
    /// save wins, losing the first append.
    pub fn create(store: &ItemStore, draft: ItemDraft) -> Result<Item, AppError> {
        let mut items = store.load()?;
        let item = draft.into_item(chrono::Utc::now().timestamp_millis());
        items.push(item.clone());
        store.save(&items)?;
        Ok(item)
    }
}
