//! Service layer for business logic
//!
//! This module contains service abstractions that separate business logic
//! from HTTP handlers, making the code more testable and maintainable.

pub mod catalog;
pub mod stats;
pub mod watcher;

pub use catalog::{CatalogService, ItemPage, ListParams, PaginationMeta};
pub use stats::{StatsCache, StatsSnapshot};
