//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// All errors that can occur in the application are represented by this enum.
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// No item with the requested id exists
    #[error("Item not found")]
    ItemNotFound,

    /// The backing file is unreadable or contains malformed data
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    /// A stored record is missing a field the operation requires
    ///
    /// The catalog enforces no schema, so search can trip over records
    /// without `name` or `category`. Kept as a request-level failure
    /// rather than silently skipping the record.
    #[error("Malformed item record: {0}")]
    MalformedItem(String),

    /// The stats snapshot could not be computed and no cached value exists
    #[error("Failed to calculate stats")]
    StatsUnavailable,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::ItemNotFound => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MalformedItem(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StatsUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_fixed() {
        assert_eq!(AppError::ItemNotFound.to_string(), "Item not found");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::ItemNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_stats_unavailable_maps_to_500() {
        let response = AppError::StatsUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
