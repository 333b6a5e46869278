//! Unified error handling for the API.
//!
//! Every handler failure funnels through [`AppError`], which renders as a
//! JSON body (`{"error": "..."}`) with the matching status code. Database
//! and internal failures are captured in Sentry and their details are kept
//! out of the response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use wishbox_core::ItemDraftError;
use wishbox_core::api::ErrorBody;

use crate::db::RepositoryError;

/// Application-level error type for API handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Submitted item data failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ItemDraftError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry; a repository NotFound is a normal
        // client-visible outcome, not a fault
        let is_server_error = match &self {
            Self::Database(RepositoryError::NotFound) => false,
            Self::Database(_) | Self::Internal(_) => true,
            Self::NotFound(_) | Self::Validation(_) => false,
        };
        if is_server_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let status = match &self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Database(RepositoryError::NotFound) => "not found".to_string(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(message) => message,
            Self::Validation(e) => e.to_string(),
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("wishlist 123".to_string());
        assert_eq!(err.to_string(), "Not found: wishlist 123");

        let err = AppError::Database(RepositoryError::NotFound);
        assert_eq!(err.to_string(), "Database error: not found");
    }

    #[test]
    fn test_app_error_status_codes() {
        // Test that errors map to correct HTTP status codes
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Validation(ItemDraftError::EmptyName)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = AppError::NotFound("gone".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.error, "gone");
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response =
            AppError::Internal("connection pool exhausted at 10.0.0.3".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.error, "Internal server error");
    }
}
