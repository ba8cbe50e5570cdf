//! Error types for the view cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Boxed error returned by a render handle factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// == KeepAlive Error Enum ==
/// Unified error type for the view cache.
#[derive(Error, Debug)]
pub enum KeepAliveError {
    /// Capacity below one was requested
    #[error("Invalid capacity: max_cache must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// The caller's render handle factory failed
    #[error("Render creation failed for '{key}': {source}")]
    RenderCreation {
        key: String,
        #[source]
        source: BoxError,
    },

    /// Key is not cached
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// State persistence backend failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for KeepAliveError {
    fn into_response(self) -> Response {
        let status = match &self {
            KeepAliveError::NotFound(_) => StatusCode::NOT_FOUND,
            KeepAliveError::InvalidCapacity(_) | KeepAliveError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            KeepAliveError::RenderCreation { .. }
            | KeepAliveError::Persistence(_)
            | KeepAliveError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the view cache.
pub type Result<T> = std::result::Result<T, KeepAliveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (KeepAliveError::NotFound("/a".into()), StatusCode::NOT_FOUND),
            (KeepAliveError::InvalidCapacity(0), StatusCode::BAD_REQUEST),
            (
                KeepAliveError::InvalidRequest("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                KeepAliveError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_render_creation_message_includes_source() {
        let error = KeepAliveError::RenderCreation {
            key: "/orders".to_string(),
            source: "template missing".into(),
        };

        let message = error.to_string();
        assert!(message.contains("/orders"));
        assert!(message.contains("template missing"));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
