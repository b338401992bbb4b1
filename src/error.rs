//! Request handler errors and their HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::io;

use crate::state::iso_now;

/// Errors raised while composing a response.
///
/// Handler failures are non-fatal: the error is rendered as a 500 JSON body
/// and the serve loop keeps accepting requests.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Hostname lookup failed: {0}")]
    Hostname(#[from] io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request handler failed");

        let body = json!({
            "error": "Internal Server Error",
            "message": self.to_string(),
            "timestamp": iso_now(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn internal_error_renders_json_body() {
        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "Internal error: boom");
        assert!(body["timestamp"].is_string());
    }
}
