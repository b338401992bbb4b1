//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe used by CodeDeploy validation hooks, load
//! balancers, and anything else that needs to know the process is serving.

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::{iso_now, AppState};

/// Liveness payload returned by `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthPayload {
    pub status: String,
    pub timestamp: String,
    /// Seconds since process launch; monotonically non-decreasing
    pub uptime: f64,
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "healthy".to_string(),
        timestamp: iso_now(),
        uptime: state.uptime(),
    })
}
