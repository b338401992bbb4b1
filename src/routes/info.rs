//! Root endpoint describing the running instance.
//!
//! Returns the instance identity (hostname, environment, version) together
//! with a `deployment_info` object. Deployment defaults are computed per
//! request; if a version descriptor file exists on disk and parses as JSON,
//! its top-level keys are merged in, overriding the defaults on collision.
//! A missing or broken descriptor is ignored so a bad deployment artifact
//! can never take the endpoint down.

use std::io::ErrorKind;
use std::path::Path;

use axum::{extract::State, response::Json};
use chrono::Local;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{DEPLOYED_AT_FORMAT, GREETING_MESSAGE};
use crate::error::AppError;
use crate::state::{iso_now, AppState};

/// Identity payload returned by `GET /`. Field order is the serialized
/// key order.
#[derive(Debug, Serialize)]
pub struct InfoPayload {
    pub message: String,
    pub timestamp: String,
    pub version: String,
    pub environment: String,
    pub hostname: String,
    pub status: String,
    pub deployment_info: Map<String, Value>,
}

/// Root endpoint handler.
pub async fn index(State(state): State<AppState>) -> Result<Json<InfoPayload>, AppError> {
    let hostname = hostname::get()?.to_string_lossy().into_owned();

    Ok(Json(InfoPayload {
        message: GREETING_MESSAGE.to_string(),
        timestamp: iso_now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        hostname,
        status: "success".to_string(),
        deployment_info: deployment_info(&state.config.version_file),
    }))
}

/// Builds the `deployment_info` object: computed defaults, then any keys
/// from the on-disk version descriptor.
fn deployment_info(version_file: &Path) -> Map<String, Value> {
    let mut info = Map::new();
    info.insert(
        "deployed_at".to_string(),
        Value::String(Local::now().format(DEPLOYED_AT_FORMAT).to_string()),
    );
    info.insert(
        "runtime_version".to_string(),
        Value::String(env!("CARGO_PKG_RUST_VERSION").to_string()),
    );
    info.insert(
        "platform".to_string(),
        Value::String(std::env::consts::OS.to_string()),
    );

    match std::fs::read_to_string(version_file) {
        Ok(contents) => match serde_json::from_str::<Map<String, Value>>(&contents) {
            Ok(descriptor) => {
                for (key, value) in descriptor {
                    info.insert(key, value);
                }
            }
            Err(error) => {
                tracing::debug!(
                    path = %version_file.display(),
                    %error,
                    "Ignoring unparseable version descriptor"
                );
            }
        },
        // Absent descriptor is the normal case
        Err(error) if error.kind() == ErrorKind::NotFound => {}
        Err(error) => {
            tracing::debug!(
                path = %version_file.display(),
                %error,
                "Ignoring unreadable version descriptor"
            );
        }
    }

    info
}
