//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::Instant;

use chrono::Local;

use crate::config::{AppConfig, TIMESTAMP_FORMAT};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the application configuration and the launch-time snapshot taken
/// once at startup. The snapshot is the only value shared across requests
/// and is immutable for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    started_at: Instant,
}

impl AppState {
    /// Creates a new application state from the given configuration,
    /// capturing the launch time.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Seconds elapsed since process launch.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

/// Current local time formatted as an ISO-8601 timestamp.
pub fn iso_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
