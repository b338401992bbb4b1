//! Configuration loading and constants.
//!
//! Configuration comes from environment variables (`PORT`, `ENV`, `LOG_FORMAT`),
//! with CLI flags taking priority and compiled-in defaults as the fallback.
//! `AppConfig` is the root configuration struct passed into application state.

use std::path::PathBuf;

// =============================================================================
// Defaults
// =============================================================================

/// Address the listener binds to. All interfaces, so the service is reachable
/// from load balancer health probes.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8000;

/// Default deployment environment label when `ENV` is not set
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "beacon=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Optional version descriptor dropped next to the binary by deployments.
/// Its top-level keys are merged into the `deployment_info` response object.
pub const VERSION_DESCRIPTOR_PATH: &str = "version.json";

// =============================================================================
// Response constants
// =============================================================================

/// Greeting returned by the root endpoint
pub const GREETING_MESSAGE: &str = "Hello World from CodePipeline!";

/// Health responses must never be cached by probes or intermediaries
pub const CACHE_CONTROL_HEALTH: &str = "no-cache";

/// ISO-8601 timestamp format used in response bodies and error payloads
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Timestamp format for the `deployed_at` deployment-info field
pub const DEPLOYED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind the listener to
    pub host: String,
    /// Port to bind the listener to
    pub port: u16,
    /// Deployment environment label, echoed verbatim in responses
    pub environment: String,
    /// Log format: "text" (human-readable, default) or "json" (structured)
    pub log_format: String,
    /// Path to the optional version descriptor
    pub version_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            version_file: PathBuf::from(VERSION_DESCRIPTOR_PATH),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("PORT") {
            config.port = parse_port(&raw)?;
        }
        if let Ok(env) = std::env::var("ENV") {
            config.environment = env;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.log_format = parse_log_format(&format)?;
        }

        Ok(config)
    }

    /// The `host:port` string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}

fn parse_log_format(raw: &str) -> Result<String, ConfigError> {
    match raw {
        "text" | "json" => Ok(raw.to_string()),
        _ => Err(ConfigError::InvalidLogFormat(raw.to_string())),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0:?} (expected an integer between 1 and 65535)")]
    InvalidPort(String),
    #[error("Invalid LOG_FORMAT value: {0:?} (expected \"text\" or \"json\")")]
    InvalidLogFormat(String),
}
