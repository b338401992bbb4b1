//! Beacon - deployment-sample HTTP status service.
//!
//! A small HTTP responder used as a CI/CD deployment sample. It reports
//! instance identity (hostname, timestamp, version, environment) on `/`
//! and a liveness payload with uptime on `/health`.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
