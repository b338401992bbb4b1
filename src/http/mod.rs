//! HTTP server module.
//!
//! The server includes:
//! - Plain HTTP serving on a single bound address
//! - Graceful shutdown on SIGTERM/SIGINT with connection draining
//! - Bind-failure diagnostics for port conflicts

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
