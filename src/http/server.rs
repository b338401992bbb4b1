//! HTTP server startup logic.

use std::io::ErrorKind;
use std::net::SocketAddr;

use axum::Router;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(std::io::Error),
}

/// Bind the configured address and serve until a termination signal arrives.
///
/// This function blocks until the server shuts down. On SIGTERM/SIGINT the
/// listener stops accepting, in-flight connections drain, and the function
/// returns `Ok(())` so the process can exit 0.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = config.bind_addr().parse()?;

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(source) => {
            if source.kind() == ErrorKind::AddrInUse {
                tracing::error!(%addr, "Port {} is already in use", addr.port());
                log_listening_sockets();
            }
            return Err(ServerError::Bind { addr, source });
        }
    };

    tracing::info!(%addr, "Server started");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown::shutdown_signal())
    .await
    .map_err(ServerError::Server)?;

    tracing::info!("Server stopped cleanly");
    Ok(())
}

/// Best-effort snapshot of listening sockets to help diagnose a port
/// conflict. Failure to collect the snapshot is itself ignored.
fn log_listening_sockets() {
    let Ok(output) = std::process::Command::new("ss").arg("-tuln").output() else {
        return;
    };
    if output.status.success() {
        tracing::debug!(
            sockets = %String::from_utf8_lossy(&output.stdout),
            "Current listening sockets"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::AppState;

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        // Occupy a port, then ask the server to bind the same one.
        let holder = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = holder.local_addr().unwrap().port();

        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..AppConfig::default()
        };
        let app = create_router(AppState::new(config.clone()));

        let result = start_server(app, &config).await;
        match result {
            Err(ServerError::Bind { addr, source }) => {
                assert_eq!(addr.port(), port);
                assert_eq!(source.kind(), ErrorKind::AddrInUse);
            }
            other => panic!("expected bind error, got {other:?}"),
        }
    }
}
