//! Beacon: a deployment-sample HTTP status service.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from the environment, sets up the Axum router, logs the
//! startup banner, and serves until a termination signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beacon::config::{AppConfig, DEFAULT_LOG_FILTER};
use beacon::http::start_server;
use beacon::routes::create_router;
use beacon::state::AppState;

/// Beacon: a deployment-sample HTTP status service
#[derive(Parser, Debug)]
#[command(name = "beacon", version, about)]
struct Args {
    /// Port to bind (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,

    /// Deployment environment label (overrides the ENV environment variable)
    #[arg(short, long)]
    environment: Option<String>,

    /// Log level filter (e.g., "beacon=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration; CLI flags override environment variables
    let mut config = AppConfig::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(environment) = args.environment {
        config.environment = environment;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Loaded configuration");

    // Startup banner
    tracing::info!(
        address = %config.bind_addr(),
        endpoint = %format!("http://localhost:{}/", config.port),
        health = %format!("http://localhost:{}/health", config.port),
        environment = %config.environment,
        pid = std::process::id(),
        "Starting beacon"
    );

    // Create application state with the launch-time snapshot
    let state = AppState::new(config.clone());

    // Create router
    let app = create_router(state);

    // Serve until SIGTERM/SIGINT; startup failures propagate and exit non-zero
    start_server(app, &config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
