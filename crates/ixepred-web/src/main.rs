//! Ixepred Web Server
//!
//! Run with: cargo run -p ixepred-web

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ixepred_common::AppConfig;
use ixepred_web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ixepred=debug,info")),
        )
        .init();

    info!("Starting Ixepred calculator...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!(
        "Models directory: {} (strict alignment: {})",
        config.models.dir.display(),
        config.alignment.strict
    );
    if !config.models.dir.is_dir() {
        warn!(
            "Models directory {} does not exist; calculations will fail until artifacts are provided",
            config.models.dir.display()
        );
    }

    let state = AppState::from_config(&config);
    let app = build_router(state);

    let addr = config.server.socket_addr()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
