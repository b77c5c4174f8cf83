mod config;
mod errors;
mod features;
mod ml;
mod models;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ml::train_snapshot;
use crate::routes::build_router;
use crate::state::{AppState, ModelHandle};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Readiness API v{}", env!("CARGO_PKG_VERSION"));

    // Train the initial model before accepting traffic. A failure here is
    // fatal: the service never serves predictions without a model.
    let snapshot = train_snapshot(&config.training)?;
    info!(
        "Initial model ready (version {}, seed {})",
        snapshot.version, config.training.seed
    );

    let model = ModelHandle::new();
    model.install(snapshot);

    // Build app state
    let state = AppState {
        config: config.clone(),
        model,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
