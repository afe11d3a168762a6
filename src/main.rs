mod app;
mod platform;
mod routes;
mod screen;
mod services;
mod types;
mod utils;

use anyhow::Context;
use tracing::{error, info};

use crate::utils::app_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    info!("Starting placewatch...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    if !config.enable_search {
        info!("Places search disabled, tracking position only");
    }

    let state = app::gen_state(&config);
    let mount = state.screen.mount();
    let app = app::gen_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    mount.unmount().await;
    info!("Stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
