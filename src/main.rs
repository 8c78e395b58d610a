//! HTTP server for the Residency Engine.
//!
//! Environment:
//! - `RESIDENCY_CONFIG_DIR`: rule configuration directory (default `./config/default`)
//! - `PORT`: listen port (default 3000)
//! - `RUST_LOG`: tracing filter (default `residency_engine=info`)

use std::net::SocketAddr;

use residency_engine::api::{AppState, create_router};
use residency_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "residency_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("RESIDENCY_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let port = match std::env::var("PORT") {
        Ok(value) => value.parse::<u16>()?,
        Err(_) => DEFAULT_PORT,
    };

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        rule = %config.rule().code,
        threshold_days = config.thresholds().threshold_days,
        config_dir = %config_dir,
        "Loaded rule configuration"
    );

    let app = create_router(AppState::new(config));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Residency engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
