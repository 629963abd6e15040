//! Reference receiver for RMS payment and refund notifications.
//!
//! Mounts the webhook routes under `/rms`, so the refund notify URL derived
//! from `RMS_CALLBACK_URL` resolves to this service.

use std::net::{Ipv4Addr, SocketAddrV4};

use anyhow::Context;
use axum::Router;
use razer_rms::{OnlineClient, OnlineConfig};
use tracing_subscriber::EnvFilter;

mod state;
/// Notification handlers
mod webhook;

fn env(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} is not defined"))
}

fn online_config() -> anyhow::Result<OnlineConfig> {
    let config = OnlineConfig::new(
        env("RMS_MERCHANT_ID")?,
        env("RMS_VERIFY_KEY")?,
        env("RMS_SECRET_KEY")?,
        env("RMS_CALLBACK_URL")?,
    )?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .init();

    match dotenvy::dotenv() {
        Ok(p) => tracing::info!(path = %p.display(), "Loaded environment variables from .env file"),
        Err(e) => tracing::warn!("Failed to load environment variables from .env: {e}"),
    };
    let config = online_config()?;
    tracing::info!(merchant_id = %config.merchant_id(), "Loaded merchant configuration");
    let state = state::AppState::new(OnlineClient::new(config)?);

    let app = Router::new()
        .nest("/rms", webhook::router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3030);

    let listener = tokio::net::TcpListener::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port))
        .await
        .with_context(|| format!("bind port {port}"))?;

    tracing::info!("Serving on port {port}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
