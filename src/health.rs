use anyhow::{Context as _, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;

use crate::log;

async fn health() -> &'static str {
    "Bot is running!"
}

pub fn router() -> Router {
    Router::new().route("/", get(health))
}

/// Answers the hosting platform's health check. Shares no state with the
/// bot; runs until the process exits.
pub async fn serve(port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind health listener on {addr}"))?;

    log::info(format!("Health endpoint listening on {addr}"));

    axum::serve(listener, router())
        .await
        .context("Health server error")
}
