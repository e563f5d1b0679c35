//! oefenen-proxy: thin HTTP proxy endpoints for the oefenen web app.
//!
//! Two independent handlers: one rewrites legacy text-generation requests
//! into chat completions for a hosted LLM, one relays allow-listed news
//! feeds. Neither keeps state between requests.

pub mod chat;
pub mod config;
pub mod error;
pub mod news;
mod relay;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::{any, get};
use axum::{Json, Router};

pub use config::{load_config, load_config_from, ProxyConfig};
pub use error::ProxyError;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("oefenen-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

/// Build the proxy router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", any(chat::handle))
        .route("/api/news", any(news::handle))
        .route("/health", get(health))
        .layer(from_fn(log_request))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "handled request"
    );
    response
}

/// Bind to the configured address and serve until the process is stopped.
pub async fn serve(config: ProxyConfig) -> Result<()> {
    let bind = config.bind.clone();
    let state = AppState::new(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!("oefenen proxy listening on http://{bind}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
