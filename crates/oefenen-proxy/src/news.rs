//! News feed proxy.
//!
//! Fetches a feed on behalf of the browser, which cannot read the feeds
//! directly because of CORS. Only http(s) URLs on allow-listed hosts are
//! fetched.

use std::time::Duration;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, Method};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::config::NewsConfig;
use crate::error::{upstream_error, ProxyError};
use crate::relay::relay;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    #[serde(default)]
    pub url: Option<String>,
}

/// Check a requested feed URL against the scheme and host rules.
pub fn validate_target(raw: Option<&str>, config: &NewsConfig) -> Result<Url, ProxyError> {
    let raw = raw
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ProxyError::MissingParameter("url"))?;

    let url = Url::parse(raw).map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProxyError::UnsupportedScheme(url.scheme().to_string()));
    }

    let host = url
        .host_str()
        .ok_or_else(|| ProxyError::InvalidUrl("url has no host".to_string()))?;
    if !config.is_allowed(host) {
        return Err(ProxyError::HostNotAllowed(host.to_string()));
    }

    Ok(url)
}

/// `/api/news?url=<feed>`
#[instrument(skip_all)]
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    query: Result<Query<NewsParams>, QueryRejection>,
) -> Result<Response, ProxyError> {
    if method != Method::GET {
        return Err(ProxyError::MethodNotAllowed(method.to_string()));
    }
    let Query(params) = query?;

    let news = &state.config.news;
    let target = validate_target(params.url.as_deref(), news)?;
    tracing::info!(url = %target, "fetching news feed");

    let upstream = state
        .client
        .get(target)
        .timeout(Duration::from_secs(news.timeout_secs))
        .send()
        .await
        .map_err(|e| upstream_error(&e, news.timeout_secs))?;

    let success = upstream.status().is_success();
    let mut response = relay(upstream, "application/xml").await?;

    if success {
        let directive = format!("public, max-age={}", news.cache_max_age_secs);
        if let Ok(value) = HeaderValue::from_str(&directive) {
            response.headers_mut().insert(CACHE_CONTROL, value);
        }
    }

    Ok(response)
}
