//! Turning an upstream `reqwest` response into an axum response.

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};

use crate::error::ProxyError;

/// Relay status, content type and body of an upstream response verbatim.
///
/// `fallback_content_type` is used when the upstream sent none.
pub(crate) async fn relay(
    upstream: reqwest::Response,
    fallback_content_type: &'static str,
) -> Result<Response, ProxyError> {
    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(fallback_content_type));

    let body = upstream
        .bytes()
        .await
        .map_err(|_| ProxyError::Upstream("failed to read upstream body".to_string()))?;

    tracing::debug!(%status, bytes = body.len(), "relaying upstream response");

    let mut response = (status, body).into_response();
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    Ok(response)
}
