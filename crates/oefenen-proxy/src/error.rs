//! Proxy error types.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors a proxy endpoint reports back to its caller.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The endpoint does not accept this HTTP method.
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    /// A required query parameter is missing or empty.
    #[error("missing required query parameter: {0}")]
    MissingParameter(&'static str),

    /// The query string could not be decoded.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The request body could not be understood.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The target URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The target URL uses a scheme other than http or https.
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    /// No bearer token on the request and no key configured.
    #[error("missing API credentials")]
    MissingCredentials,

    /// The target host is not on the allow-list.
    #[error("host not allowed: {0}")]
    HostNotAllowed(String),

    /// The upstream request failed before a response arrived.
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingParameter(_)
            | ProxyError::InvalidQuery(_)
            | ProxyError::InvalidBody(_)
            | ProxyError::InvalidUrl(_)
            | ProxyError::UnsupportedScheme(_) => StatusCode::BAD_REQUEST,
            ProxyError::MissingCredentials => StatusCode::UNAUTHORIZED,
            ProxyError::HostNotAllowed(_) => StatusCode::FORBIDDEN,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("rejected request: {self}");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<QueryRejection> for ProxyError {
    fn from(rejection: QueryRejection) -> Self {
        ProxyError::InvalidQuery(rejection.body_text())
    }
}

/// Map a transport-level `reqwest` failure to a short upstream error.
pub(crate) fn upstream_error(err: &reqwest::Error, timeout_secs: u64) -> ProxyError {
    if err.is_timeout() {
        ProxyError::Upstream(format!("timed out after {timeout_secs}s"))
    } else if err.is_connect() {
        ProxyError::Upstream("could not connect to upstream".to_string())
    } else {
        ProxyError::Upstream("request to upstream failed".to_string())
    }
}
