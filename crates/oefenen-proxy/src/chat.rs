//! LLM chat proxy.
//!
//! Accepts the legacy text-generation request shape used by the web app,
//! rewrites it as an OpenAI-style chat completion and forwards it with an
//! API key. The upstream response is relayed as-is.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{upstream_error, ProxyError};
use crate::relay::relay;
use crate::AppState;

pub const DEFAULT_MAX_TOKENS: u32 = 650;
pub const DEFAULT_TOP_P: f64 = 0.95;

#[derive(Debug, Deserialize)]
pub struct ChatParams {
    #[serde(default)]
    pub model: Option<String>,
}

/// Legacy `{inputs, parameters}` request body.
#[derive(Debug, Default, Deserialize)]
pub struct LegacyRequest {
    #[serde(default)]
    pub inputs: String,
    #[serde(default)]
    pub parameters: LegacyParameters,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyParameters {
    #[serde(default, alias = "max_new_tokens")]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub top_p: Option<f64>,
}

/// Request body sent to the chat completions endpoint.
#[derive(Debug, Serialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatCompletionRequest {
    /// Translate a legacy request, filling in defaults for missing
    /// parameters. Temperature defaults to a random value in `[0.8, 1.0)`.
    pub fn from_legacy(model: &str, legacy: LegacyRequest) -> Self {
        let params = legacy.parameters;
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: legacy.inputs,
            }],
            max_tokens: params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: params
                .temperature
                .unwrap_or_else(|| rand::thread_rng().gen_range(0.8..1.0)),
            top_p: params.top_p.unwrap_or(DEFAULT_TOP_P),
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// `/api/chat?model=<id>`
#[instrument(skip_all)]
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    query: Result<Query<ChatParams>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    if method != Method::POST {
        return Err(ProxyError::MethodNotAllowed(method.to_string()));
    }
    let Query(params) = query?;

    let model = params
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(ProxyError::MissingParameter("model"))?;

    let chat = &state.config.chat;
    let api_key = bearer_token(&headers)
        .or_else(|| chat.api_key.clone())
        .ok_or(ProxyError::MissingCredentials)?;

    let legacy: LegacyRequest = if body.is_empty() {
        LegacyRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ProxyError::InvalidBody(e.to_string()))?
    };
    let payload = ChatCompletionRequest::from_legacy(model, legacy);
    tracing::info!(model, max_tokens = payload.max_tokens, "forwarding chat completion");

    let url = format!("{}/v1/chat/completions", chat.base_url.trim_end_matches('/'));
    let upstream = state
        .client
        .post(url)
        .bearer_auth(api_key)
        .timeout(Duration::from_secs(chat.timeout_secs))
        .json(&payload)
        .send()
        .await
        .map_err(|e| upstream_error(&e, chat.timeout_secs))?;

    relay(upstream, "application/json").await
}
