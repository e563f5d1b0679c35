//! Proxy configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Hosts the news proxy may fetch from unless configured otherwise.
pub const DEFAULT_NEWS_HOSTS: [&str; 4] = [
    "feeds.nos.nl",
    "www.nu.nl",
    "www.rtlnieuws.nl",
    "feeds.rtl.nl",
];

/// Settings for the LLM chat proxy.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Key used when the caller sends no bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_chat_url")]
    pub base_url: String,
    #[serde(default = "default_chat_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_chat_url(),
            timeout_secs: default_chat_timeout(),
        }
    }
}

/// Settings for the news feed proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_hosts")]
    pub allowed_hosts: Vec<String>,
    #[serde(default = "default_news_timeout")]
    pub timeout_secs: u64,
    /// `max-age` sent with successfully relayed feeds.
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: default_news_hosts(),
            timeout_secs: default_news_timeout(),
            cache_max_age_secs: default_cache_max_age(),
        }
    }
}

impl NewsConfig {
    pub fn is_allowed(&self, host: &str) -> bool {
        self.allowed_hosts
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(host))
    }
}

/// Top-level oefenen proxy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Address the server listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub news: NewsConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            chat: ChatConfig::default(),
            news: NewsConfig::default(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_chat_url() -> String {
    "https://api.openai.com".to_string()
}
fn default_chat_timeout() -> u64 {
    60
}
fn default_news_hosts() -> Vec<String> {
    DEFAULT_NEWS_HOSTS.iter().map(|h| h.to_string()).collect()
}
fn default_news_timeout() -> u64 {
    15
}
fn default_cache_max_age() -> u64 {
    300
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `oefenen.toml` in the current directory
/// 2. `~/.config/oefenen/config.toml`
///
/// Environment variable override: `OEFENEN_OPENAI_KEY`.
pub fn load_config() -> Result<ProxyConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ProxyConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("oefenen.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ProxyConfig::default(),
    };

    Ok(apply_env(config))
}

/// Parse a TOML config string without touching the filesystem.
pub fn parse_config_str(content: &str) -> Result<ProxyConfig> {
    Ok(toml::from_str::<ProxyConfig>(content)?)
}

fn apply_env(mut config: ProxyConfig) -> ProxyConfig {
    if let Ok(key) = std::env::var("OEFENEN_OPENAI_KEY") {
        config.chat.api_key = Some(key);
    }

    config.chat.api_key = config
        .chat
        .api_key
        .as_deref()
        .map(resolve_env_vars)
        .filter(|k| !k.trim().is_empty());
    config.chat.base_url = resolve_env_vars(&config.chat.base_url);
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("oefenen"))
}
