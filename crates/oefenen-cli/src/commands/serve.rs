//! The `oefenen serve` command.

use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(config_path: Option<PathBuf>, bind: Option<String>) -> Result<()> {
    let mut config = oefenen_proxy::load_config_from(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.bind = bind;
    }

    if config.chat.api_key.is_none() {
        tracing::warn!("no chat API key configured; /api/chat needs a bearer token from callers");
    }
    tracing::debug!(?config, "loaded proxy config");

    oefenen_proxy::serve(config).await
}
