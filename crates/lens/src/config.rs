use anyhow::Context;
use inci_protocol::config::{LensConfig, ScrapeConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;

const DEFAULT_CONFIG_PATH: &str = "~/.inci-lens/config.toml";

pub(crate) struct Settings {
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
    pub(crate) scrape: ScrapeConfig,
}

/// Reads the config file. An explicitly named file must exist; the default one is optional.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<LensConfig> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (expand_tilde(DEFAULT_CONFIG_PATH), false),
    };
    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(LensConfig::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: LensConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

pub(crate) fn resolve_settings(args: &Args, config: LensConfig) -> anyhow::Result<Settings> {
    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or(config.api.endpoint)
        .trim()
        .to_string();
    if endpoint.is_empty() {
        anyhow::bail!("api endpoint cannot be empty");
    }
    reqwest::Url::parse(&endpoint).with_context(|| format!("invalid api endpoint {endpoint}"))?;

    let timeout_ms = args.timeout_ms.unwrap_or(config.api.timeout_ms);
    if timeout_ms == 0 {
        anyhow::bail!("timeout_ms must be greater than zero");
    }

    Ok(Settings {
        endpoint,
        timeout: Duration::from_millis(timeout_ms),
        scrape: config.scrape,
    })
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
