use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::gemini;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_CAPTION_LANG: &str = "en";

/// Contents of the optional config file; every key may be omitted
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub model: Option<String>,
    pub gemini_base_url: Option<String>,
    pub caption_lang: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from `path` if it exists
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

/// Default config file location: ~/.config/ytdigest/config.toml
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytdigest")
        .join("config.toml")
}

/// Fully resolved service settings, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind: String,
    pub log_level: String,
    pub model: String,
    pub gemini_base_url: String,
    pub caption_lang: String,
    pub http_timeout: Option<Duration>,
}

/// Values given on the command line or through the environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub model: Option<String>,
    pub gemini_base_url: Option<String>,
    pub caption_lang: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

impl Settings {
    /// Overrides win over the file, the file wins over built-in defaults
    pub fn resolve(overrides: Overrides, config: Config) -> Self {
        Self {
            bind: overrides.bind.or(config.bind).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            log_level: overrides
                .log_level
                .or(config.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            model: overrides
                .model
                .or(config.model)
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            gemini_base_url: overrides
                .gemini_base_url
                .or(config.gemini_base_url)
                .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
            caption_lang: overrides
                .caption_lang
                .or(config.caption_lang)
                .unwrap_or_else(|| DEFAULT_CAPTION_LANG.to_string()),
            http_timeout: overrides
                .http_timeout_secs
                .or(config.http_timeout_secs)
                .map(Duration::from_secs),
        }
    }

    /// Shared HTTP client for both providers
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}
