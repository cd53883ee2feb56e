//! Client configuration
//!
//! Resolved once at startup from built-in defaults, an optional
//! `~/.metro/config.yaml`, and the `METRO_API_URL` environment variable
//! (highest precedence). The result is immutable and handed to every client.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{BASE_URL_ENV, CONFIG_DIR_NAME, DEFAULT_BASE_URL};

const CONFIG_FILE: &str = "config.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin plus `/api` prefix, without a trailing slash
    base_url: String,
    /// Per-request timeout in milliseconds; `None` or 0 leaves it to the transport
    request_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: normalize(base_url.into()),
            request_timeout_ms: None,
        }
    }

    /// Load from the user's config directory and environment
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir(), std::env::var(BASE_URL_ENV).ok())
    }

    /// Load from `dir/config.yaml`, then apply `env_override` if set
    pub fn load_from(dir: &Path, env_override: Option<String>) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str::<ClientConfig>(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            ClientConfig::default()
        };

        if let Some(url) = env_override.filter(|u| !u.trim().is_empty()) {
            config.base_url = url;
        }
        config.base_url = normalize(config.base_url);

        tracing::info!(base_url = %config.base_url, "Client configuration loaded");
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    /// Absolute URL for an endpoint path such as `/me`
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// `~/.metro`, or `./.metro` when there is no home directory
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}
