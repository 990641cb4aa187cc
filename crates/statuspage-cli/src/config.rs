//! Configuration loading and types

use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};
use statuspage_client::{ClientConfig, DEFAULT_BASE_URL};

/// Top-level configuration for the statuspage CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// API connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key, usually supplied through `STATUSPAGE_API_KEY` instead
    pub api_key: Option<String>,
    /// Page used when a command is not given `--page`
    pub page_id: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("page_id", &self.page_id)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            page_id: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    pub fn load_default() -> eyre::Result<Self> {
        if let Ok(path) = std::env::var("STATUSPAGE_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        let paths = [
            Some(PathBuf::from("statuspage.toml")),
            dirs::config_dir().map(|p| p.join("statuspage/statuspage.toml")),
        ];

        for path in paths.into_iter().flatten() {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Config::default())
    }

    /// Apply `STATUSPAGE_*` environment overrides
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup("STATUSPAGE_API_KEY") {
            self.api.api_key = Some(key);
        }
        if let Some(page) = lookup("STATUSPAGE_PAGE_ID") {
            self.api.page_id = Some(page);
        }
        if let Some(url) = lookup("STATUSPAGE_BASE_URL") {
            self.api.base_url = url;
        }
        self
    }

    /// Build the client configuration
    ///
    /// # Errors
    /// Returns error if no API key is configured
    pub fn client_config(&self) -> eyre::Result<ClientConfig> {
        let api_key = self
            .api
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| eyre!("no API key configured; set STATUSPAGE_API_KEY"))?;

        Ok(ClientConfig::new(api_key)
            .with_base_url(self.api.base_url.clone())
            .with_timeout(Duration::from_secs(self.api.timeout_secs)))
    }

    /// Resolve the page to operate on
    ///
    /// # Errors
    /// Returns error if neither the flag nor the config provides one
    pub fn page_id(&self, flag: Option<String>) -> eyre::Result<String> {
        flag.or_else(|| self.api.page_id.clone())
            .ok_or_else(|| eyre!("no page given; pass --page or set STATUSPAGE_PAGE_ID"))
    }
}
