//! Client configuration

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

/// Public StatusPage.io management API
pub const DEFAULT_BASE_URL: &str = "https://api.statuspage.io/v1/";

/// Settings for a [`StatusPageClient`](crate::StatusPageClient)
///
/// Populated by the caller from whatever secret source it uses; the client
/// never reads the environment or files itself.
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent as `Authorization: OAuth <key>` on every request
    pub api_key: String,
    /// Base endpoint, all resource paths are resolved against it
    pub base_url: String,
    /// Total time allowed for a single request
    pub timeout: Duration,
    /// Time allowed for establishing the connection
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// Refuse plain `http://` endpoints
    pub https_only: bool,
}

impl ClientConfig {
    /// Configuration for the public API with default timeouts
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("statuspage-client/{}", env!("CARGO_PKG_VERSION")),
            https_only: true,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Allow `http://` base URLs, for local mock servers
    #[must_use]
    pub fn allow_http(mut self) -> Self {
        self.https_only = false;
        self
    }

    /// Parse and normalize the base URL
    ///
    /// The result always ends in `/` so that relative paths join below it.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid, or is not HTTPS while
    /// `https_only` is set.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if self.https_only && url.scheme() != "https" {
            return Err(ClientError::Config(format!(
                "base URL must use https: {}",
                self.base_url
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("https_only", &self.https_only)
            .finish()
    }
}
