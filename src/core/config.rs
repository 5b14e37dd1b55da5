//! Configuration management

use reqwest::Url;
use tracing::info;

use crate::core::errors::{DeepLError, Result};

/// Base URL of the DeepL API v2
pub const DEFAULT_BASE_URL: &str = "https://api.deepl.com/v2";

/// Base URL of the DeepL API v2 for free-tier accounts
pub const FREE_BASE_URL: &str = "https://api-free.deepl.com/v2";

/// Environment variable holding the auth key
pub const AUTH_KEY_ENV: &str = "DEEPL_AUTH_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "DEEPL_BASE_URL";

/// Configuration for [`DeepLClient`](crate::DeepLClient)
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub auth_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for the default endpoint
    pub fn new(auth_key: impl Into<String>) -> Self {
        Self {
            auth_key: auth_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Configuration for the free-tier endpoint
    pub fn free(auth_key: impl Into<String>) -> Self {
        Self::new(auth_key).with_base_url(FREE_BASE_URL)
    }

    /// Override the base URL requests are sent to
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Combine explicit values with the environment
    ///
    /// An explicit value wins over its environment variable. The auth key
    /// must come from one of the two; the base URL falls back to
    /// [`DEFAULT_BASE_URL`].
    pub fn resolve(auth_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let auth_key = match auth_key {
            Some(auth_key) => auth_key,
            None => std::env::var(AUTH_KEY_ENV).map_err(|_| {
                config_error(format!("{} environment variable is required", AUTH_KEY_ENV))
            })?,
        };

        let mut config = Self::new(auth_key);
        match base_url {
            Some(base_url) => config = config.with_base_url(base_url),
            None => {
                if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
                    info!("Using base URL from {}: {}", BASE_URL_ENV, base_url);
                    config = config.with_base_url(base_url);
                }
            }
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth_key.is_empty() {
            return Err(config_error("auth key is required"));
        }

        if self.base_url.is_empty() {
            return Err(config_error("base URL is required"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| config_error(format!("invalid base URL {}: {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(config_error(format!(
                "unsupported base URL scheme: {}",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// URL of the translate endpoint
    pub fn translate_url(&self) -> String {
        format!("{}/translate", self.base_url.trim_end_matches('/'))
    }
}

fn config_error(message: impl Into<String>) -> DeepLError {
    DeepLError::ConfigError {
        message: message.into(),
    }
}
