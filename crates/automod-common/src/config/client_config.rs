//! Client configuration
//!
//! Loads API connection settings from environment variables (and a `.env`
//! file when present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub app: AppSettings,
    pub api: ApiConfig,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Connection settings for the platform REST API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bot token sent as `Authorization: Bot <token>`
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    /// Settings for the given base URL and token, defaults elsewhere
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bot {}", self.token)
    }

    /// Absolute URL for an API path such as `/guilds/1/auto-moderation/rules`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// Default value functions
fn default_app_name() -> String {
    "automod-client".to_string()
}

fn default_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!(
        "DiscordBot ({}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

impl ClientConfig {
    /// Configuration for a given API endpoint, used by tests and embedders
    /// that do not read the environment
    pub fn new(api: ApiConfig) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::default(),
            },
            api,
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `AUTOMOD_BOT_TOKEN` is missing or a numeric
    /// variable cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let timeout_secs = match env::var("AUTOMOD_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("AUTOMOD_REQUEST_TIMEOUT_SECS", raw))?,
            Err(_) => default_timeout_secs(),
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ApiConfig {
                base_url: env::var("AUTOMOD_API_BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| default_base_url()),
                token: env::var("AUTOMOD_BOT_TOKEN")
                    .map_err(|_| ConfigError::MissingVar("AUTOMOD_BOT_TOKEN"))?,
                timeout_secs,
                user_agent: env::var("AUTOMOD_USER_AGENT")
                    .unwrap_or_else(|_| default_user_agent()),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
