//! Client configuration, built directly or from environment variables.

use std::time::Duration;

/// Connection settings for one Canvas instance.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `CANVAS_BASE_URL` | (required) | API root, e.g. `https://canvas.example.edu/api/v1` |
/// | `CANVAS_ACCESS_TOKEN` | (absent) | Bearer token sent with every request |
/// | `CANVAS_AS_USER_ID` | (absent) | Act as this user (requires masquerade permission) |
/// | `CANVAS_TIMEOUT_SECS` | (absent = no timeout) | Global timeout per request |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    pub access_token: Option<String>,
    pub as_user_id: Option<String>,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub const DEFAULT_USER_AGENT: &str = concat!("canvas-core/", env!("CARGO_PKG_VERSION"));

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
            as_user_id: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_as_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.as_user_id = Some(user_id.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Populate config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Populate config from an arbitrary variable source. Empty values count
    /// as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = var("CANVAS_BASE_URL").ok_or(ConfigError::Missing("CANVAS_BASE_URL"))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: "CANVAS_BASE_URL",
                value: base_url,
            });
        }

        let timeout = match var("CANVAS_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                ConfigError::Invalid {
                    name: "CANVAS_TIMEOUT_SECS",
                    value: raw.clone(),
                }
            })?)),
            None => None,
        };

        let mut config = ClientConfig::new(&base_url);
        config.access_token = var("CANVAS_ACCESS_TOKEN");
        config.as_user_id = var("CANVAS_AS_USER_ID");
        config.timeout = timeout;
        Ok(config)
    }
}
