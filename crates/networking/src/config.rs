//! Transport configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{NetworkError, Result};

/// Environment variable holding the submission endpoint
pub const ENV_ENDPOINT: &str = "RSVP_ENDPOINT_URL";
/// Environment variable selecting the delivery mode
pub const ENV_MODE: &str = "RSVP_DELIVERY_MODE";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT: &str = "RSVP_TIMEOUT_SECS";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How submissions are delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    /// The response status is observed and reported
    #[default]
    Direct,
    /// The request is dispatched as a simple cross-origin request whose
    /// response cannot be read
    FireAndForget,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Direct => write!(f, "direct"),
            DeliveryMode::FireAndForget => write!(f, "fire-and-forget"),
        }
    }
}

impl FromStr for DeliveryMode {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(DeliveryMode::Direct),
            "fire-and-forget" | "fire_and_forget" | "no-cors" => Ok(DeliveryMode::FireAndForget),
            other => Err(NetworkError::InvalidMode(other.to_string())),
        }
    }
}

/// Configuration for a submission transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Endpoint receiving the POST
    pub endpoint_url: String,
    /// Delivery mode
    pub mode: DeliveryMode,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl TransportConfig {
    /// Create a direct-mode config for an endpoint
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            mode: DeliveryMode::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("wedding-invitation/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the delivery mode
    pub fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Read the config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through a variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENV_ENDPOINT)
            .filter(|value| !value.trim().is_empty())
            .ok_or(NetworkError::MissingEndpoint(ENV_ENDPOINT))?;

        let mut config = Self::new(endpoint.trim());

        if let Some(mode) = lookup(ENV_MODE) {
            config.mode = mode.parse()?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT) {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| NetworkError::InvalidTimeout(secs.clone()))?;
            config.timeout = Duration::from_secs(parsed);
        }

        config.endpoint()?;
        Ok(config)
    }

    /// Parse and check the endpoint URL
    pub fn endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint_url)
            .map_err(|e| NetworkError::InvalidEndpoint(format!("{}: {e}", self.endpoint_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(NetworkError::InvalidEndpoint(format!(
                "unsupported scheme '{scheme}'"
            ))),
        }
    }
}
