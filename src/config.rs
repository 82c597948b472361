//! Application configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use app_core::UnknownOutcomePolicy;
use app_ui::gesture_tokens::SWIPE_THRESHOLD;
use networking::{NetworkError, TransportConfig};

/// Reference image sampled for the theme color
pub const ENV_REFERENCE_IMAGE: &str = "INVITATION_REFERENCE_IMAGE";
/// Drag distance that triggers navigation, in pixels
pub const ENV_SWIPE_THRESHOLD: &str = "INVITATION_SWIPE_THRESHOLD";
/// `success` or `failure`
pub const ENV_UNKNOWN_POLICY: &str = "RSVP_UNKNOWN_POLICY";
/// Set to `1` or `true` to skip loading `.env`
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";

/// Default reference image
pub const DEFAULT_REFERENCE_IMAGE: &str = "img/image3.png";

/// Default viewport width, a phone in portrait
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 375;

/// Configuration for [`crate::InvitationApp`]
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Image the theme color is sampled from
    pub reference_image: PathBuf,
    /// Submission transport; `None` when no endpoint is configured
    pub transport: Option<TransportConfig>,
    /// How unobservable deliveries are treated
    pub unknown_policy: UnknownOutcomePolicy,
    /// Drag distance that triggers navigation
    pub swipe_threshold: f32,
    /// Viewport width in CSS pixels
    pub viewport_width: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reference_image: PathBuf::from(DEFAULT_REFERENCE_IMAGE),
            transport: None,
            unknown_policy: UnknownOutcomePolicy::default(),
            swipe_threshold: SWIPE_THRESHOLD,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }
}

impl AppConfig {
    /// Set the reference image
    pub fn with_reference_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_image = path.into();
        self
    }

    /// Set the transport
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the unknown-outcome policy
    pub fn with_unknown_policy(mut self, policy: UnknownOutcomePolicy) -> Self {
        self.unknown_policy = policy;
        self
    }

    /// Set the swipe threshold
    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Set the viewport width
    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Load `.env` (unless disabled) and read the process environment
    pub fn from_env() -> Result<Self> {
        let disabled = std::env::var(ENV_DOTENV_DISABLED).ok();
        if !matches!(disabled.as_deref(), Some("1") | Some("true")) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through a variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_REFERENCE_IMAGE).filter(|p| !p.trim().is_empty()) {
            config.reference_image = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(ENV_SWIPE_THRESHOLD) {
            let threshold: f32 = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SWIPE_THRESHOLD} is not a number: {raw}"))?;
            anyhow::ensure!(
                threshold.is_finite() && threshold > 0.0,
                "{ENV_SWIPE_THRESHOLD} must be positive, got {raw}"
            );
            config.swipe_threshold = threshold;
        }

        if let Some(raw) = lookup(ENV_UNKNOWN_POLICY) {
            config.unknown_policy = raw
                .parse()
                .with_context(|| format!("invalid {ENV_UNKNOWN_POLICY}"))?;
        }

        config.transport = match TransportConfig::from_lookup(&lookup) {
            Ok(transport) => Some(transport),
            Err(NetworkError::MissingEndpoint(var)) => {
                tracing::warn!(var, "no submission endpoint configured; RSVP is disabled");
                None
            }
            Err(e) => return Err(e).context("invalid transport configuration"),
        };

        Ok(config)
    }
}
