//! HTTP submission transports
//!
//! Both transports POST the payload exactly once. [`HttpTransport`] reads the
//! response status; [`FireAndForgetTransport`] sends a simple request whose
//! response is opaque, so a completed dispatch is reported as
//! [`SubmissionResult::Unknown`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Url};

use crate::config::{DeliveryMode, TransportConfig};
use crate::transport::{RsvpPayload, SubmissionResult, SubmissionTransport};
use crate::{NetworkError, Result};

fn build_client(config: &TransportConfig) -> Result<ReqwestClient> {
    ReqwestClient::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| NetworkError::ClientBuild(e.to_string()))
}

/// Build the transport selected by the config
pub fn build_transport(config: &TransportConfig) -> Result<Arc<dyn SubmissionTransport>> {
    let transport: Arc<dyn SubmissionTransport> = match config.mode {
        DeliveryMode::Direct => Arc::new(HttpTransport::new(config)?),
        DeliveryMode::FireAndForget => Arc::new(FireAndForgetTransport::new(config)?),
    };
    tracing::debug!(mode = %config.mode, endpoint = %config.endpoint_url, "submission transport ready");
    Ok(transport)
}

// =============================================================================
// Direct
// =============================================================================

/// POSTs JSON and reports the response status
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint
    pub fn new(config: &TransportConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.endpoint()?,
        })
    }

    /// Endpoint receiving submissions
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn submit(&self, payload: &RsvpPayload) -> SubmissionResult {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                tracing::info!(status = response.status().as_u16(), "rsvp accepted");
                SubmissionResult::Success
            }
            Ok(response) => {
                let status = response.status();
                tracing::warn!(status = status.as_u16(), "rsvp rejected");
                SubmissionResult::Failure(format!("HTTP {status}"))
            }
            Err(e) => {
                tracing::warn!(error = %e, "rsvp request failed");
                SubmissionResult::Failure(e.to_string())
            }
        }
    }
}

// =============================================================================
// Fire-and-forget
// =============================================================================

/// POSTs the payload as a simple request and never reads the response
#[derive(Debug, Clone)]
pub struct FireAndForgetTransport {
    client: ReqwestClient,
    endpoint: Url,
}

impl FireAndForgetTransport {
    /// Create a transport for the configured endpoint
    pub fn new(config: &TransportConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.endpoint()?,
        })
    }

    /// Endpoint receiving submissions
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for FireAndForgetTransport {
    async fn submit(&self, payload: &RsvpPayload) -> SubmissionResult {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => return SubmissionResult::Failure(e.to_string()),
        };

        // text/plain keeps this a simple request; the body is still JSON
        let sent = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await;

        match sent {
            Ok(_) => {
                tracing::info!("rsvp dispatched; outcome unknown");
                SubmissionResult::Unknown
            }
            Err(e) => {
                tracing::warn!(error = %e, "rsvp dispatch failed");
                SubmissionResult::Failure(e.to_string())
            }
        }
    }
}

// =============================================================================
// Disabled
// =============================================================================

/// Reason reported when no endpoint is configured
pub const DISABLED_REASON: &str = "RSVP endpoint is not configured";

/// Stands in when no endpoint is configured; every submission fails
/// without touching the network
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTransport;

#[async_trait]
impl SubmissionTransport for DisabledTransport {
    async fn submit(&self, _payload: &RsvpPayload) -> SubmissionResult {
        tracing::warn!("rsvp submitted with no endpoint configured");
        SubmissionResult::Failure(DISABLED_REASON.to_string())
    }
}
