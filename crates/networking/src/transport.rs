//! Submission transport contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// RSVP wire payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpPayload {
    /// Guest name
    pub name: String,
    /// Guest phone number
    pub phone: String,
}

impl RsvpPayload {
    /// Create a payload
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Outcome of one delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The endpoint acknowledged the submission
    Success,
    /// Delivery failed in a way the transport could observe
    Failure(String),
    /// The request left, but the transport cannot observe the outcome
    Unknown,
}

impl SubmissionResult {
    /// Whether the endpoint positively acknowledged the submission
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success)
    }
}

/// Delivers an RSVP. Exactly one request per call; no retries.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Deliver the payload
    async fn submit(&self, payload: &RsvpPayload) -> SubmissionResult;
}
