//! RSVP form logic
//!
//! [`RsvpForm`] is the pure state machine:
//! `Idle -> Validating -> Submitting -> Submitted | Failed`, with a
//! user-initiated reset back to `Idle`. [`RsvpController`] drives it against
//! a [`SubmissionTransport`] and guarantees at most one request in flight.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use networking::{RsvpPayload, SubmissionResult, SubmissionTransport};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// Shown when the name is blank
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields";

/// Shown when the transport reports a failure
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// RSVP error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsvpError {
    /// The form did not pass validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A submission is already in flight
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// A result arrived with no submission in flight
    #[error("No submission in progress")]
    NotSubmitting,

    /// Unrecognized unknown-outcome policy
    #[error("Invalid unknown-outcome policy: {0}")]
    InvalidPolicy(String),
}

/// Result type for RSVP operations
pub type Result<T> = std::result::Result<T, RsvpError>;

/// Form status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsvpStatus {
    /// Editable, nothing in flight
    Idle,
    /// Checking the fields
    Validating,
    /// Request in flight; submit is disabled
    Submitting,
    /// The submission was accepted (or assumed accepted)
    Submitted,
    /// The transport reported a failure
    Failed(String),
}

/// How to treat a delivery whose outcome cannot be observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownOutcomePolicy {
    /// Assume the endpoint received it
    #[default]
    TreatAsSuccess,
    /// Ask the guest to try again
    TreatAsFailure,
}

impl fmt::Display for UnknownOutcomePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownOutcomePolicy::TreatAsSuccess => write!(f, "success"),
            UnknownOutcomePolicy::TreatAsFailure => write!(f, "failure"),
        }
    }
}

impl FromStr for UnknownOutcomePolicy {
    type Err = RsvpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" | "treat-as-success" => Ok(UnknownOutcomePolicy::TreatAsSuccess),
            "failure" | "treat-as-failure" => Ok(UnknownOutcomePolicy::TreatAsFailure),
            other => Err(RsvpError::InvalidPolicy(other.to_string())),
        }
    }
}

/// Acknowledgment shown after a confirmed submission
pub fn acknowledgment(name: &str) -> String {
    format!("Thank you {name}! Your RSVP has been received.")
}

/// RSVP form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpForm {
    name: String,
    phone: String,
    status: RsvpStatus,
    error: Option<String>,
    acknowledgment: Option<String>,
    pending: Option<RsvpPayload>,
}

impl Default for RsvpForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RsvpForm {
    /// Empty form in `Idle`
    pub fn new() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            status: RsvpStatus::Idle,
            error: None,
            acknowledgment: None,
            pending: None,
        }
    }

    /// Guest name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Guest phone number
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Current status
    pub fn status(&self) -> &RsvpStatus {
        &self.status
    }

    /// Error message to display, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Acknowledgment of the last confirmed submission
    pub fn acknowledgment(&self) -> Option<&str> {
        self.acknowledgment.as_deref()
    }

    /// Whether a request is in flight
    pub fn is_submitting(&self) -> bool {
        self.status == RsvpStatus::Submitting
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    /// Edit the name; clears any error
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.error = None;
    }

    /// Edit the phone number; clears any error
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
        self.error = None;
    }

    /// Validate and enter `Submitting`, returning the payload to send.
    ///
    /// A blank name sets the error message and leaves the form `Idle`.
    pub fn begin_submit(&mut self) -> Result<RsvpPayload> {
        if self.is_submitting() {
            return Err(RsvpError::AlreadySubmitting);
        }

        self.status = RsvpStatus::Validating;
        if self.name.trim().is_empty() {
            self.status = RsvpStatus::Idle;
            self.error = Some(VALIDATION_MESSAGE.to_string());
            return Err(RsvpError::Validation(VALIDATION_MESSAGE.to_string()));
        }

        let payload = RsvpPayload::new(self.name.clone(), self.phone.clone());
        self.status = RsvpStatus::Submitting;
        self.error = None;
        self.acknowledgment = None;
        self.pending = Some(payload.clone());
        Ok(payload)
    }

    /// Apply the transport's answer to the in-flight submission
    pub fn finish_submit(
        &mut self,
        result: SubmissionResult,
        policy: UnknownOutcomePolicy,
    ) -> Result<&RsvpStatus> {
        let payload = self.pending.take().ok_or(RsvpError::NotSubmitting)?;

        let failure = match result {
            SubmissionResult::Success => None,
            SubmissionResult::Unknown => match policy {
                UnknownOutcomePolicy::TreatAsSuccess => None,
                UnknownOutcomePolicy::TreatAsFailure => Some("delivery unconfirmed".to_string()),
            },
            SubmissionResult::Failure(reason) => Some(reason),
        };

        match failure {
            None => {
                self.acknowledgment = Some(acknowledgment(&payload.name));
                self.name.clear();
                self.phone.clear();
                self.error = None;
                self.status = RsvpStatus::Submitted;
            }
            Some(reason) => {
                self.error = Some(FAILURE_MESSAGE.to_string());
                self.status = RsvpStatus::Failed(reason);
            }
        }
        Ok(&self.status)
    }

    /// Return to `Idle` ("submit another response"). Never touches the network.
    pub fn reset(&mut self) -> Result<()> {
        if self.is_submitting() {
            return Err(RsvpError::AlreadySubmitting);
        }
        self.status = RsvpStatus::Idle;
        self.error = None;
        self.acknowledgment = None;
        Ok(())
    }
}

/// Drives an [`RsvpForm`] against a transport
#[derive(Clone)]
pub struct RsvpController {
    form: Arc<RwLock<RsvpForm>>,
    transport: Arc<dyn SubmissionTransport>,
    policy: UnknownOutcomePolicy,
}

impl fmt::Debug for RsvpController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsvpController")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RsvpController {
    /// Create a controller with an empty form
    pub fn new(transport: Arc<dyn SubmissionTransport>) -> Self {
        Self {
            form: Arc::new(RwLock::new(RsvpForm::new())),
            transport,
            policy: UnknownOutcomePolicy::default(),
        }
    }

    /// Set the unknown-outcome policy
    pub fn with_policy(mut self, policy: UnknownOutcomePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Unknown-outcome policy in effect
    pub fn policy(&self) -> UnknownOutcomePolicy {
        self.policy
    }

    /// Copy of the current form
    pub async fn snapshot(&self) -> RsvpForm {
        self.form.read().await.clone()
    }

    /// Current status
    pub async fn status(&self) -> RsvpStatus {
        self.form.read().await.status().clone()
    }

    /// Edit the name
    pub async fn set_name(&self, name: impl Into<String>) {
        self.form.write().await.set_name(name);
    }

    /// Edit the phone number
    pub async fn set_phone(&self, phone: impl Into<String>) {
        self.form.write().await.set_phone(phone);
    }

    /// Return the form to `Idle`
    pub async fn reset(&self) -> Result<()> {
        self.form.write().await.reset()
    }

    /// Validate and submit once.
    ///
    /// Rejected without a transport call when validation fails or another
    /// submission is in flight. The request runs on its own task, so dropping
    /// the returned future does not cancel it; the form still settles.
    pub async fn submit(&self) -> Result<RsvpStatus> {
        let payload = {
            let mut form = self.form.write().await;
            match form.begin_submit() {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::debug!(error = %e, "rsvp submission rejected");
                    return Err(e);
                }
            }
        };

        tracing::info!("submitting rsvp");
        let form = Arc::clone(&self.form);
        let transport = Arc::clone(&self.transport);
        let policy = self.policy;
        let request = tokio::spawn(async move {
            let result = transport.submit(&payload).await;
            finish(&form, result, policy).await
        });

        match request.await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, "rsvp submission task failed");
                finish(&self.form, SubmissionResult::Failure(e.to_string()), policy).await
            }
        }
    }
}

async fn finish(
    form: &RwLock<RsvpForm>,
    result: SubmissionResult,
    policy: UnknownOutcomePolicy,
) -> Result<RsvpStatus> {
    let mut form = form.write().await;
    let status = form.finish_submit(result, policy)?.clone();
    match &status {
        RsvpStatus::Failed(reason) => tracing::warn!(reason = %reason, "rsvp failed"),
        _ => tracing::info!("rsvp submitted"),
    }
    Ok(status)
}
