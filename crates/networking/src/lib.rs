//! Networking for the wedding invitation
//!
//! This crate delivers RSVP submissions to a configured endpoint, either
//! directly (the HTTP status is observed) or fire-and-forget (the outcome is
//! unknowable and reported as such).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod transport;

use thiserror::Error;

pub use client::{
    build_transport, DisabledTransport, FireAndForgetTransport, HttpTransport, DISABLED_REASON,
};
pub use config::{DeliveryMode, TransportConfig};
pub use transport::{RsvpPayload, SubmissionResult, SubmissionTransport};

/// Errors raised while configuring a transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// No endpoint was configured
    #[error("Submission endpoint is not configured (set {0})")]
    MissingEndpoint(&'static str),

    /// Endpoint is not an absolute http(s) URL
    #[error("Invalid submission endpoint: {0}")]
    InvalidEndpoint(String),

    /// Unknown delivery mode
    #[error("Invalid delivery mode: {0}")]
    InvalidMode(String),

    /// Timeout is not a positive number of seconds
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Result type for networking operations
pub type Result<T> = std::result::Result<T, NetworkError>;
