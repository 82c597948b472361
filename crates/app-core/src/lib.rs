//! Core application logic for the wedding invitation
//!
//! This crate holds the RSVP form state machine and the controller that
//! submits it through a [`networking::SubmissionTransport`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod rsvp;

pub use rsvp::{
    acknowledgment, RsvpController, RsvpError, RsvpForm, RsvpStatus, UnknownOutcomePolicy,
    FAILURE_MESSAGE, VALIDATION_MESSAGE,
};
