//! Errors raised while sending the contact message

use crate::config::MissingSetting;
use thiserror::Error;

/// Why a contact message could not be delivered
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Credentials were incomplete, so no request was attempted
    #[error("mailer is not configured: {0}")]
    MissingConfig(#[from] MissingSetting),

    /// The request never got a response
    #[error("failed to reach the email service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("email service rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}
