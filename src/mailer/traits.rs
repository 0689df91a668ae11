//! Trait abstraction for the email client to enable mocking in tests

use super::error::SubmitError;
use crate::state::ContactMessage;
use async_trait::async_trait;

/// Delivers a validated contact message to a remote email service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Resolve once the service has accepted the message
    async fn send(&self, message: &ContactMessage) -> Result<(), SubmitError>;
}
