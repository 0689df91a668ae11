//! Email delivery for the contact form

mod client;
mod error;
mod traits;

use std::sync::Arc;

pub use client::EmailJsClient;
pub use error::SubmitError;
pub use traits::Mailer;

#[cfg(test)]
pub use traits::MockMailer;

use crate::config::MissingSetting;

/// A ready mailer, or the setting that kept one from being built
pub type MailerHandle = Result<Arc<dyn Mailer>, MissingSetting>;
