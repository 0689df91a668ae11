//! EmailJS REST client
//!
//! Sends the contact form through the EmailJS `email/send` endpoint, the same
//! call the browser SDK makes for `sendForm`.

use super::error::SubmitError;
use super::traits::Mailer;
use crate::config::MailerCredentials;
use crate::state::ContactMessage;
use async_trait::async_trait;
use serde::Serialize;

/// Body of an EmailJS send request
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a ContactMessage,
}

/// Client for the EmailJS transactional email API
pub struct EmailJsClient {
    http: reqwest::Client,
    credentials: MailerCredentials,
}

impl EmailJsClient {
    /// Create a client from credentials validated at startup
    pub fn new(credentials: MailerCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    fn request<'a>(&'a self, message: &'a ContactMessage) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.credentials.service_id,
            template_id: &self.credentials.template_id,
            user_id: &self.credentials.public_key,
            access_token: self.credentials.access_token.as_deref(),
            template_params: message,
        }
    }
}

#[async_trait]
impl Mailer for EmailJsClient {
    async fn send(&self, message: &ContactMessage) -> Result<(), SubmitError> {
        tracing::debug!(endpoint = %self.credentials.endpoint, "sending contact message");

        let response = self
            .http
            .post(&self.credentials.endpoint)
            .json(&self.request(message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("contact message accepted by email service");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
