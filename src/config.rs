//! Configuration handling for the site

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default EmailJS send endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// How long the success/failure banner stays before the form returns to idle
pub const DEFAULT_STATUS_RESET: Duration = Duration::from_secs(5);

/// A mailer setting that is absent or blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing mailer setting `{0}`")]
pub struct MissingSetting(pub &'static str);

/// Credentials for the email service, checked once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Private key, required when the EmailJS account enforces it for API calls
    pub access_token: Option<String>,
    pub endpoint: String,
}

/// User configuration for the site
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    /// EmailJS service identifier
    pub emailjs_service_id: Option<String>,
    /// EmailJS template identifier
    pub emailjs_template_id: Option<String>,
    /// EmailJS public key
    pub emailjs_public_key: Option<String>,
    /// EmailJS private key (optional)
    pub emailjs_private_key: Option<String>,
    /// Override for the send endpoint
    pub emailjs_endpoint: Option<String>,
    /// Seconds before a success/failure banner clears
    pub status_reset_secs: Option<u64>,
}

impl SiteConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "canbri", "canbri-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: SiteConfig = serde_json::from_str(&content)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Apply `EMAILJS_*` environment variables on top of the file values
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let slots = [
            ("EMAILJS_SERVICE_ID", &mut self.emailjs_service_id),
            ("EMAILJS_TEMPLATE_ID", &mut self.emailjs_template_id),
            ("EMAILJS_PUBLIC_KEY", &mut self.emailjs_public_key),
            ("EMAILJS_PRIVATE_KEY", &mut self.emailjs_private_key),
            ("EMAILJS_ENDPOINT", &mut self.emailjs_endpoint),
        ];
        for (key, slot) in slots {
            if let Some(value) = lookup(key) {
                *slot = Some(value);
            }
        }
        self
    }

    /// Validate the mailer settings into credentials
    pub fn credentials(&self) -> Result<MailerCredentials, MissingSetting> {
        let service_id = required(&self.emailjs_service_id, "emailjs_service_id")?;
        let template_id = required(&self.emailjs_template_id, "emailjs_template_id")?;
        let public_key = required(&self.emailjs_public_key, "emailjs_public_key")?;

        Ok(MailerCredentials {
            service_id,
            template_id,
            public_key,
            access_token: present(&self.emailjs_private_key),
            endpoint: present(&self.emailjs_endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }

    /// Delay before the form status returns to idle
    pub fn status_reset_delay(&self) -> Duration {
        self.status_reset_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_STATUS_RESET)
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, MissingSetting> {
    present(value).ok_or(MissingSetting(name))
}
