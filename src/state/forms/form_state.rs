//! Contact form state: values, touched fields, errors and submission status

use super::field::{validate_field, validate_form, FieldErrors, FieldName, FormValues};
use crate::config::DEFAULT_STATUS_RESET;
use crate::mailer::SubmitError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_FORM_ID: AtomicU64 = AtomicU64::new(1);

/// Where a submission stands; exactly one holds at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Ok,
    Err,
}

impl SubmissionStatus {
    /// Banner text for the status region
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Ok => Some("Your message has been sent. We'll contact you soon."),
            Self::Err => Some("Something went wrong. Please try again."),
            Self::Idle | Self::Sending => None,
        }
    }
}

/// Focus position inside the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(FieldName),
    Submit,
}

/// Validated payload handed to the mailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactMessage {
    fn from_values(values: &FormValues) -> Self {
        let get = |field| values.get(field).trim().to_string();
        Self {
            name: get(FieldName::Name),
            email: get(FieldName::Email),
            company: get(FieldName::Company),
            message: get(FieldName::Message),
        }
    }
}

/// Result of asking the form to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation failed; focus moved to the first invalid field
    Blocked { focus: FieldName },
    /// A submission is already in flight
    InFlight,
    /// Status is now `Sending`; deliver this message and report back
    Ready(ContactMessage),
}

/// State of one mounted contact form
#[derive(Debug)]
pub struct ContactForm {
    id: u64,
    values: FormValues,
    errors: FieldErrors,
    touched: BTreeSet<FieldName>,
    status: SubmissionStatus,
    focus: FormFocus,
    reset_delay: Duration,
    /// Pending return to `Idle`; `None` when nothing is scheduled
    reset_at: Option<Instant>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::with_reset_delay(DEFAULT_STATUS_RESET)
    }

    pub fn with_reset_delay(reset_delay: Duration) -> Self {
        Self {
            id: NEXT_FORM_ID.fetch_add(1, Ordering::Relaxed),
            values: FormValues::new(),
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            status: SubmissionStatus::Idle,
            focus: FormFocus::Field(FieldName::Name),
            reset_delay,
            reset_at: None,
        }
    }

    /// Identifies this form instance so late results can be matched to it
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.values.get(field)
    }

    #[cfg(test)]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.contains(&field)
    }

    /// Error to show for a field: only once it has been touched
    pub fn visible_error(&self, field: FieldName) -> Option<&str> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors
            .get(&field)
            .map(String::as_str)
            .filter(|msg| !msg.is_empty())
    }

    /// The submit control is disabled while a message is in flight
    pub fn can_submit(&self) -> bool {
        self.status != SubmissionStatus::Sending
    }

    #[cfg(test)]
    pub fn reset_scheduled_at(&self) -> Option<Instant> {
        self.reset_at
    }

    /// Field lost focus: mark it touched and validate it
    pub fn on_blur(&mut self, field: FieldName, value: &str) {
        self.values.set(field, value);
        self.touched.insert(field);
        self.store_error(field, validate_field(field, value));
    }

    /// Field value changed: live-validate only fields already touched
    pub fn on_change(&mut self, field: FieldName, value: &str) {
        self.values.set(field, value);
        if self.is_touched(field) {
            self.store_error(field, validate_field(field, value));
        }
    }

    fn store_error(&mut self, field: FieldName, message: String) {
        if message.is_empty() {
            self.errors.remove(&field);
        } else {
            self.errors.insert(field, message);
        }
    }

    fn blur_focused(&mut self) {
        if let FormFocus::Field(field) = self.focus {
            let value = self.values.get(field).to_string();
            self.on_blur(field, &value);
        }
    }

    /// Move focus to a field or the submit control, blurring the current field
    pub fn set_focus(&mut self, focus: FormFocus) {
        if self.focus != focus {
            self.blur_focused();
            self.focus = focus;
        }
    }

    pub fn focus_next(&mut self) {
        let next = match self.focus {
            FormFocus::Field(field) => field.next().map_or(FormFocus::Submit, FormFocus::Field),
            FormFocus::Submit => FormFocus::Field(FieldName::Name),
        };
        self.set_focus(next);
    }

    pub fn focus_prev(&mut self) {
        let prev = match self.focus {
            FormFocus::Field(field) => field.prev().map_or(FormFocus::Submit, FormFocus::Field),
            FormFocus::Submit => FormFocus::Field(FieldName::Message),
        };
        self.set_focus(prev);
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        if let FormFocus::Field(field) = self.focus {
            let mut value = self.values.get(field).to_string();
            edit(&mut value);
            self.on_change(field, &value);
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.edit_focused(|value| value.push(c));
    }

    pub fn backspace(&mut self) {
        self.edit_focused(|value| {
            value.pop();
        });
    }

    /// Insert a line break; only the message field is multiline
    pub fn newline(&mut self) {
        if self.focus == FormFocus::Field(FieldName::Message) {
            self.input_char('\n');
        }
    }

    /// Validate everything and, when valid, move to `Sending`
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.status == SubmissionStatus::Sending {
            return SubmitAttempt::InFlight;
        }

        self.touched.extend(FieldName::ALL);
        self.errors = validate_form(&self.values);

        if let Some(&first) = self.errors.keys().next() {
            tracing::debug!(field = first.key(), "submit blocked by validation");
            self.focus = FormFocus::Field(first);
            return SubmitAttempt::Blocked { focus: first };
        }

        self.reset_at = None;
        self.status = SubmissionStatus::Sending;
        SubmitAttempt::Ready(ContactMessage::from_values(&self.values))
    }

    /// Record the outcome of the in-flight submission and schedule the reset
    pub fn finish_submit(
        &mut self,
        result: Result<(), SubmitError>,
        now: Instant,
    ) -> SubmissionStatus {
        if self.status != SubmissionStatus::Sending {
            tracing::warn!(status = ?self.status, "ignoring submission result with none in flight");
            return self.status;
        }

        match result {
            Ok(()) => {
                self.status = SubmissionStatus::Ok;
                self.values.clear();
                self.errors.clear();
                self.touched.clear();
                self.focus = FormFocus::Field(FieldName::Name);
            }
            Err(err) => {
                tracing::error!(error = %err, "contact form submission failed");
                self.status = SubmissionStatus::Err;
            }
        }

        self.reset_at = Some(now + self.reset_delay);
        self.status
    }

    /// Fire the scheduled return to `Idle` once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.reset_at {
            if now >= deadline {
                self.reset_at = None;
                self.status = SubmissionStatus::Idle;
            }
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}
