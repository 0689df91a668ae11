//! Form domain layer
//!
//! Field validation rules and the contact form state controller.

mod field;
mod form_state;

pub use field::FieldName;
pub use form_state::{ContactForm, ContactMessage, FormFocus, SubmissionStatus, SubmitAttempt};
