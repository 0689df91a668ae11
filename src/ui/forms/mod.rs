//! Form rendering module
//!
//! - `field_renderer`: input box and error line helpers
//! - `contact_form`: the contact form hosted by the dialog

mod contact_form;
mod field_renderer;

pub use contact_form::{draw_contact_form, ContactFormLayout};
