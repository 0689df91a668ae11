//! Contact form fields and their validation rules

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// The fields of the contact form, in tab and error-focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Name,
    Email,
    Company,
    Message,
}

impl FieldName {
    /// Fixed order used for tabbing and for focusing the first invalid field
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Company,
        FieldName::Message,
    ];

    /// Form key, also used as the template parameter name
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Message => "message",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Your name *",
            Self::Email => "Your e-mail *",
            Self::Company => "Company (optional)",
            Self::Message => "What's up? *",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Message)
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Name => Some(Self::Email),
            Self::Email => Some(Self::Company),
            Self::Company => Some(Self::Message),
            Self::Message => None,
        }
    }

    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Name => None,
            Self::Email => Some(Self::Name),
            Self::Company => Some(Self::Email),
            Self::Message => Some(Self::Company),
        }
    }
}

/// Raw values typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<FieldName, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(field, value)` pairs; fields not listed stay empty
    #[cfg(test)]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (FieldName, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(field, value)| (field, value.to_string()))
                .collect(),
        )
    }

    /// Value of a field, empty when never set
    pub fn get(&self, field: FieldName) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }
}

/// Validation messages keyed by field; a missing entry means the field is valid
pub type FieldErrors = BTreeMap<FieldName, String>;

/// Validate a single field value, returning an empty string when it is valid
pub fn validate_field(field: FieldName, raw: &str) -> String {
    let value = raw.trim();
    let len = value.chars().count();

    let message = match field {
        FieldName::Name if value.is_empty() => "Please enter your name.",
        FieldName::Name if len < 2 => "Name should be at least 2 characters.",
        FieldName::Email if value.is_empty() => "Please enter your email.",
        FieldName::Email if !EMAIL_RE.is_match(value) => "Please enter a valid email address.",
        FieldName::Message if value.is_empty() => "Please write a short message.",
        FieldName::Message if len < 10 => "Message should be at least 10 characters.",
        FieldName::Company if !value.is_empty() && len < 2 => {
            "Company should be at least 2 characters."
        }
        _ => "",
    };

    message.to_string()
}

/// Validate every field and keep only the failing ones
pub fn validate_form(values: &FormValues) -> FieldErrors {
    FieldName::ALL
        .iter()
        .filter_map(|&field| {
            let message = validate_field(field, values.get(field));
            (!message.is_empty()).then_some((field, message))
        })
        .collect()
}
