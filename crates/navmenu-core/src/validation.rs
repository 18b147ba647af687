//! Name normalization and field-level validation.
//!
//! Every write goes through the same pipeline: normalize, then the `validator`
//! rules (required, length), then store-backed checks such as uniqueness, which
//! the services append to the same [`FieldErrors`] map.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

pub const BLANK_MESSAGE: &str = "This field cannot be blank.";
pub const MAX_LENGTH_MESSAGE: &str = "Ensure this field has no more than 15 characters.";
pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const MODULE_EXISTS_MESSAGE: &str = "The module already exists";
pub const SINGLE_ROOT_MESSAGE: &str = "Can only exist one main menu for module";

pub fn invalid_pk_message(id: impl fmt::Display) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}

pub fn order_out_of_range_message(max: i32) -> String {
    format!("Ensure this value is between 1 and {}.", max)
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn normalize_module_name(raw: &str) -> String {
    capitalize(raw.trim())
}

pub fn normalize_menu_name(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(BLANK_MESSAGE)));
    }
    Ok(())
}

fn default_message(code: &str) -> String {
    match code {
        "length" => MAX_LENGTH_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

/// Runs the derived rules of `value` and converts failures into [`FieldErrors`].
pub fn check<T: Validate>(value: &T) -> Result<(), FieldErrors> {
    value.validate().map_err(FieldErrors::from)
}

/// Field-keyed list of human readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| default_message(&err.code));
                fields.push(&field.to_string(), message);
            }
        }
        fields
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}
