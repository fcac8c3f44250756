//! Intake validation - the gate between extraction and persistence
//!
//! A complaint is only stored once name, mobile number, and description are
//! all present. The error enumerates every missing field, not just the
//! first, so the caller can report all of them at once.

use crate::fields::{Category, ExtractedFields, Priority};
use thiserror::Error;

/// Validation error listing every missing required field
///
/// Field labels appear comma-joined in a fixed order: name, mobile number,
/// complaint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Incomplete complaint data. Missing: {}", missing.join(", "))]
pub struct ValidationError {
    /// Human-readable labels of the missing fields, in report order
    pub missing: Vec<String>,
}

/// Extracted fields that passed intake validation
///
/// The required strings are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteFields {
    /// Complainant name
    pub name: String,
    /// 10-digit mobile number
    pub phone_number: String,
    /// Complaint description
    pub text: String,
    /// Complaint category
    pub category: Category,
    /// Complaint priority
    pub priority: Priority,
}

impl ExtractedFields {
    /// Validate that all required fields are present and non-empty
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every missing field when name,
    /// phone number, or text is absent or empty.
    pub fn into_complete(self) -> Result<CompleteFields, ValidationError> {
        let mut missing = Vec::new();

        let present = |v: &Option<String>| {
            v.as_deref().is_some_and(|s| !s.trim().is_empty())
        };

        if !present(&self.name) {
            missing.push("name".to_string());
        }
        if !present(&self.phone_number) {
            missing.push("mobile number".to_string());
        }
        if !present(&self.text) {
            missing.push("complaint description".to_string());
        }

        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        Ok(CompleteFields {
            name: self.name.unwrap_or_default(),
            phone_number: self.phone_number.unwrap_or_default(),
            text: self.text.unwrap_or_default(),
            category: self.category,
            priority: self.priority,
        })
    }
}
