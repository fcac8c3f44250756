//! Complaint module - the persisted record at the center of the service

use crate::fields::{Category, Priority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default status assigned to every new complaint.
///
/// Status is an opaque string: no transition set is defined in the current
/// scope, and no endpoint mutates it.
pub const DEFAULT_STATUS: &str = "pending";

/// Unique identifier for a complaint
///
/// Format: the fixed prefix `GRV-` followed by 8 uppercase hex characters
/// taken from a freshly generated UUIDv4. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(String);

impl ComplaintId {
    /// Generate a new ComplaintId
    ///
    /// # Examples
    ///
    /// ```
    /// use grievance_domain::ComplaintId;
    ///
    /// let id = ComplaintId::new();
    /// assert!(id.as_str().starts_with("GRV-"));
    /// assert_eq!(id.as_str().len(), 12);
    /// ```
    pub fn new() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("GRV-{}", hex[..8].to_uppercase()))
    }

    /// Reconstruct a ComplaintId from its stored string form
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ComplaintId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A complaint - a user-reported grievance with structured metadata
///
/// Created only via the intake flow after successful field validation.
/// Never updated or deleted in the current scope; `updated_at` must be
/// refreshed by any future mutation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    /// Unique identifier (`GRV-` + 8 uppercase hex)
    pub id: ComplaintId,

    /// Full name of the complainant
    pub name: String,

    /// 10-digit mobile number of the complainant
    pub phone_number: String,

    /// Free-text description of the complaint
    pub text: String,

    /// Complaint category
    pub category: Category,

    /// Complaint priority
    pub priority: Priority,

    /// Opaque status string, defaults to `pending`
    pub status: String,

    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,

    /// Last-mutation timestamp, equal to `created_at` until mutated
    pub updated_at: DateTime<Utc>,
}
