//! Structured fields extracted from free-text messages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Complaint category
///
/// Unknown strings collapse to the default (`General`) rather than failing,
/// because the LLM extraction path is not guaranteed to stay inside the
/// enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Technical problems (app, software, crashes, bugs)
    Technical,
    /// Billing problems (charges, payments, costs)
    Billing,
    /// Service problems (support, customer service)
    Service,
    /// Everything else
    General,
}

impl Category {
    /// Parse a category string, case-insensitively
    ///
    /// Returns `None` for anything outside the enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Some(Category::Technical),
            "billing" => Some(Category::Billing),
            "service" => Some(Category::Service),
            "general" => Some(Category::General),
            _ => None,
        }
    }

    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Billing => "billing",
            Category::Service => "service",
            Category::General => "general",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complaint priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Minor issues
    Low,
    /// The default when nothing signals otherwise
    Medium,
    /// Important or serious issues
    High,
    /// Emergencies
    Urgent,
}

impl Priority {
    /// Parse a priority string, case-insensitively
    ///
    /// Returns `None` for anything outside the enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }

    /// The stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields extracted from a free-text message, possibly incomplete
///
/// Both extraction paths (LLM and regex fallback) produce this shape.
/// Absent fields surface as `None`; category and priority always carry a
/// value because they have documented defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedFields {
    /// Complainant name, if one was found
    pub name: Option<String>,

    /// 10-digit mobile number, if one was found
    pub phone_number: Option<String>,

    /// The complaint description, if anything remained after cleanup
    pub text: Option<String>,

    /// Category, defaulting to `general`
    pub category: Category,

    /// Priority, defaulting to `medium`
    pub priority: Priority,
}
