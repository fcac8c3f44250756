//! Deterministic regex-based field extraction
//!
//! Used whenever the LLM reply cannot be parsed, and directly by tests.
//! Never fails: absent fields surface as `None` and are reported as missing
//! by the intake validator, not here.

use grievance_domain::{Category, ExtractedFields, Priority};
use regex::Regex;
use std::sync::LazyLock;

/// A run of exactly 10 consecutive digits
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{10}\b").expect("valid phone pattern"));

/// Ordered name patterns, first match wins
///
/// Each captures a chain of letter-only words, which runs up to the next
/// non-letter token. Evaluation order is part of the contract: it resolves
/// ambiguity deterministically when several patterns could match.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bmy name is\s+([a-z]+(?:\s+[a-z]+)*)",
        r"(?i)\bi am\s+([a-z]+(?:\s+[a-z]+)*)",
        r"(?i)\bname:\s*([a-z]+(?:\s+[a-z]+)*)",
        r"(?i)\bcall me\s+([a-z]+(?:\s+[a-z]+)*)",
        r"(?i)\b([a-z]+(?:\s+[a-z]+)*)\s+here\b",
        r"(?i)\b([a-z]+(?:\s+[a-z]+)*)\s+is my name\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid name pattern"))
    .collect()
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Keyword buckets for category, checked in this order
const BILLING_KEYWORDS: &[&str] = &["billing", "bill", "charge", "payment", "cost"];
const TECHNICAL_KEYWORDS: &[&str] = &["technical", "app", "software", "crash", "bug"];
const SERVICE_KEYWORDS: &[&str] = &["service", "support", "customer service"];

/// Keyword buckets for priority, checked in this order
const URGENT_KEYWORDS: &[&str] = &["urgent", "emergency", "critical"];
const HIGH_KEYWORDS: &[&str] = &["high", "important", "serious"];
const LOW_KEYWORDS: &[&str] = &["low", "minor", "small"];

/// Extract complaint fields from a free-text message
///
/// # Examples
///
/// ```
/// use grievance_extractor::fallback;
///
/// let fields = fallback::extract("My name is John Doe, mobile number 9876543210, my bill is wrong");
/// assert_eq!(fields.name.as_deref(), Some("John Doe"));
/// assert_eq!(fields.phone_number.as_deref(), Some("9876543210"));
/// ```
pub fn extract(message: &str) -> ExtractedFields {
    let lower = message.to_lowercase();

    ExtractedFields {
        name: extract_name(message),
        phone_number: extract_phone(message),
        text: clean_complaint_text(message),
        category: categorize(&lower),
        priority: prioritize(&lower),
    }
}

/// First 10-digit run in the message, if any
pub fn extract_phone(message: &str) -> Option<String> {
    PHONE_PATTERN
        .find(message)
        .map(|m| m.as_str().to_string())
}

/// Name from the first matching pattern, trimmed
pub fn extract_name(message: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(message) {
            if let Some(name) = caps.get(1) {
                return Some(name.as_str().trim().to_string());
            }
        }
    }
    None
}

/// Complaint text: the message minus every name-pattern and phone match,
/// whitespace collapsed, leading/trailing punctuation stripped
///
/// Idempotent: running the cleanup on its own output yields the same string.
pub fn clean_complaint_text(message: &str) -> Option<String> {
    let mut text = message.to_string();

    for pattern in NAME_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text = PHONE_PATTERN.replace_all(&text, "").into_owned();

    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = text.trim_matches(|c: char| c == ',' || c == '.' || c.is_whitespace());

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Keyword-based category, first matching bucket wins
fn categorize(lower: &str) -> Category {
    if BILLING_KEYWORDS.iter().any(|w| lower.contains(w)) {
        Category::Billing
    } else if TECHNICAL_KEYWORDS.iter().any(|w| lower.contains(w)) {
        Category::Technical
    } else if SERVICE_KEYWORDS.iter().any(|w| lower.contains(w)) {
        Category::Service
    } else {
        Category::General
    }
}

/// Keyword-based priority, first matching bucket wins
fn prioritize(lower: &str) -> Priority {
    if URGENT_KEYWORDS.iter().any(|w| lower.contains(w)) {
        Priority::Urgent
    } else if HIGH_KEYWORDS.iter().any(|w| lower.contains(w)) {
        Priority::High
    } else if LOW_KEYWORDS.iter().any(|w| lower.contains(w)) {
        Priority::Low
    } else {
        Priority::Medium
    }
}
