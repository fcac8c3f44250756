//! Search-criteria extraction for free-text retrieval queries

use crate::fallback::extract_phone;
use grievance_domain::traits::ComplaintFilter;
use regex::Regex;
use std::sync::LazyLock;

/// Ordered name patterns for retrieval queries, first match wins
///
/// The second pattern ("X complaint/issue") can match unintended words:
/// "what is the issue" yields a name of "what is the". This is a known
/// extraction ambiguity, kept as-is rather than guessed around; a phone
/// number in the query is the reliable criterion.
static QUERY_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)name[:\s]+(\w+(?:\s+\w+)*)",
        r"(?i)(\w+(?:\s+\w+)*)\s+(?:complaint|issue)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid query name pattern"))
    .collect()
});

/// Extract store filter criteria from a retrieval query
///
/// Pulls a 10-digit phone number (same pattern as intake extraction) and a
/// candidate name. Either or both may be absent; an empty filter makes the
/// store return the most recent complaints.
///
/// # Examples
///
/// ```
/// use grievance_extractor::query::extract_criteria;
///
/// let filter = extract_criteria("show complaints for 9876543210");
/// assert_eq!(filter.phone_number.as_deref(), Some("9876543210"));
/// ```
pub fn extract_criteria(query: &str) -> ComplaintFilter {
    let phone_number = extract_phone(query);

    let name = QUERY_NAME_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(query)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    });

    ComplaintFilter { phone_number, name }
}
