//! Parse LLM output into extracted complaint fields

use crate::error::ExtractorError;
use grievance_domain::{Category, ExtractedFields, Priority};
use serde_json::Value;

/// Parse an LLM extraction reply into [`ExtractedFields`]
///
/// LLMs wrap JSON in markdown fences and chatter around it, so the payload
/// is located with [`extract_json`] first. Missing or null keys default the
/// same way the regex fallback does: name/phone/text to `None`, category to
/// `general`, priority to `medium`.
pub fn parse_llm_response(response: &str) -> Result<ExtractedFields, ExtractorError> {
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    let string_field = |key: &str| -> Option<String> {
        obj.get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    Ok(ExtractedFields {
        name: string_field("name"),
        phone_number: string_field("mobile_number"),
        text: string_field("complaint_text"),
        category: string_field("category")
            .and_then(|s| Category::parse(&s))
            .unwrap_or_default(),
        priority: string_field("priority")
            .and_then(|s| Priority::parse(&s))
            .unwrap_or_default(),
    })
}

/// Locate the JSON payload within a reply
///
/// Strips a leading ```` ```json ```` or ```` ``` ```` fence and a trailing
/// ```` ``` ```` fence if present, then takes the first brace-delimited
/// object within what remains. Without braces the whole trimmed text is the
/// candidate (and will fail to parse upstream).
fn extract_json(response: &str) -> String {
    let mut text = response.trim();

    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }
    text = text.trim();

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => text[start..=end].to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let response = r#"{
            "name": "John Doe",
            "mobile_number": "9876543210",
            "complaint_text": "My bill is wrong",
            "category": "billing",
            "priority": "high"
        }"#;

        let fields = parse_llm_response(response).unwrap();
        assert_eq!(fields.name.as_deref(), Some("John Doe"));
        assert_eq!(fields.phone_number.as_deref(), Some("9876543210"));
        assert_eq!(fields.text.as_deref(), Some("My bill is wrong"));
        assert_eq!(fields.category, Category::Billing);
        assert_eq!(fields.priority, Priority::High);
    }

    #[test]
    fn test_parse_json_with_markdown_fence() {
        let response = "```json\n{\"name\": \"Jane\", \"mobile_number\": null, \"complaint_text\": null, \"category\": \"general\", \"priority\": \"medium\"}\n```";

        let fields = parse_llm_response(response).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Jane"));
        assert_eq!(fields.phone_number, None);
    }

    #[test]
    fn test_parse_json_with_bare_fence() {
        let response = "```\n{\"name\": \"Jane\"}\n```";
        let fields = parse_llm_response(response).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_parse_json_with_surrounding_chatter() {
        let response = "Here is the extraction result: {\"name\": \"Jane\", \"category\": \"service\"} hope that helps!";
        let fields = parse_llm_response(response).unwrap();
        assert_eq!(fields.name.as_deref(), Some("Jane"));
        assert_eq!(fields.category, Category::Service);
    }

    #[test]
    fn test_parse_null_fields() {
        let response = r#"{"name": null, "mobile_number": null, "complaint_text": null}"#;
        let fields = parse_llm_response(response).unwrap();
        assert_eq!(fields.name, None);
        assert_eq!(fields.phone_number, None);
        assert_eq!(fields.text, None);
        assert_eq!(fields.category, Category::General);
        assert_eq!(fields.priority, Priority::Medium);
    }

    #[test]
    fn test_parse_unknown_category_defaults() {
        let response = r#"{"name": "Jane", "category": "complaints", "priority": "whenever"}"#;
        let fields = parse_llm_response(response).unwrap();
        assert_eq!(fields.category, Category::General);
        assert_eq!(fields.priority, Priority::Medium);
    }

    #[test]
    fn test_parse_non_json_fails() {
        let result = parse_llm_response("I could not extract anything, sorry.");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_array_fails() {
        let result = parse_llm_response(r#"["not", "an", "object"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_json_no_braces_returns_trimmed_text() {
        assert_eq!(extract_json("  plain text  "), "plain text");
    }

    #[test]
    fn test_extract_json_first_object() {
        let s = extract_json("prefix {\"a\": 1} suffix");
        assert_eq!(s, r#"{"a": 1}"#);
    }
}
