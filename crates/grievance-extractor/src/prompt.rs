//! LLM prompt construction for extraction and retrieval

/// Build the field-extraction prompt embedding the raw user message
///
/// The model is asked for a single JSON object with keys `name`,
/// `mobile_number`, `complaint_text`, `category`, `priority`, with `null`
/// for anything it cannot extract.
pub fn build_extraction_prompt(message: &str) -> String {
    format!(
        r#"You are a complaint data extractor. Extract complaint details from the user message and return ONLY a valid JSON object.

CRITICAL RULES:
1. Extract names from ANY of these patterns:
   - "my name is [NAME]"
   - "I am [NAME]"
   - "Name: [NAME]"
   - "call me [NAME]"
   - "[NAME] here"
   - "[NAME] is my name"
2. Extract mobile numbers in 10-digit format (e.g., 1234567890)
3. Extract complaint text (the actual problem description)
4. Set category as: technical, billing, service, general
5. Set priority as: low, medium, high, urgent
6. Return ONLY the JSON object, no additional text, code, or explanations
7. If a field cannot be extracted, use null (not "null" as string)

User message: {message}

Return ONLY this JSON structure (no markdown, no code blocks):
{{
    "name": "extracted_name_or_null",
    "mobile_number": "extracted_mobile_number_or_null",
    "complaint_text": "extracted_complaint_description_or_null",
    "category": "extracted_category_or_general",
    "priority": "extracted_priority_or_medium"
}}"#
    )
}

/// Build the retrieval prompt embedding the user query and formatted
/// complaint data
///
/// `complaints_data` is either an indented JSON list of matches or the
/// explicit no-matches marker supplied by the responder.
pub fn build_retrieval_prompt(query: &str, complaints_data: &str) -> String {
    format!(
        r#"Based on the user query and available complaint data, provide a helpful response.

User Query: {query}

Available Complaints Data:
{complaints_data}

Provide a natural, helpful response that:
1. Addresses the user's specific query
2. Mentions relevant complaint details if found
3. Is friendly and professional
4. Suggests next steps if appropriate

Response:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_embeds_message() {
        let prompt = build_extraction_prompt("My bill is wrong");
        assert!(prompt.contains("My bill is wrong"));
        assert!(prompt.contains("mobile_number"));
        assert!(prompt.contains("complaint_text"));
        assert!(prompt.contains("ONLY a valid JSON object"));
    }

    #[test]
    fn test_extraction_prompt_lists_all_name_patterns() {
        let prompt = build_extraction_prompt("x");
        for form in [
            "my name is",
            "I am",
            "Name:",
            "call me",
            "[NAME] here",
            "is my name",
        ] {
            assert!(prompt.contains(form), "missing pattern form {form:?}");
        }
    }

    #[test]
    fn test_retrieval_prompt_embeds_query_and_data() {
        let prompt = build_retrieval_prompt("complaints for 9876543210", "[]");
        assert!(prompt.contains("complaints for 9876543210"));
        assert!(prompt.contains("Available Complaints Data:\n[]"));
    }
}
