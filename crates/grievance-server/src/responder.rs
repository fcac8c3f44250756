//! Retrieval responder: phrase matching complaints as a natural-language
//! answer via the LLM.

use grievance_domain::traits::{LlmError, LlmProvider};
use grievance_domain::Complaint;
use grievance_extractor::prompt::build_retrieval_prompt;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Marker passed to the LLM instead of an empty match list
pub const NO_MATCHES_MARKER: &str = "No complaints found matching the criteria.";

/// Timestamp format shown to the LLM
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Phrases retrieval answers over already-fetched matches
pub struct RetrievalResponder {
    provider: Arc<dyn LlmProvider>,
}

impl RetrievalResponder {
    /// Create a new responder over the given provider
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Produce a natural-language answer for the query and its matches
    ///
    /// The reply is the provider's literal output, trimmed.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the inference service cannot be
    /// reached.
    pub async fn answer(&self, query: &str, matches: &[Complaint]) -> Result<String, LlmError> {
        let complaints_data = format_complaints(matches);
        let prompt = build_retrieval_prompt(query, &complaints_data);

        debug!(matches = matches.len(), "Requesting retrieval answer");
        let response = self.provider.generate(&prompt).await?;

        Ok(response.trim().to_string())
    }
}

/// Format matches as an indented JSON list, or the no-matches marker
fn format_complaints(matches: &[Complaint]) -> String {
    if matches.is_empty() {
        return NO_MATCHES_MARKER.to_string();
    }

    let formatted: Vec<_> = matches
        .iter()
        .map(|c| {
            json!({
                "complaint_id": c.id.as_str(),
                "name": c.name,
                "mobile_number": c.phone_number,
                "complaint_text": c.text,
                "category": c.category,
                "priority": c.priority,
                "status": c.status,
                "created_at": c.created_at.format(TIMESTAMP_FORMAT).to_string(),
                "updated_at": c.updated_at.format(TIMESTAMP_FORMAT).to_string(),
            })
        })
        .collect();

    serde_json::to_string_pretty(&formatted).expect("complaint JSON serializes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use grievance_domain::{Category, ComplaintId, Priority};
    use grievance_llm::MockProvider;

    fn sample_complaint() -> Complaint {
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        Complaint {
            id: ComplaintId::from_string("GRV-1A2B3C4D"),
            name: "John Doe".to_string(),
            phone_number: "9876543210".to_string(),
            text: "My bill is wrong".to_string(),
            category: Category::Billing,
            priority: Priority::High,
            status: "pending".to_string(),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_format_complaints_fields_and_timestamps() {
        let data = format_complaints(&[sample_complaint()]);
        assert!(data.contains("GRV-1A2B3C4D"));
        assert!(data.contains(r#""mobile_number": "9876543210""#));
        assert!(data.contains(r#""category": "billing""#));
        assert!(data.contains("2025-03-14 09:26"));
        // Seconds are not shown
        assert!(!data.contains("09:26:53"));
    }

    #[test]
    fn test_format_complaints_empty_uses_marker() {
        assert_eq!(format_complaints(&[]), NO_MATCHES_MARKER);
    }

    #[tokio::test]
    async fn test_answer_returns_trimmed_reply() {
        let provider = MockProvider::new("  Found one complaint for John Doe.  \n");
        let responder = RetrievalResponder::new(Arc::new(provider));

        let answer = responder
            .answer("John Doe complaint", &[sample_complaint()])
            .await
            .unwrap();
        assert_eq!(answer, "Found one complaint for John Doe.");
    }

    #[tokio::test]
    async fn test_answer_prompt_carries_marker_when_empty() {
        let mut provider = MockProvider::new("fallthrough");
        provider.add_response(NO_MATCHES_MARKER, "Nothing on file.");
        let responder = RetrievalResponder::new(Arc::new(provider));

        let answer = responder.answer("anything", &[]).await.unwrap();
        assert_eq!(answer, "Nothing on file.");
    }
}
