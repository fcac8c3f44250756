//! LLM-backed field extraction with regex fallback

use crate::fallback;
use crate::parser::parse_llm_response;
use crate::prompt::build_extraction_prompt;
use grievance_domain::traits::{LlmError, LlmProvider};
use grievance_domain::ExtractedFields;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Extracts complaint fields from free text via an LLM provider
///
/// A reply the parser cannot handle is recovered locally: the regex
/// fallback runs on the original message and its result is used instead.
/// Only a provider failure (unreachable service, bad HTTP status)
/// propagates to the caller.
pub struct ComplaintExtractor {
    provider: Arc<dyn LlmProvider>,
}

impl ComplaintExtractor {
    /// Create a new extractor over the given provider
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Extract complaint fields from a user message
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the inference service cannot be
    /// reached. Parse failures never surface; they fall back to the regex
    /// extractor.
    pub async fn extract(&self, message: &str) -> Result<ExtractedFields, LlmError> {
        let prompt = build_extraction_prompt(message);
        debug!(prompt_len = prompt.len(), "Requesting field extraction");

        let response = self.provider.generate(&prompt).await?;
        debug!(response_len = response.len(), "LLM extraction response");

        match parse_llm_response(&response) {
            Ok(fields) => {
                info!(?fields, "Extracted fields via LLM");
                Ok(fields)
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse LLM response, using regex fallback");
                Ok(fallback::extract(message))
            }
        }
    }
}
