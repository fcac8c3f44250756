//! Grievance LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `grievance-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use grievance_llm::MockProvider;
//! use grievance_domain::traits::LlmProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use grievance_domain::traits::{LlmError, LlmProvider};
use std::sync::{Arc, Mutex};

pub use ollama::OllamaProvider;

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// A prompt-keyed response table takes precedence; any other prompt gets
/// the default response. The key is matched as a substring of the prompt,
/// because extraction prompts embed the user message inside boilerplate.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    call_count: Arc<Mutex<usize>>,
    fail: Arc<Mutex<bool>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Add a response returned whenever the prompt contains `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((fragment.into(), response.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Configure every subsequent call to fail with a communication error
    pub fn fail_all(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        if *self.fail.lock().unwrap() {
            return Err(LlmError::Communication("mock failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        for (fragment, response) in responses.iter() {
            if prompt.contains(fragment.as_str()) {
                return Ok(response.clone());
            }
        }

        Ok(self.default_response.clone())
    }
}
