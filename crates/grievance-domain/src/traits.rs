//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates
//! (grievance-store, grievance-llm).

use crate::complaint::Complaint;
use crate::validation::CompleteFields;
use async_trait::async_trait;
use thiserror::Error;

/// Trait for storing and retrieving complaints
///
/// Implemented by the infrastructure layer (grievance-store)
pub trait ComplaintStore {
    /// Error type for store operations
    type Error;

    /// Persist a new complaint from validated fields, returning the stored record
    fn create(&mut self, fields: CompleteFields) -> Result<Complaint, Self::Error>;

    /// All complaints, newest first
    fn list_all(&self) -> Result<Vec<Complaint>, Self::Error>;

    /// Complaints matching the filter criteria
    ///
    /// With no criteria set, returns the 5 most recent complaints.
    fn find(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, Self::Error>;
}

/// Filter criteria for retrieving complaints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintFilter {
    /// Exact phone number match
    pub phone_number: Option<String>,

    /// Case-insensitive name substring match
    pub name: Option<String>,
}

impl ComplaintFilter {
    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none() && self.name.is_none()
    }
}

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available on the inference server
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// No provider is configured or the provider failed to initialize
    #[error("LLM service not available")]
    Unavailable,
}

/// Trait for LLM completion operations
///
/// Implemented by the infrastructure layer (grievance-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a text completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
