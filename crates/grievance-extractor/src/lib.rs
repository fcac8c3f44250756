//! Grievance Extraction Layer
//!
//! Turns unstructured user messages into structured complaint fields.
//!
//! Two paths produce the same [`ExtractedFields`] shape:
//!
//! - [`extractor::ComplaintExtractor`] prompts an LLM for a JSON object and
//!   parses its reply
//! - [`fallback::extract`] is the deterministic regex path, used directly
//!   when the LLM reply cannot be parsed
//!
//! [`query::extract_criteria`] pulls search criteria (phone number, name)
//! out of free-text retrieval queries.
//!
//! [`ExtractedFields`]: grievance_domain::ExtractedFields

#![warn(missing_docs)]

pub mod error;
pub mod extractor;
pub mod fallback;
pub mod parser;
pub mod prompt;
pub mod query;

pub use error::ExtractorError;
pub use extractor::ComplaintExtractor;
