//! Grievance Domain Layer
//!
//! This crate contains the core domain model for the grievance intake
//! service: the `Complaint` record, its enumerated metadata, the
//! extracted-field shape produced by both extraction paths, and the trait
//! interfaces the infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **Complaint**: a persisted record of a user-reported grievance
//! - **ExtractedFields**: structured fields pulled from free text, possibly
//!   incomplete
//! - **Validation**: the intake gate requiring name, mobile number, and
//!   complaint description before anything is stored
//!
//! Infrastructure implementations (SQLite store, Ollama provider) live in
//! other crates; this crate only defines the seams.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod complaint;
pub mod fields;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use complaint::{Complaint, ComplaintId};
pub use fields::{Category, ExtractedFields, Priority};
pub use validation::{CompleteFields, ValidationError};
