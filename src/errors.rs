//! Error types for NutriAdvisor
//!
//! Provides the library-level error enum with context propagation.
//! Binary entry points wrap these in `anyhow` for user-facing context.

use thiserror::Error;

/// Main error type for the advisor library
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Dataset file missing or malformed
    #[error("Failed to load dataset from '{path}': {reason}")]
    DataLoad { path: String, reason: String },

    /// Matching was attempted against an empty dataset
    #[error("No recommendation available: the reference dataset is empty")]
    NoMatch,

    /// A categorical attribute could not be parsed from user input
    #[error("Unrecognized {kind}: '{value}'")]
    ParseAttribute { kind: &'static str, value: String },
}

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

impl AdvisorError {
    /// Build a DataLoad error for the given path
    pub fn data_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AdvisorError::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
