//! Engine error type
//!
//! Wraps the core errors and adds the entry-point precondition failures.

use rstlite_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors surfaced by the analyzer and the batch runner
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Text is empty or only whitespace
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What is wrong with the input
        reason: String,
    },

    /// Unrecognized ruleset, language hint or worker count
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Result still invalid after the relaxation pass
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Value constructor failure inside the pipeline
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Worker pool could not be created
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

impl EngineError {
    /// Configuration error from a rejected value
    pub(crate) fn config(err: CoreError) -> Self {
        EngineError::InvalidConfig(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
