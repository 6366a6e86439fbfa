//! Core error types (deterministic only)

use thiserror::Error;

/// Failures raised by the value constructors.
///
/// None of these involve I/O; every variant names the offending value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Span end lies before its start
    #[error("invalid span: end {end} is before start {start}")]
    InvalidSpan {
        /// Start offset in characters
        start: usize,
        /// End offset in characters
        end: usize,
    },

    /// EDU ids start at 1
    #[error("EDU id must be positive, got {0}")]
    InvalidEduId(u32),

    /// EDU text is empty after trimming
    #[error("EDU {id} has empty text")]
    EmptyEduText {
        /// Id of the offending EDU
        id: u32,
    },

    /// Nucleus or satellite without any EDU id
    #[error("role chunk must reference at least one EDU")]
    EmptyRoleChunk,

    /// Relation name outside the closed enumeration
    #[error("unknown relation type '{0}'")]
    UnknownRelation(String),

    /// Confidence outside [0, 1] (or NaN)
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),

    /// Language code outside {es, en, auto}
    #[error("unknown language '{0}' (expected es, en or auto)")]
    UnknownLanguage(String),

    /// Ruleset outside {minimal, extended}
    #[error("unknown ruleset '{0}' (expected minimal or extended)")]
    UnknownRuleset(String),

    /// Tree format outside {brackets, newick}
    #[error("unknown tree format '{0}' (expected brackets or newick)")]
    UnknownTreeFormat(String),

    /// Tree value is empty
    #[error("tree value is empty")]
    EmptyTree,

    /// Tree value does not parse under its declared format
    #[error("malformed {format} tree: {reason}")]
    MalformedTree {
        /// Declared format name
        format: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
