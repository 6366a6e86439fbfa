//! Error handling for the CLI application

use std::fmt;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Input path, list entry or pattern matched nothing readable
    InputNotFound(String),
    /// Invalid glob pattern
    InvalidPattern(String),
    /// Configuration file or flag error
    ConfigError(String),
    /// Every input failed analysis
    AnalysisFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputNotFound(what) => write!(f, "No input found: {what}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::AnalysisFailed(msg) => write!(f, "Analysis failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
