//! Orchestration for rstlite analysis
//!
//! Holds the explicit configuration, the [`Analyzer`] that runs the
//! pipeline on one text, and the [`BatchRunner`] that spreads many texts
//! over a bounded worker pool.

#![warn(missing_docs)]

pub mod analyzer;
pub mod batch;
pub mod config;
pub mod error;

pub use analyzer::{analyze_batch, analyze_one, Analyzer};
pub use batch::BatchRunner;
pub use config::{EngineConfig, EngineConfigBuilder};
pub use error::{EngineError, Result};

// Re-export from core for convenience
pub use rstlite_core::{AnalysisResult, Lang, RelationType, Ruleset};
