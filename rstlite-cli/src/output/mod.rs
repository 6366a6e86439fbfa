//! Output formatting module

use anyhow::Result;
use rstlite_core::AnalysisResult;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one analysis result
    fn format_result(&mut self, result: &AnalysisResult) -> Result<()>;

    /// Finalize output (flush the writer)
    fn finish(&mut self) -> Result<()>;
}

pub mod dot;
pub mod json;
pub mod text;

pub use dot::DotFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Report kinds written per analyzed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Pretty-printed result document
    Json,
    /// Human-readable report
    Text,
    /// Graphviz diagram of the tree
    Dot,
}

impl ReportKind {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ReportKind::Json => "json",
            ReportKind::Text => "txt",
            ReportKind::Dot => "dot",
        }
    }

    /// Formatter for this kind writing to `writer`
    pub fn formatter<W>(&self, writer: W) -> Box<dyn OutputFormatter>
    where
        W: std::io::Write + Send + Sync + 'static,
    {
        match self {
            ReportKind::Json => Box::new(JsonFormatter::new(writer)),
            ReportKind::Text => Box::new(TextFormatter::new(writer)),
            ReportKind::Dot => Box::new(DotFormatter::new(writer)),
        }
    }
}

/// `rst_<iii>_<id>.<ext>` with a 1-based position
pub fn report_file_name(position: usize, result: &AnalysisResult, kind: ReportKind) -> String {
    format!("rst_{position:03}_{}.{}", result.id(), kind.extension())
}
