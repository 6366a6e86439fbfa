//! Graphviz diagram formatter

use super::OutputFormatter;
use anyhow::Result;
use rstlite_core::{graph, AnalysisResult, TreeFormat};
use std::io::Write;

/// DOT formatter - one `digraph` for the result's bracket tree
pub struct DotFormatter<W: Write> {
    writer: W,
}

impl<W: Write> DotFormatter<W> {
    /// Create a new DOT formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for DotFormatter<W> {
    fn format_result(&mut self, result: &AnalysisResult) -> Result<()> {
        if result.tree().format() != TreeFormat::Brackets {
            anyhow::bail!(
                "diagrams need a brackets tree, result {} has a {} tree",
                result.id(),
                result.tree().format()
            );
        }
        writeln!(self.writer, "{}", graph::brackets_to_dot(result.tree().value()))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
