//! Plain text report formatter

use super::OutputFormatter;
use anyhow::Result;
use rstlite_core::{AnalysisResult, RoleChunk};
use std::io::Write;

/// Plain text formatter - EDUs, relation table, tree and summary
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn join_ids(chunk: &RoleChunk) -> String {
    chunk
        .edu_ids()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_result(&mut self, result: &AnalysisResult) -> Result<()> {
        let w = &mut self.writer;

        writeln!(w, "EDUs")?;
        for edu in result.edus() {
            writeln!(w, "[{}] {}", edu.id(), edu.text())?;
        }

        writeln!(w)?;
        writeln!(w, "Relations (type | nucleus | satellite | confidence)")?;
        for relation in result.relations() {
            writeln!(
                w,
                "{} | {} | {} | {:.2}",
                relation.kind(),
                join_ids(relation.nucleus()),
                join_ids(relation.satellite()),
                relation.confidence()
            )?;
        }

        writeln!(w)?;
        writeln!(w, "Tree ({})", result.tree().format())?;
        writeln!(w, "{}", result.tree().value())?;

        writeln!(w)?;
        writeln!(w, "Pragmatic summary")?;
        writeln!(w, "{}", result.pragmatic_summary())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstlite_engine::analyze_one;

    #[test]
    fn test_text_report() {
        let result = analyze_one("One. Two. Three.", Some("en"), "extended").unwrap();
        let mut buffer = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buffer);
            formatter.format_result(&result).unwrap();
            formatter.finish().unwrap();
        }

        let report = String::from_utf8(buffer).unwrap();
        let expected = "\
EDUs
[1] One.
[2] Two.
[3] Three.

Relations (type | nucleus | satellite | confidence)
Elaboration | 1 | 2 | 0.60
Evidence | 2 | 3 | 0.60

Tree (brackets)
(Background (Evidence (Elaboration (N 1) (N 2)) (N 3)))

Pragmatic summary
Summary: One. Two.
";
        assert_eq!(report, expected);
    }
}
