//! Validate command implementation

use super::init_logging;
use crate::input::FileReader;
use anyhow::{Context, Result};
use clap::Args;
use rstlite_core::result::{relax, validate, ResultDraft};
use rstlite_core::AnalysisResult;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Result document (JSON) to validate
    #[arg(short, long = "in", value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// How a document passed validation
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Valid as written
    Valid(AnalysisResult),
    /// Valid after filling in missing relations or tree
    Relaxed(AnalysisResult, String),
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);
        println!("Validating result document: {}", self.input.display());

        let content = FileReader::read_text(&self.input)?;
        match check(&content) {
            Ok(Outcome::Valid(result)) => {
                println!("✓ Result is valid!");
                print_summary(&result);
                Ok(())
            }
            Ok(Outcome::Relaxed(result, reason)) => {
                println!("✓ Result is valid after relaxation ({reason})");
                print_summary(&result);
                Ok(())
            }
            Err(e) => {
                println!("✗ Result is invalid!");
                println!("  Error: {e:#}");
                Err(e.context("Validation failed"))
            }
        }
    }
}

fn print_summary(result: &AnalysisResult) {
    println!("  Id: {}", result.id());
    println!("  Language: {}", result.lang());
    println!("  EDUs: {}", result.edus().len());
    println!("  Relations: {}", result.relations().len());
}

/// Parse and validate a JSON document, relaxing once if that helps
pub fn check(content: &str) -> Result<Outcome> {
    let draft: ResultDraft =
        serde_json::from_str(content).context("Not a well-formed result document")?;

    match validate(&draft) {
        Ok(result) => Ok(Outcome::Valid(result)),
        Err(err) if err.is_relaxable() => {
            let result = validate(&relax(draft))?;
            Ok(Outcome::Relaxed(result, err.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstlite_engine::analyze_one;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn document() -> serde_json::Value {
        let result = analyze_one("El perro corre. El gato duerme.", None, "extended").unwrap();
        serde_json::to_value(result).unwrap()
    }

    #[test]
    fn test_valid_document() {
        let outcome = check(&document().to_string()).unwrap();
        assert!(matches!(outcome, Outcome::Valid(_)));
    }

    #[test]
    fn test_missing_relations_and_empty_tree_are_relaxed() {
        let mut doc = document();
        doc.as_object_mut().unwrap().remove("relations");
        doc["tree"]["value"] = "".into();

        match check(&doc.to_string()).unwrap() {
            Outcome::Relaxed(result, reason) => {
                assert!(result.relations().is_empty());
                assert_eq!(result.tree().value(), "(Summary (N 1))");
                assert_eq!(reason, "relations are missing");
            }
            other => panic!("expected relaxation, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_documents() {
        let mut no_edus = document();
        no_edus["edus"] = serde_json::json!([]);
        assert!(check(&no_edus.to_string()).is_err());

        let mut bad_span = document();
        bad_span["edus"][0]["span"] = serde_json::json!({"start": 9, "end": 2});
        assert!(check(&bad_span.to_string()).is_err());

        assert!(check("not json").is_err());
    }

    #[test]
    fn test_execute_on_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", document()).unwrap();

        let args = ValidateArgs {
            input: file.path().to_path_buf(),
            verbose: 0,
        };
        assert!(args.execute().is_ok());
    }
}
