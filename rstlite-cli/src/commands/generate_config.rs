//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, CliConfig::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the file to change rulesets, workers or report types");
        println!("2. Use it for analysis:");
        println!(
            "   rstlite analyze --in texts/ --out reports/ -c {}",
            self.output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_file_loads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rstlite.toml");

        let args = GenerateConfigArgs {
            output: path.clone(),
        };
        args.execute().unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_unwritable_destination() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("/nonexistent/dir/rstlite.toml"),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to write to"));
    }
}
