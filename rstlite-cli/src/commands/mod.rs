//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use rstlite_core::{RelationType, Ruleset};

pub mod analyze;
pub mod generate_config;
pub mod graph;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze texts and write reports
    Analyze(analyze::AnalyzeArgs),

    /// Emit the graph of a bracket tree
    Graph(graph::GraphArgs),

    /// Validate a result document
    Validate(validate::ValidateArgs),

    /// Generate a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List relation rotation policies
    Rulesets,

    /// List relation types in rotation order
    Relations,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Analyze(args) => args.execute(),
            Commands::Graph(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.lines() {
                    println!("{line}");
                }
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Lines printed for this listing
    pub fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Rulesets => Ruleset::ALL
                .iter()
                .map(|ruleset| {
                    let about = match ruleset {
                        Ruleset::Minimal => "every relation is Elaboration",
                        Ruleset::Extended => "cycle through every relation type",
                    };
                    format!("{:<10} {about}", ruleset.name())
                })
                .collect(),
            ListCommands::Relations => (1..)
                .zip(RelationType::ALL)
                .map(|(position, relation)| format!("{position:>2}. {relation}"))
                .collect(),
        }
    }
}

/// Install the logger for the given verbosity
///
/// `RUST_LOG` still takes precedence over the default filter.
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use clap::Parser;

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::try_parse_from([
            "rstlite",
            "analyze",
            "--in",
            "texts/",
            "--out",
            "reports",
            "--no-txt",
            "--ruleset",
            "minimal",
            "-vv",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.input, "texts/");
                assert_eq!(args.output.to_str(), Some("reports"));
                assert!(args.no_txt);
                assert_eq!(args.ruleset.as_deref(), Some("minimal"));
                assert_eq!(args.verbose, 2);
            }
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_command() {
        let cli = Cli::try_parse_from(["rstlite", "list", "relations"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                subcommand: ListCommands::Relations
            }
        ));
    }

    #[test]
    fn test_analyze_requires_input() {
        assert!(Cli::try_parse_from(["rstlite", "analyze"]).is_err());
    }

    #[test]
    fn test_list_lines() {
        let relations = ListCommands::Relations.lines();
        assert_eq!(relations.len(), 14);
        assert_eq!(relations[0], " 1. Elaboration");
        assert_eq!(relations[13], "14. Circumstance");

        let rulesets = ListCommands::Rulesets.lines();
        assert!(rulesets[0].starts_with("minimal"));
        assert!(rulesets[1].starts_with("extended"));
    }
}
