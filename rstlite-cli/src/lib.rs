//! rstlite CLI library
//!
//! Command-line front end for the rstlite heuristic discourse analyzer.
//! Reads texts from files, directories, globs or stdin, runs them through
//! the engine and writes JSON, plain-text and DOT reports.

use clap::Parser;

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

/// Heuristic rhetorical-structure analysis
#[derive(Debug, Parser)]
#[command(name = "rstlite", version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: commands::Commands,
}
