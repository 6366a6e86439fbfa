//! Configuration file support
//!
//! Every field is optional in the file; missing tables and keys fall back
//! to the defaults below. Command-line flags override file values.

use crate::error::CliError;
use anyhow::{Context, Result};
use rstlite_engine::config::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Analysis-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Relation rotation policy (`minimal` or `extended`)
    pub ruleset: String,

    /// Language hint (`es`, `en` or `auto`)
    pub lang_hint: String,

    /// Model name recorded in result metadata
    pub model_name: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ruleset: defaults::RULESET.name().to_string(),
            lang_hint: defaults::LANGUAGE_HINT.code().to_string(),
            model_name: defaults::MODEL_NAME.to_string(),
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub max_workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_workers: defaults::MAX_WORKERS,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Write `rst_*.json`
    pub json: bool,

    /// Write `rst_*.txt`
    pub txt: bool,

    /// Write `rst_*.dot`
    pub diagram: bool,

    /// Tree notation in reports (`brackets` or `newick`)
    pub tree_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: true,
            txt: true,
            diagram: false,
            tree_format: "brackets".to_string(),
        }
    }
}

/// `0` means one worker per CPU
pub fn resolve_workers(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get().max(1)
    } else {
        requested
    }
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Commented template with every key at its default
    pub fn template() -> String {
        let defaults = Self::default();
        format!(
            r#"# rstlite configuration

[analysis]
# Relation rotation policy: "minimal" (one generic relation) or
# "extended" (cycle through every relation type)
ruleset = "{ruleset}"

# Language hint: "es", "en" or "auto" (detect from the text)
lang_hint = "{lang_hint}"

# Name recorded under metadata.model
model_name = "{model_name}"

[performance]
# Worker threads for batch analysis (0 = one per CPU)
max_workers = {max_workers}

[output]
# Report files written per text
json = {json}
txt = {txt}
diagram = {diagram}

# Tree notation in reports: "brackets" or "newick"
tree_format = "{tree_format}"
"#,
            ruleset = defaults.analysis.ruleset,
            lang_hint = defaults.analysis.lang_hint,
            model_name = defaults.analysis.model_name,
            max_workers = defaults.performance.max_workers,
            json = defaults.output.json,
            txt = defaults.output.txt,
            diagram = defaults.output.diagram,
            tree_format = defaults.output.tree_format,
        )
    }
}
