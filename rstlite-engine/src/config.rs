//! Engine configuration
//!
//! Everything the pipeline needs to know beyond the text itself is carried
//! in an [`EngineConfig`] handed to the analyzer when it is built.

use crate::error::{EngineError, Result};
use rstlite_core::{Lang, Ruleset};
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    use rstlite_core::{Lang, Ruleset};

    /// Model name recorded in result metadata
    pub const MODEL_NAME: &str = "heuristic-rst";
    /// Worker threads for batch analysis
    pub const MAX_WORKERS: usize = 4;
    /// Relation rotation policy
    pub const RULESET: Ruleset = Ruleset::Extended;
    /// Language hint (detect from content)
    pub const LANGUAGE_HINT: Lang = Lang::Auto;
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name written to the `model` metadata key
    pub model_name: String,
    /// Upper bound on concurrently analyzed texts
    pub max_workers: usize,
    /// Relation rotation policy
    pub ruleset: Ruleset,
    /// Language override; `Auto` runs detection
    pub language_hint: Lang,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_name: defaults::MODEL_NAME.to_string(),
            max_workers: defaults::MAX_WORKERS,
            ruleset: defaults::RULESET,
            language_hint: defaults::LANGUAGE_HINT,
        }
    }
}

impl EngineConfig {
    /// Create a configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Single worker, otherwise default
    pub fn sequential() -> Self {
        Self {
            max_workers: 1,
            ..Self::default()
        }
    }

    /// Check values that the types alone do not constrain
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(EngineError::InvalidConfig(
                "max_workers must be greater than 0".into(),
            ));
        }
        if self.model_name.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "model_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder accepting the string forms used on command lines
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    model_name: Option<String>,
    max_workers: Option<usize>,
    ruleset: Option<String>,
    language_hint: Option<String>,
}

impl EngineConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model name
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Set the worker count
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Set the ruleset by name (`minimal` or `extended`)
    pub fn ruleset(mut self, name: impl Into<String>) -> Self {
        self.ruleset = Some(name.into());
        self
    }

    /// Set the language hint by code (`es`, `en` or `auto`, any case)
    pub fn language_hint(mut self, code: impl Into<String>) -> Self {
        self.language_hint = Some(code.into().trim().to_lowercase());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let mut config = EngineConfig::default();

        if let Some(name) = self.model_name {
            config.model_name = name;
        }
        if let Some(workers) = self.max_workers {
            config.max_workers = workers;
        }
        if let Some(name) = self.ruleset {
            config.ruleset = name.parse().map_err(EngineError::config)?;
        }
        if let Some(code) = self.language_hint {
            config.language_hint = code.parse().map_err(EngineError::config)?;
        }

        config.validate()?;
        Ok(config)
    }
}
