//! Single-text and batch analysis entry points

use crate::batch::BatchRunner;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use rstlite_core::result::{validate_with_relaxation, ResultDraft, TreeDraft};
use rstlite_core::{language, pragmatics, relations, segmenter, tree};
use rstlite_core::{AnalysisResult, Lang, Ruleset};

/// Runs the analysis pipeline under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: EngineConfig,
}

impl Analyzer {
    /// Analyzer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with an explicit configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one text with the configured hint and ruleset
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        self.analyze_with(text, self.config.language_hint, self.config.ruleset)
    }

    /// Analyze one text, overriding hint and ruleset
    pub fn analyze_with(&self, text: &str, hint: Lang, ruleset: Ruleset) -> Result<AnalysisResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidInput {
                reason: "text is empty".into(),
            });
        }

        let lang = language::detect(trimmed, Some(hint));
        let edus = segmenter::segment(trimmed)?;
        let relations = relations::assign(&edus, ruleset)?;
        let tree = tree::build(&edus, &relations);
        let id = pragmatics::fingerprint(trimmed);

        log::debug!(
            "analyzed {id}: lang={lang}, {} EDUs, {} relations",
            edus.len(),
            relations.len()
        );

        let draft = ResultDraft {
            id,
            lang: lang.code().to_string(),
            pragmatic_summary: pragmatics::summary(&edus, lang),
            metadata: serde_metadata(pragmatics::metadata(
                trimmed,
                ruleset,
                &self.config.model_name,
            )),
            edus,
            relations: Some(relations),
            tree: Some(TreeDraft::brackets(tree)),
        };

        Ok(validate_with_relaxation(draft)?)
    }

    /// Analyze every text on the worker pool, in input order
    ///
    /// The first failing text fails the whole batch.
    pub fn analyze_batch<S>(&self, texts: &[S]) -> Result<Vec<AnalysisResult>>
    where
        S: AsRef<str> + Sync,
    {
        BatchRunner::new(self.config.max_workers)?.run(texts, |text| self.analyze(text.as_ref()))
    }

    /// Analyze every text, keeping each failure in its own slot
    pub fn analyze_batch_isolated<S>(&self, texts: &[S]) -> Result<Vec<Result<AnalysisResult>>>
    where
        S: AsRef<str> + Sync,
    {
        let runner = BatchRunner::new(self.config.max_workers)?;
        Ok(runner.run_isolated(texts, |text| self.analyze(text.as_ref())))
    }
}

fn serde_metadata(metadata: rstlite_core::Metadata) -> serde_json::Value {
    serde_json::Value::Object(metadata.into_iter().collect())
}

/// Analyze one text from string-typed settings
///
/// `hint` of `None` means detect. Fails with `InvalidInput` for blank text
/// and `InvalidConfig` for an unknown ruleset or hint.
pub fn analyze_one(text: &str, hint: Option<&str>, ruleset: &str) -> Result<AnalysisResult> {
    let analyzer = Analyzer::with_config(settings(None, hint, ruleset)?)?;
    analyzer.analyze(text)
}

/// Analyze many texts from string-typed settings, in input order
pub fn analyze_batch<S>(
    texts: &[S],
    max_workers: usize,
    hint: Option<&str>,
    ruleset: &str,
) -> Result<Vec<AnalysisResult>>
where
    S: AsRef<str> + Sync,
{
    let analyzer = Analyzer::with_config(settings(Some(max_workers), hint, ruleset)?)?;
    analyzer.analyze_batch(texts)
}

fn settings(max_workers: Option<usize>, hint: Option<&str>, ruleset: &str) -> Result<EngineConfig> {
    let mut builder = EngineConfig::builder().ruleset(ruleset);
    if let Some(workers) = max_workers {
        builder = builder.max_workers(workers);
    }
    if let Some(code) = hint {
        builder = builder.language_hint(code);
    }
    builder.build()
}
