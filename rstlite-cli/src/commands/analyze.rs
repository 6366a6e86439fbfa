//! Analyze command implementation

use super::init_logging;
use crate::config::{resolve_workers, CliConfig};
use crate::error::CliError;
use crate::input::discover;
use crate::output::{report_file_name, ReportKind};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use rstlite_core::{AnalysisResult, TreeFormat};
use rstlite_engine::{Analyzer, EngineConfig, EngineError};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// File, directory, list file, glob pattern, or - for stdin
    #[arg(short, long = "in", value_name = "PATH", required = true)]
    pub input: String,

    /// Output directory
    #[arg(short, long = "out", value_name = "DIR", default_value = "out")]
    pub output: PathBuf,

    /// Write JSON reports
    #[arg(long, overrides_with = "no_json")]
    pub json: bool,

    /// Do not write JSON reports
    #[arg(long, overrides_with = "json")]
    pub no_json: bool,

    /// Write plain-text reports
    #[arg(long, overrides_with = "no_txt")]
    pub txt: bool,

    /// Do not write plain-text reports
    #[arg(long, overrides_with = "txt")]
    pub no_txt: bool,

    /// Also write a Graphviz diagram per text
    #[arg(long)]
    pub diagram: bool,

    /// Language hint: es, en or auto
    #[arg(long, value_name = "LANG")]
    pub lang_hint: Option<String>,

    /// Worker threads (0 = one per CPU)
    #[arg(long, value_name = "N")]
    pub max_workers: Option<usize>,

    /// Relation rotation policy: minimal or extended
    #[arg(long, value_name = "NAME")]
    pub ruleset: Option<String>,

    /// Tree notation in reports: brackets or newick
    #[arg(long, value_name = "FORMAT")]
    pub tree_format: Option<String>,

    /// Report failing texts and continue with the rest
    #[arg(long)]
    pub keep_going: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Flags merged over the configuration file
#[derive(Debug)]
struct Settings {
    engine: EngineConfig,
    json: bool,
    txt: bool,
    diagram: bool,
    tree_format: TreeFormat,
}

fn flag(on: bool, off: bool, configured: bool) -> bool {
    if off {
        false
    } else {
        on || configured
    }
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {self:?}");

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let settings = self.settings(&config)?;

        let docs = discover(&self.input)?;
        log::info!(
            "Analyzing {} texts with {} workers",
            docs.len(),
            settings.engine.max_workers
        );

        let analyzer = Analyzer::with_config(settings.engine.clone())?;
        let texts: Vec<&str> = docs.iter().map(|doc| doc.text.as_str()).collect();
        let outcomes: Vec<Result<AnalysisResult, EngineError>> = if self.keep_going {
            analyzer.analyze_batch_isolated(&texts)?
        } else {
            analyzer
                .analyze_batch(&texts)
                .context("Analysis aborted (use --keep-going to skip failing texts)")?
                .into_iter()
                .map(Ok)
                .collect()
        };

        fs::create_dir_all(&self.output).with_context(|| {
            format!("Failed to create output directory: {}", self.output.display())
        })?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_texts(docs.len() as u64);

        // Reports are numbered over written results only, so skipped
        // texts leave no gaps in the rst_<iii> sequence
        let mut written = 0;
        let mut failed = 0;
        for (doc, outcome) in docs.iter().zip(outcomes) {
            match outcome {
                Ok(result) => {
                    written += 1;
                    self.write_reports(written, result, &settings)?;
                }
                Err(err) => {
                    failed += 1;
                    log::error!("Skipping {}: {err}", doc.name);
                    if !self.quiet {
                        eprintln!("Skipped {}: {err}", doc.name);
                    }
                }
            }
            progress.text_completed(&doc.name);
        }
        progress.finish();

        if written == 0 {
            return Err(CliError::AnalysisFailed(format!("all {failed} texts failed")).into());
        }

        println!(
            "OK · {written} texts processed · output in {}",
            self.output.display()
        );
        Ok(())
    }

    fn settings(&self, config: &CliConfig) -> Result<Settings> {
        let analysis = &config.analysis;
        let workers = self
            .max_workers
            .unwrap_or(config.performance.max_workers);

        let engine = EngineConfig::builder()
            .ruleset(self.ruleset.as_deref().unwrap_or(&analysis.ruleset))
            .language_hint(self.lang_hint.as_deref().unwrap_or(&analysis.lang_hint))
            .model_name(analysis.model_name.as_str())
            .max_workers(resolve_workers(workers))
            .build()?;

        let tree_format = self
            .tree_format
            .as_deref()
            .unwrap_or(&config.output.tree_format)
            .parse::<TreeFormat>()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        Ok(Settings {
            engine,
            json: flag(self.json, self.no_json, config.output.json),
            txt: flag(self.txt, self.no_txt, config.output.txt),
            diagram: self.diagram || config.output.diagram,
            tree_format,
        })
    }

    fn write_reports(&self, position: usize, result: AnalysisResult, settings: &Settings) -> Result<()> {
        // Diagrams are drawn from the bracket tree, before any re-encoding
        if settings.diagram {
            self.write_report(position, &result, ReportKind::Dot)?;
        }

        let result = match settings.tree_format {
            TreeFormat::Brackets => result,
            TreeFormat::Newick => result.with_newick_tree()?,
        };
        if settings.json {
            self.write_report(position, &result, ReportKind::Json)?;
        }
        if settings.txt {
            self.write_report(position, &result, ReportKind::Text)?;
        }
        Ok(())
    }

    fn write_report(&self, position: usize, result: &AnalysisResult, kind: ReportKind) -> Result<()> {
        let path = self.output.join(report_file_name(position, result, kind));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        let mut formatter = kind.formatter(BufWriter::new(file));
        formatter.format_result(result)?;
        formatter.finish()?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}
