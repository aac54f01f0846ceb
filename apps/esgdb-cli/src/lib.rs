//! Shared wiring for the esgdb binaries: logging, configuration, index build
//! and load.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use esgdb_core::config::{Config, Settings};
use esgdb_core::data_processor::DataProcessor;
use esgdb_query::{CompanyResolver, KeywordIntentClassifier};
use esgdb_text::{CorpusIndex, SectionRetriever};

/// Logs go to stderr so stdout stays machine-readable.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).try_init();
}

pub fn load_config() -> anyhow::Result<(Config, Settings)> {
    let config = Config::load().context("loading configuration")?;
    let settings = config.settings()?;
    Ok((config, settings))
}

/// Reads every summary record under `summaries_dir`, builds the index and
/// atomically replaces the artifact at `index_path`.
pub fn build_index(summaries_dir: &Path, index_path: &Path, show_progress: bool) -> anyhow::Result<CorpusIndex> {
    let processor = DataProcessor::new();
    let files = processor.list_summary_files(summaries_dir)?;
    let pb = if show_progress { ProgressBar::new(files.len() as u64) } else { ProgressBar::hidden() };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records {msg}")?
            .progress_chars("#>-"),
    );
    let documents = processor.process_files(&files, |_| pb.inc(1))?;
    pb.finish_and_clear();

    let index = CorpusIndex::build(documents);
    index.save(index_path).with_context(|| format!("writing index to {}", index_path.display()))?;
    Ok(index)
}

/// Loads the index once and wraps it for shared read-only use.
pub fn open_retriever(settings: &Settings, base: &Path) -> anyhow::Result<SectionRetriever> {
    let index = CorpusIndex::load(&settings.index_path(base))?;
    Ok(SectionRetriever::new(Arc::new(index))
        .with_snippet_chars(settings.search.snippet_chars)
        .with_budget(settings.search.max_query_millis.map(Duration::from_millis)))
}

pub fn open_resolver(settings: &Settings, base: &Path) -> anyhow::Result<CompanyResolver> {
    let resolver = CompanyResolver::load(&settings.companies_path(base), &settings.aliases_path(base))?;
    if resolver.is_empty() {
        tracing::warn!("company tables are empty; every query will search globally");
    }
    Ok(resolver)
}

pub fn default_classifier(settings: &Settings) -> anyhow::Result<KeywordIntentClassifier> {
    Ok(KeywordIntentClassifier::new(settings.default_intent()?))
}
