#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Festival agenda scrape pipeline.
//!
//! [`run`] fetches the agenda page once, extracts every festival entry, and
//! writes the records to a JSON file. All inputs (URL, headers, output
//! path, page layout) arrive through [`RunOptions`], so the pipeline can be
//! driven against a saved page without any network access.

use std::fmt;
use std::path::{Path, PathBuf};

use festiscrape_export::{DEFAULT_OUTPUT, ExportError, write_festivals};
use festiscrape_scraper::extract::extract_festivals;
use festiscrape_scraper::file::FilePageSource;
use festiscrape_scraper::http::HttpPageSource;
use festiscrape_scraper::layout::PageLayout;
use festiscrape_scraper::{PageSource, ScrapeConfig, ScrapeError};

/// Errors that abort a scrape run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Fetching the page or preparing the layout failed.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// Writing the output file failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Everything a scrape run needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Where and how to fetch the agenda page.
    pub config: ScrapeConfig,
    /// Read the page from this saved file instead of fetching `config.url`.
    pub html_file: Option<PathBuf>,
    /// Output JSON file. Overwritten if it exists.
    pub output: PathBuf,
    /// Markup the extractor looks for.
    pub layout: PageLayout,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: ScrapeConfig::agenda(),
            html_file: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            layout: PageLayout::agenda(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of records written.
    pub count: usize,
    /// Number of entries skipped because their markup could not be read.
    pub skipped: usize,
    /// File the records were written to.
    pub output: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Scraped {} festivals", self.count)?;
        write!(f, "Data saved to {}", self.output.display())
    }
}

/// Runs the scrape described by `options`.
///
/// # Errors
///
/// Returns [`RunError`] if the page cannot be obtained, the layout does not
/// compile, or the output file cannot be written. Entries that fail to
/// extract are skipped and do not fail the run.
pub async fn run(options: &RunOptions) -> Result<RunSummary, RunError> {
    match &options.html_file {
        Some(path) => {
            run_with_source(&FilePageSource::new(path), &options.layout, &options.output).await
        }
        None => {
            let source = HttpPageSource::new(options.config.clone());
            run_with_source(&source, &options.layout, &options.output).await
        }
    }
}

/// Runs the scrape against an arbitrary [`PageSource`].
///
/// # Errors
///
/// See [`run`].
pub async fn run_with_source(
    source: &impl PageSource,
    layout: &PageLayout,
    output: &Path,
) -> Result<RunSummary, RunError> {
    let layout = layout.compile()?;

    let html = source.fetch_html().await?;
    let extraction = extract_festivals(&html, &layout);

    if !extraction.skipped.is_empty() {
        log::warn!(
            "Skipped {} festival entr{} from {}",
            extraction.skipped.len(),
            if extraction.skipped.len() == 1 { "y" } else { "ies" },
            source.describe()
        );
    }

    write_festivals(output, &extraction.records)?;
    log::info!(
        "Saved {} festival(s) to {}",
        extraction.records.len(),
        output.display()
    );

    Ok(RunSummary {
        count: extraction.records.len(),
        skipped: extraction.skipped.len(),
        output: output.to_path_buf(),
    })
}
