//! Saved-page source.
//!
//! Reads a copy of the agenda page saved from a browser so extraction can
//! run without touching the network. Invalid UTF-8 is replaced rather than
//! rejected, matching how lenient the HTML parser is about everything else.

use std::path::PathBuf;

use crate::{PageSource, ScrapeError};

/// Reads the agenda page from a local HTML file.
#[derive(Debug, Clone)]
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    /// Creates a page source that reads `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FilePageSource {
    async fn fetch_html(&self) -> Result<String, ScrapeError> {
        log::info!("Reading saved page {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
