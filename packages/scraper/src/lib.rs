#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Agenda page fetching and festival entry extraction.
//!
//! A [`PageSource`] produces the raw HTML of the festival agenda, either
//! over HTTP ([`http::HttpPageSource`]) or from a saved copy on disk
//! ([`file::FilePageSource`]). The HTML is then handed to
//! [`extract::extract_festivals`], which walks every entry block described
//! by a [`layout::PageLayout`] and builds one
//! [`festiscrape_festival_models::FestivalRecord`] per entry.

pub mod extract;
pub mod file;
pub mod http;
pub mod layout;

use std::collections::BTreeMap;
use std::time::Duration;

/// Festival agenda scraped by default.
pub const AGENDA_URL: &str = "https://partyflock.nl/agenda/festivals";

/// Browser identity sent with the agenda request. The site serves a
/// reduced page to unknown clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Errors that can occur while obtaining or preparing to parse a page.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A selector or header could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reading a saved page failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for fetching the agenda page.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// The URL to fetch.
    pub url: String,
    /// HTTP headers to include in the request.
    pub headers: BTreeMap<String, String>,
    /// Overall request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ScrapeConfig {
    /// Creates a new `ScrapeConfig` for the given URL with no headers and no
    /// timeout.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            headers: BTreeMap::new(),
            timeout: None,
        }
    }

    /// Configuration for the festival agenda: [`AGENDA_URL`] requested with
    /// [`BROWSER_USER_AGENT`].
    #[must_use]
    pub fn agenda() -> Self {
        Self::new(AGENDA_URL).with_header("User-Agent", BROWSER_USER_AGENT)
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds an HTTP header to include in requests, replacing any previous
    /// value for the same name.
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_owned(), value.to_owned());
        self
    }
}

/// Something that can produce the raw HTML of the agenda page.
pub trait PageSource: Send + Sync {
    /// Returns the page body as text.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the page cannot be obtained.
    fn fetch_html(&self) -> impl std::future::Future<Output = Result<String, ScrapeError>> + Send;

    /// Human-readable description of where the page comes from, for log
    /// messages.
    fn describe(&self) -> String;
}
