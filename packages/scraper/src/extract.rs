//! Festival entry extraction.
//!
//! Parses the agenda HTML, selects every entry block, and maps each one to a
//! [`FestivalRecord`] using the rules of a [`CompiledLayout`]. Fields that
//! are simply absent fall back to their defaults. Structural problems (a
//! required container is missing, a matched element lacks the attribute
//! holding the value) fail only the entry they occur in: the failure is
//! logged and kept in [`Extraction::skipped`], and the remaining entries are
//! still processed.

use festiscrape_festival_models::{FestivalRecord, Field};
use scraper::{ElementRef, Html, Selector};

use crate::layout::{CompiledLayout, CompiledRule, ValueSource};

/// Errors that abort extraction of a single entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A container the field must be looked up in is missing.
    #[error("{field}: no element matching '{selector}'")]
    MissingElement {
        /// Field being extracted.
        field: Field,
        /// Selector that matched nothing.
        selector: String,
    },

    /// The matched element does not carry the attribute holding the value.
    #[error("{field}: '{selector}' has no '{attribute}' attribute")]
    MissingAttribute {
        /// Field being extracted.
        field: Field,
        /// Selector of the matched element.
        selector: String,
        /// Attribute that was expected.
        attribute: String,
    },
}

/// An entry block that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// Zero-based position of the entry block in the document.
    pub index: usize,
    /// Why the entry was skipped.
    pub error: ExtractError,
}

/// Result of extracting a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Records in document order.
    pub records: Vec<FestivalRecord>,
    /// Entries that were skipped.
    pub skipped: Vec<EntryFailure>,
}

/// Extracts every festival entry from `html`.
///
/// A page without entry blocks yields an empty [`Extraction`]; that is not
/// an error.
#[must_use]
pub fn extract_festivals(html: &str, layout: &CompiledLayout) -> Extraction {
    let document = parse_entries_document(html, layout);
    let mut extraction = Extraction::default();

    for (index, entry) in document.select(&layout.entry).enumerate() {
        match extract_entry(entry, layout) {
            Ok(record) => extraction.records.push(record),
            Err(error) => {
                log::error!("Error processing festival entry {index}: {error}");
                extraction.skipped.push(EntryFailure { index, error });
            }
        }
    }

    log::debug!(
        "Extracted {} festival(s), skipped {}",
        extraction.records.len(),
        extraction.skipped.len()
    );

    extraction
}

/// Parses `html`, keeping table sections that appear outside a `<table>`.
///
/// HTML5 tree building drops a stray `<tbody>` together with its tags, so a
/// snippet made only of entry blocks would otherwise yield nothing. When no
/// entry is found and the document has no table, the input is parsed again
/// wrapped in `<table>`.
fn parse_entries_document(html: &str, layout: &CompiledLayout) -> Html {
    let document = Html::parse_document(html);
    if document.select(&layout.entry).next().is_some() {
        return document;
    }

    let table_sel = Selector::parse("table").unwrap_or_else(|_| unreachable!());
    if document.select(&table_sel).next().is_some() {
        return document;
    }

    log::debug!("No entry blocks outside a table, parsing again inside one");
    Html::parse_document(&format!("<table>{html}</table>"))
}

/// Builds a record from one entry block.
///
/// # Errors
///
/// Returns the first [`ExtractError`] raised by any of the layout's rules.
pub fn extract_entry(
    entry: ElementRef<'_>,
    layout: &CompiledLayout,
) -> Result<FestivalRecord, ExtractError> {
    let mut record = FestivalRecord::default();
    for rule in &layout.rules {
        record.set(rule.field, lookup(entry, rule)?);
    }
    Ok(record)
}

fn lookup(entry: ElementRef<'_>, rule: &CompiledRule) -> Result<Option<String>, ExtractError> {
    let scope = match &rule.within {
        Some((selector_str, selector)) => {
            entry
                .select(selector)
                .next()
                .ok_or_else(|| ExtractError::MissingElement {
                    field: rule.field,
                    selector: (*selector_str).to_owned(),
                })?
        }
        None => entry,
    };

    let Some(element) = scope.select(&rule.target).next() else {
        return Ok(None);
    };

    match rule.value {
        ValueSource::Text => Ok(Some(element.text().collect::<String>())),
        ValueSource::Attr(attribute) => element
            .value()
            .attr(attribute)
            .map(|value| Some(value.to_owned()))
            .ok_or_else(|| ExtractError::MissingAttribute {
                field: rule.field,
                selector: rule.selector.to_owned(),
                attribute: attribute.to_owned(),
            }),
    }
}
