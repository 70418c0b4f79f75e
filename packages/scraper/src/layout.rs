//! Agenda page layout: which markup holds which field.
//!
//! Everything the extractor knows about the page's markup lives in
//! [`PageLayout::agenda`]. When the site changes its class names or
//! attributes, that table is the only thing to edit.

use festiscrape_festival_models::Field;
use scraper::Selector;

use crate::ScrapeError;

/// Where a field's value is read from once its element is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Concatenated text of the element and its descendants, untrimmed.
    Text,
    /// The named attribute. A matched element without the attribute fails
    /// the whole entry.
    Attr(&'static str),
}

/// How to find one field inside an entry block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field this rule fills.
    pub field: Field,
    /// Container the target must be looked up in. When set, an entry
    /// without the container fails instead of falling back to the default.
    pub within: Option<&'static str>,
    /// CSS selector for the element holding the value. The first match
    /// wins.
    pub selector: &'static str,
    /// Which part of the element is the value.
    pub value: ValueSource,
}

/// Selectors describing an agenda page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// CSS selector for entry blocks. Each match becomes one record.
    pub entry_selector: &'static str,
    /// One rule per extracted field.
    pub rules: Vec<FieldRule>,
}

impl PageLayout {
    /// Layout of the partyflock festival agenda.
    ///
    /// The city lookup is scoped to the span whose class attribute is
    /// exactly `nowrap light7`: the anchor inside it is optional, the span
    /// itself is not.
    #[must_use]
    pub fn agenda() -> Self {
        Self {
            entry_selector: "tbody.hl",
            rules: vec![
                FieldRule {
                    field: Field::Name,
                    within: None,
                    selector: r#"span[itemprop="name"]"#,
                    value: ValueSource::Text,
                },
                FieldRule {
                    field: Field::Date,
                    within: None,
                    selector: r#"meta[itemprop="startDate"]"#,
                    value: ValueSource::Attr("content"),
                },
                FieldRule {
                    field: Field::Location,
                    within: None,
                    selector: r#"a[href*="/location/"]"#,
                    value: ValueSource::Text,
                },
                FieldRule {
                    field: Field::City,
                    within: Some(r#"span[class="nowrap light7"]"#),
                    selector: "a",
                    value: ValueSource::Text,
                },
                FieldRule {
                    field: Field::Country,
                    within: None,
                    selector: r#"meta[itemprop="addressCountry"]"#,
                    value: ValueSource::Attr("content"),
                },
            ],
        }
    }

    /// Parses every selector in the layout.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Parse`] naming the first selector that is not
    /// valid CSS.
    pub fn compile(&self) -> Result<CompiledLayout, ScrapeError> {
        let entry = parse_selector(self.entry_selector)?;
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    field: rule.field,
                    within: rule
                        .within
                        .map(|within| parse_selector(within).map(|sel| (within, sel)))
                        .transpose()?,
                    target: parse_selector(rule.selector)?,
                    selector: rule.selector,
                    value: rule.value,
                })
            })
            .collect::<Result<Vec<_>, ScrapeError>>()?;

        Ok(CompiledLayout { entry, rules })
    }
}

/// A [`PageLayout`] with its selectors parsed, ready for extraction.
#[derive(Debug, Clone)]
pub struct CompiledLayout {
    pub(crate) entry: Selector,
    pub(crate) rules: Vec<CompiledRule>,
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) field: Field,
    pub(crate) within: Option<(&'static str, Selector)>,
    pub(crate) selector: &'static str,
    pub(crate) target: Selector,
    pub(crate) value: ValueSource,
}

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Parse(format!("invalid CSS selector '{selector}': {e}")))
}
