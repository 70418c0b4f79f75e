#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Festival record type shared by the scraper, the JSON exporter, and the
//! CLI.
//!
//! A [`FestivalRecord`] is built once per entry block found on the agenda
//! page. Every text field falls back to [`UNKNOWN`] when the page does not
//! publish it; the start date falls back to `None` instead.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Placeholder stored in text fields the agenda page did not publish.
pub const UNKNOWN: &str = "Unknown";

/// The fields extracted from each agenda entry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    /// Festival name
    Name,
    /// Start date as published in the page's `content` attribute
    Date,
    /// Venue or location label
    Location,
    /// City the venue is in
    City,
    /// Country code or name as published
    Country,
}

impl Field {
    /// All fields, in serialization order.
    pub const ALL: &[Self] = &[
        Self::Name,
        Self::Date,
        Self::Location,
        Self::City,
        Self::Country,
    ];
}

/// A single festival listing scraped from the agenda page.
///
/// Records carry no identity. Duplicate listings on the page produce
/// duplicate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalRecord {
    /// Festival name, or [`UNKNOWN`].
    pub name: String,
    /// ISO-8601-like start date. `None` when the page has no start date for
    /// the entry (serialized as `null`, never as [`UNKNOWN`]).
    pub date: Option<String>,
    /// Venue label, or [`UNKNOWN`].
    pub location: String,
    /// City, or [`UNKNOWN`].
    pub city: String,
    /// Country, or [`UNKNOWN`].
    pub country: String,
}

impl Default for FestivalRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN.to_owned(),
            date: None,
            location: UNKNOWN.to_owned(),
            city: UNKNOWN.to_owned(),
            country: UNKNOWN.to_owned(),
        }
    }
}

impl FestivalRecord {
    /// Stores `value` in the slot for `field`.
    ///
    /// `None` resets text fields to [`UNKNOWN`] and clears the date.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        let or_unknown = |v: Option<String>| v.unwrap_or_else(|| UNKNOWN.to_owned());
        match field {
            Field::Name => self.name = or_unknown(value),
            Field::Date => self.date = value,
            Field::Location => self.location = or_unknown(value),
            Field::City => self.city = or_unknown(value),
            Field::Country => self.country = or_unknown(value),
        }
    }
}
