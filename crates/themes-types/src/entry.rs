//! Journal entry type.
//!
//! Entries are loaded once per invocation by the caller and never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// Date format accepted on entries.
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// A dated free-text journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Raw entry text as written by the user
    pub text: String,

    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
}

impl Entry {
    /// Create a new entry.
    pub fn new(text: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            date: date.into(),
        }
    }

    /// Create an entry from an already-parsed date.
    pub fn on(text: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(text, date.format(ENTRY_DATE_FORMAT).to_string())
    }

    /// Parse the entry date. Returns `None` for malformed dates.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), ENTRY_DATE_FORMAT).ok()
    }

    /// Parse a JSON array of `{text, date}` objects.
    ///
    /// Date strings are not checked here; malformed dates are skipped by
    /// the window filter.
    pub fn parse_json_array(json: &str) -> Result<Vec<Entry>, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }
}
