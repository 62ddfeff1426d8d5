//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for admission dates (`YYYY-MM-DD`).
pub const ADMISSION_DATE_FORMAT: &str = "%Y-%m-%d";

/// An admitted patient.
///
/// Records are created once, either by a seed provider or by the intake
/// path, and are never edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Opaque unique ID, assigned at creation
    pub id: String,
    /// Full name (trimmed, whitespace collapsed)
    pub name: String,
    /// National ID number, 16 decimal digits
    pub national_id: String,
    /// Diagnosis text (trimmed, whitespace collapsed)
    pub diagnosis: String,
    /// Admission date as `YYYY-MM-DD`
    pub admission_date: String,
    /// Attending doctor label
    pub doctor: String,
    /// Room label
    pub room: String,
}

impl Patient {
    /// Parse the admission date as a calendar date.
    ///
    /// Returns `None` when the stored text is not a `YYYY-MM-DD` date.
    pub fn admission_date(&self) -> Option<NaiveDate> {
        parse_admission_date(&self.admission_date)
    }

    /// Check whether this record matches a search term.
    ///
    /// The name is compared case-insensitively; the national ID is compared
    /// as-is. An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term.to_lowercase()) || self.national_id.contains(term)
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_admission_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, ADMISSION_DATE_FORMAT).ok()
}
