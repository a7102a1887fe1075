//! Well-being entry domain model.
//!
//! # Responsibility
//! - Define the canonical record for one logged fact per day.
//! - Provide key validation used by every repository write path.
//!
//! # Invariants
//! - (date, category, type) is the unique identity of an entry.
//! - Dates carry no time component; comparisons are calendar-only.
//! - `values` round-trips exactly: order preserved, empty list allowed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One recorded well-being fact.
///
/// The `kind` field is serialized as `type` to match the external wire
/// schema; `category` groups kinds (e.g. "observation", "symptom").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Calendar date of the observation. No time-of-day component exists.
    pub date: NaiveDate,
    /// Free-form label grouping types (e.g. "observation").
    pub category: String,
    /// Free-form label identifying what is recorded within a category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Ordered values recorded for this (date, category, type). May be empty.
    pub values: Vec<String>,
}

/// One (category, type) pair, as used by list filters and the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryType {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CategoryType {
    pub fn new(category: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            kind: kind.into(),
        }
    }

    /// Case-insensitive match against a concrete category/type pair.
    pub fn matches(&self, category: &str, kind: &str) -> bool {
        self.category.eq_ignore_ascii_case(category) && self.kind.eq_ignore_ascii_case(kind)
    }
}

/// Validation failures for entry and catalog keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValidationError {
    BlankCategory,
    BlankType,
    BlankValue,
}

impl Display for KeyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCategory => write!(f, "category must not be blank"),
            Self::BlankType => write!(f, "type must not be blank"),
            Self::BlankValue => write!(f, "value must not be blank"),
        }
    }
}

impl Error for KeyValidationError {}

impl Entry {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        kind: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            kind: kind.into(),
            values,
        }
    }

    /// Checks key fields before persistence.
    ///
    /// # Invariants
    /// - `category` and `kind` must contain non-whitespace characters.
    /// - `values` content is not constrained here; empty entries are legal.
    pub fn validate(&self) -> Result<(), KeyValidationError> {
        validate_key(&self.category, &self.kind)
    }
}

/// Shared key check for entries and definitions.
pub fn validate_key(category: &str, kind: &str) -> Result<(), KeyValidationError> {
    if category.trim().is_empty() {
        return Err(KeyValidationError::BlankCategory);
    }
    if kind.trim().is_empty() {
        return Err(KeyValidationError::BlankType);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_key, CategoryType, Entry, KeyValidationError};
    use chrono::NaiveDate;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn validate_rejects_blank_keys() {
        let entry = Entry::new(date("2024-01-10"), "  ", "mood", vec![]);
        assert_eq!(entry.validate(), Err(KeyValidationError::BlankCategory));

        let entry = Entry::new(date("2024-01-10"), "observation", "", vec![]);
        assert_eq!(entry.validate(), Err(KeyValidationError::BlankType));

        assert!(validate_key("observation", "mood").is_ok());
    }

    #[test]
    fn category_type_matches_ignores_case() {
        let pair = CategoryType::new("Observation", "Mood");
        assert!(pair.matches("observation", "MOOD"));
        assert!(!pair.matches("symptom", "mood"));
    }

    #[test]
    fn entry_serializes_kind_as_type() {
        let entry = Entry::new(
            date("2024-01-10"),
            "observation",
            "mood",
            vec!["happy".to_string()],
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "mood");
        assert_eq!(json["date"], "2024-01-10");
        assert_eq!(json["values"][0], "happy");
    }
}
