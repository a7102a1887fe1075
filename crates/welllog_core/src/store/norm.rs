//! Shared value-comparison rules for filter matching.
//!
//! # Responsibility
//! - Define the single equality strategy used by the in-memory adapter and
//!   mirrored by the SQLite schema, so production and test paths cannot
//!   drift apart.
//!
//! # Invariants
//! - Text equality is ASCII case-insensitive, identical to SQLite `NOCASE`.
//! - Date equality compares calendar dates only; `NaiveDate` carries no
//!   time component by construction.

use super::ColumnValue;

/// Equality used for filter matching and key-conflict detection.
pub fn values_equal(left: &ColumnValue, right: &ColumnValue) -> bool {
    match (left, right) {
        (ColumnValue::Id(a), ColumnValue::Id(b)) => a == b,
        (ColumnValue::Text(a), ColumnValue::Text(b)) => a.eq_ignore_ascii_case(b),
        (ColumnValue::Date(a), ColumnValue::Date(b)) => a == b,
        (ColumnValue::Bool(a), ColumnValue::Bool(b)) => a == b,
        (ColumnValue::TextList(a), ColumnValue::TextList(b)) => a == b,
        _ => false,
    }
}

/// Canonical stored form of a calendar date.
pub fn canonical_date(date: &chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::{canonical_date, values_equal};
    use crate::store::ColumnValue;
    use chrono::NaiveDate;

    #[test]
    fn text_equality_ignores_ascii_case() {
        let left = ColumnValue::Text("Observation".to_string());
        let right = ColumnValue::Text("oBSERVATION".to_string());
        assert!(values_equal(&left, &right));
        assert!(!values_equal(
            &left,
            &ColumnValue::Text("symptom".to_string())
        ));
    }

    #[test]
    fn mismatched_kinds_never_match() {
        let text = ColumnValue::Text("true".to_string());
        let flag = ColumnValue::Bool(true);
        assert!(!values_equal(&text, &flag));
    }

    #[test]
    fn canonical_date_is_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(canonical_date(&date), "2024-01-05");
    }
}
