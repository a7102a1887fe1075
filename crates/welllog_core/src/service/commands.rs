//! Command payloads accepted by the handler.
//!
//! One struct per use case; field names follow the external wire schema
//! (camelCase, `type` for the kind field).

use crate::model::entry::{CategoryType, Entry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Adds or replaces one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEntryCmd {
    pub entry: Entry,
}

/// Deletes one entry by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEntryCmd {
    pub date: NaiveDate,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Looks up one entry by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEntryCmd {
    pub date: NaiveDate,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Lists entries, optionally bounded by date range and (category, type)
/// pairs. Empty `pairs` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesCmd {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub pairs: Vec<CategoryType>,
}

/// Declares a new (category, type) definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTypeCmd {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub allow_multiple: bool,
}

/// Deletes a (category, type) definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTypeCmd {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Adds one allowed value under a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddValueCmd {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub notable: bool,
}

/// Removes one allowed value from a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteValueCmd {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Lists full definitions for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDefinitionsCmd {
    pub category: String,
}

/// Lists allowed values for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetValuesCmd {
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::ListEntriesCmd;

    #[test]
    fn list_cmd_accepts_missing_optional_fields() {
        let cmd: ListEntriesCmd = serde_json::from_str("{}").unwrap();
        assert!(cmd.start_date.is_none());
        assert!(cmd.end_date.is_none());
        assert!(cmd.pairs.is_empty());
    }

    #[test]
    fn list_cmd_parses_wire_shape() {
        let json = r#"{
            "startDate": "2024-01-01",
            "endDate": "2024-12-31",
            "pairs": [{ "category": "observation", "type": "mood" }]
        }"#;
        let cmd: ListEntriesCmd = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.pairs.len(), 1);
        assert_eq!(cmd.pairs[0].kind, "mood");
    }
}
