//! Definition catalog domain model.
//!
//! # Responsibility
//! - Declare which (category, type) combinations are legal.
//! - Carry the allowed values per type, with the notable flag used by the
//!   UI to highlight clinically/personally significant entries.
//!
//! # Invariants
//! - (category, type) is unique across definitions.
//! - (parent type, value) is unique across allowed values. Values are keyed
//!   by type alone; two categories sharing a type name share its value set.

use serde::{Deserialize, Serialize};

/// One legal value for a given type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedValue {
    pub value: String,
    pub notable: bool,
}

impl AllowedValue {
    pub fn new(value: impl Into<String>, notable: bool) -> Self {
        Self {
            value: value.into(),
            notable,
        }
    }
}

/// Catalog entry declaring a legal (category, type) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether an entry of this type may carry more than one value.
    #[serde(rename = "allowMultiple")]
    pub allow_multiple: bool,
    pub values: Vec<AllowedValue>,
}

/// Catalog projection: all type names declared under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTypes {
    pub category: String,
    pub types: Vec<String>,
}
