//! Definition catalog repository contract and store-backed implementation.
//!
//! # Responsibility
//! - Map (category, type) definitions and their allowed values to/from the
//!   `definitions` and `definition_values` tables.
//! - Own the cascade rule for type deletion.
//!
//! # Invariants
//! - Surrogate ids are generated here (uuid v4) before insert, never by the
//!   store.
//! - Allowed values are keyed by parent type alone; categories sharing a
//!   type name share its value set.
//! - `definitions_for_category` loads values with one table scan bucketed
//!   by parent type, not one query per definition.

use crate::model::definition::{AllowedValue, CategoryTypes, Definition};
use crate::model::entry::{validate_key, KeyValidationError};
use crate::repo::RepoResult;
use crate::store::{
    Column, ColumnKind, ColumnValue, Filter, GenericStore, StoreResult, TableRow,
};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::entry_repo::next_value;

/// Row shape of the `definitions` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionRow {
    pub id: Uuid,
    pub category: String,
    pub kind: String,
    pub allows_multiple: bool,
}

impl TableRow for DefinitionRow {
    const TABLE: &'static str = "definitions";
    const COLUMNS: &'static [Column] = &[
        Column::new("id", ColumnKind::Id),
        Column::new("category", ColumnKind::Text),
        Column::new("type", ColumnKind::Text),
        Column::new("allows_multiple", ColumnKind::Bool),
    ];
    const KEY: &'static [&'static str] = &["category", "type"];

    fn to_values(&self) -> Vec<ColumnValue> {
        vec![
            ColumnValue::Id(self.id),
            ColumnValue::Text(self.category.clone()),
            ColumnValue::Text(self.kind.clone()),
            ColumnValue::Bool(self.allows_multiple),
        ]
    }

    fn from_values(values: Vec<ColumnValue>) -> StoreResult<Self> {
        let mut iter = values.into_iter();
        let id = next_value(&mut iter, "id")?.into_id()?;
        let category = next_value(&mut iter, "category")?.into_text()?;
        let kind = next_value(&mut iter, "type")?.into_text()?;
        let allows_multiple = next_value(&mut iter, "allows_multiple")?.into_bool()?;
        Ok(Self {
            id,
            category,
            kind,
            allows_multiple,
        })
    }
}

/// Row shape of the `definition_values` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRow {
    pub id: Uuid,
    pub parent_type: String,
    pub value: String,
    pub notable: bool,
}

impl TableRow for ValueRow {
    const TABLE: &'static str = "definition_values";
    const COLUMNS: &'static [Column] = &[
        Column::new("id", ColumnKind::Id),
        Column::new("parent_type", ColumnKind::Text),
        Column::new("value", ColumnKind::Text),
        Column::new("is_notable", ColumnKind::Bool),
    ];
    const KEY: &'static [&'static str] = &["parent_type", "value"];

    fn to_values(&self) -> Vec<ColumnValue> {
        vec![
            ColumnValue::Id(self.id),
            ColumnValue::Text(self.parent_type.clone()),
            ColumnValue::Text(self.value.clone()),
            ColumnValue::Bool(self.notable),
        ]
    }

    fn from_values(values: Vec<ColumnValue>) -> StoreResult<Self> {
        let mut iter = values.into_iter();
        let id = next_value(&mut iter, "id")?.into_id()?;
        let parent_type = next_value(&mut iter, "parent_type")?.into_text()?;
        let value = next_value(&mut iter, "value")?.into_text()?;
        let notable = next_value(&mut iter, "is_notable")?.into_bool()?;
        Ok(Self {
            id,
            parent_type,
            value,
            notable,
        })
    }
}

/// Repository interface for the definition catalog.
pub trait DefinitionRepository {
    /// Declares a new (category, type) combination.
    ///
    /// A duplicate key surfaces as `StoreError::Constraint` from either
    /// adapter.
    fn create_type(&self, category: &str, kind: &str, allow_multiple: bool) -> RepoResult<()>;
    /// Removes a definition. Allowed values for the type are removed too,
    /// unless another category still declares the same type name.
    fn delete_type(&self, category: &str, kind: &str) -> RepoResult<()>;
    /// Adds one allowed value under the given type.
    fn add_value(&self, kind: &str, value: &str, notable: bool) -> RepoResult<()>;
    /// Removes one allowed value. No-op if absent.
    fn delete_value(&self, kind: &str, value: &str) -> RepoResult<()>;
    /// Returns allowed values for a type, sorted by value. Empty when the
    /// type has no values or does not exist.
    fn values_for_type(&self, kind: &str) -> RepoResult<Vec<AllowedValue>>;
    /// Returns full definitions (with nested values) for one category.
    fn definitions_for_category(&self, category: &str) -> RepoResult<Vec<Definition>>;
    /// Returns the distinct (category, type) catalog, grouped by category.
    fn all_categories_and_types(&self) -> RepoResult<Vec<CategoryTypes>>;
}

/// Generic-store-backed definition repository.
pub struct StoreDefinitionRepository<'s, S: GenericStore> {
    store: &'s S,
}

impl<'s, S: GenericStore> StoreDefinitionRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    fn values_sorted(&self, rows: Vec<ValueRow>) -> Vec<AllowedValue> {
        let mut values: Vec<AllowedValue> = rows
            .into_iter()
            .map(|row| AllowedValue::new(row.value, row.notable))
            .collect();
        values.sort_by(|a, b| a.value.to_ascii_lowercase().cmp(&b.value.to_ascii_lowercase()));
        values
    }
}

impl<S: GenericStore> DefinitionRepository for StoreDefinitionRepository<'_, S> {
    fn create_type(&self, category: &str, kind: &str, allow_multiple: bool) -> RepoResult<()> {
        validate_key(category, kind)?;
        self.store.insert(&DefinitionRow {
            id: Uuid::new_v4(),
            category: category.to_string(),
            kind: kind.to_string(),
            allows_multiple: allow_multiple,
        })?;
        Ok(())
    }

    fn delete_type(&self, category: &str, kind: &str) -> RepoResult<()> {
        self.store.delete::<DefinitionRow>(&[
            Filter::text("category", category),
            Filter::text("type", kind),
        ])?;

        // Values are shared by every category declaring the same type name;
        // only cascade once the last such definition is gone.
        let remaining = self
            .store
            .select::<DefinitionRow>(&[Filter::text("type", kind)])?;
        if remaining.is_empty() {
            self.store
                .delete::<ValueRow>(&[Filter::text("parent_type", kind)])?;
        }
        Ok(())
    }

    fn add_value(&self, kind: &str, value: &str, notable: bool) -> RepoResult<()> {
        if kind.trim().is_empty() {
            return Err(KeyValidationError::BlankType.into());
        }
        if value.trim().is_empty() {
            return Err(KeyValidationError::BlankValue.into());
        }
        self.store.insert(&ValueRow {
            id: Uuid::new_v4(),
            parent_type: kind.to_string(),
            value: value.to_string(),
            notable,
        })?;
        Ok(())
    }

    fn delete_value(&self, kind: &str, value: &str) -> RepoResult<()> {
        self.store.delete::<ValueRow>(&[
            Filter::text("parent_type", kind),
            Filter::text("value", value),
        ])?;
        Ok(())
    }

    fn values_for_type(&self, kind: &str) -> RepoResult<Vec<AllowedValue>> {
        let rows = self
            .store
            .select::<ValueRow>(&[Filter::text("parent_type", kind)])?;
        Ok(self.values_sorted(rows))
    }

    fn definitions_for_category(&self, category: &str) -> RepoResult<Vec<Definition>> {
        let mut definition_rows = self
            .store
            .select::<DefinitionRow>(&[Filter::text("category", category)])?;
        definition_rows.sort_by(|a, b| a.kind.to_ascii_lowercase().cmp(&b.kind.to_ascii_lowercase()));

        // One scan of the values table, bucketed by parent type.
        let value_rows = self.store.select_all::<ValueRow>()?;
        let definitions = definition_rows
            .into_iter()
            .map(|row| {
                let values = value_rows
                    .iter()
                    .filter(|value| value.parent_type.eq_ignore_ascii_case(&row.kind))
                    .cloned()
                    .collect();
                Definition {
                    category: row.category,
                    kind: row.kind,
                    allow_multiple: row.allows_multiple,
                    values: self.values_sorted(values),
                }
            })
            .collect();
        Ok(definitions)
    }

    fn all_categories_and_types(&self) -> RepoResult<Vec<CategoryTypes>> {
        let rows = self.store.select_all::<DefinitionRow>()?;
        let mut grouped: BTreeMap<String, (String, Vec<String>)> = BTreeMap::new();
        for row in rows {
            let slot = grouped
                .entry(row.category.to_ascii_lowercase())
                .or_insert_with(|| (row.category.clone(), Vec::new()));
            slot.1.push(row.kind);
        }

        let catalog = grouped
            .into_values()
            .map(|(category, mut types)| {
                types.sort_by(|a, b| a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()));
                CategoryTypes { category, types }
            })
            .collect();
        Ok(catalog)
    }
}
