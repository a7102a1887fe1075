//! In-memory store adapter used to simulate SQLite semantics in tests.
//!
//! # Responsibility
//! - Reproduce the real adapter's matching behavior exactly: ASCII
//!   case-insensitive text, calendar-date equality, key uniqueness.
//!
//! # Invariants
//! - One `Mutex` guards the whole table map; every read/write path locks it,
//!   making the store safe for concurrent callers within one process.
//! - A table holds rows for exactly one `TableRow` type, keyed by
//!   `T::TABLE`, so positional values always line up with `T::COLUMNS`.

use super::norm::values_equal;
use super::{column_index, ColumnValue, Filter, GenericStore, StoreError, StoreResult, TableRow};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process table map mirroring relational semantics.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Vec<Vec<ColumnValue>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_tables(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<&'static str, Vec<Vec<ColumnValue>>>>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".to_string()))
    }
}

impl GenericStore for MemoryStore {
    fn insert<T: TableRow>(&self, row: &T) -> StoreResult<()> {
        let values = checked_values::<T>(row)?;
        let key_filters = key_filters::<T>(&values)?;
        let mut tables = self.lock_tables()?;
        let table = tables.entry(T::TABLE).or_default();
        if table
            .iter()
            .any(|existing| matches_filters::<T>(existing, &key_filters).unwrap_or(false))
        {
            return Err(StoreError::Constraint(format!(
                "duplicate key in table `{}`",
                T::TABLE
            )));
        }
        table.push(values);
        Ok(())
    }

    fn upsert<T: TableRow>(&self, row: &T) -> StoreResult<()> {
        let values = checked_values::<T>(row)?;
        let key_filters = key_filters::<T>(&values)?;
        let mut tables = self.lock_tables()?;
        let table = tables.entry(T::TABLE).or_default();
        for existing in table.iter_mut() {
            if matches_filters::<T>(existing, &key_filters)? {
                *existing = values;
                return Ok(());
            }
        }
        table.push(values);
        Ok(())
    }

    fn delete<T: TableRow>(&self, filters: &[Filter]) -> StoreResult<usize> {
        let mut tables = self.lock_tables()?;
        let table = tables.entry(T::TABLE).or_default();
        let before = table.len();
        // retain cannot propagate errors; validate filter columns up front.
        for filter in filters {
            column_index(T::COLUMNS, filter.column)?;
        }
        table.retain(|row| !matches_filters::<T>(row, filters).unwrap_or(false));
        Ok(before - table.len())
    }

    fn select<T: TableRow>(&self, filters: &[Filter]) -> StoreResult<Vec<T>> {
        let tables = self.lock_tables()?;
        let Some(table) = tables.get(T::TABLE) else {
            return Ok(Vec::new());
        };
        let mut rows = Vec::new();
        for row in table {
            if matches_filters::<T>(row, filters)? {
                rows.push(T::from_values(row.clone())?);
            }
        }
        Ok(rows)
    }

    fn select_all<T: TableRow>(&self) -> StoreResult<Vec<T>> {
        self.select::<T>(&[])
    }
}

fn checked_values<T: TableRow>(row: &T) -> StoreResult<Vec<ColumnValue>> {
    let values = row.to_values();
    if values.len() != T::COLUMNS.len() {
        return Err(StoreError::InvalidData(format!(
            "table `{}` expects {} columns, got {}",
            T::TABLE,
            T::COLUMNS.len(),
            values.len()
        )));
    }
    for (column, value) in T::COLUMNS.iter().zip(&values) {
        if column.kind != value.kind() {
            return Err(StoreError::InvalidData(format!(
                "column `{}` in table `{}` has kind {:?}, got {:?}",
                column.name,
                T::TABLE,
                column.kind,
                value.kind()
            )));
        }
    }
    Ok(values)
}

fn key_filters<T: TableRow>(values: &[ColumnValue]) -> StoreResult<Vec<Filter>> {
    let mut filters = Vec::with_capacity(T::KEY.len());
    for name in T::KEY {
        let index = column_index(T::COLUMNS, name)?;
        filters.push(Filter {
            column: name,
            value: values[index].clone(),
        });
    }
    Ok(filters)
}

fn matches_filters<T: TableRow>(row: &[ColumnValue], filters: &[Filter]) -> StoreResult<bool> {
    for filter in filters {
        let index = column_index(T::COLUMNS, filter.column)?;
        if !values_equal(&row[index], &filter.value) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{
        Column, ColumnKind, ColumnValue, Filter, GenericStore, StoreError, StoreResult, TableRow,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Sample {
        name: String,
        active: bool,
    }

    impl TableRow for Sample {
        const TABLE: &'static str = "samples";
        const COLUMNS: &'static [Column] = &[
            Column::new("name", ColumnKind::Text),
            Column::new("active", ColumnKind::Bool),
        ];
        const KEY: &'static [&'static str] = &["name"];

        fn to_values(&self) -> Vec<ColumnValue> {
            vec![
                ColumnValue::Text(self.name.clone()),
                ColumnValue::Bool(self.active),
            ]
        }

        fn from_values(values: Vec<ColumnValue>) -> StoreResult<Self> {
            let mut iter = values.into_iter();
            let name = iter
                .next()
                .ok_or_else(|| StoreError::InvalidData("missing name".to_string()))?
                .into_text()?;
            let active = iter
                .next()
                .ok_or_else(|| StoreError::InvalidData("missing active".to_string()))?
                .into_bool()?;
            Ok(Self { name, active })
        }
    }

    #[test]
    fn insert_enforces_key_case_insensitively() {
        let store = MemoryStore::new();
        store
            .insert(&Sample {
                name: "Mood".to_string(),
                active: true,
            })
            .unwrap();

        let duplicate = store.insert(&Sample {
            name: "mood".to_string(),
            active: false,
        });
        assert!(matches!(duplicate, Err(StoreError::Constraint(_))));
    }

    #[test]
    fn upsert_replaces_row_sharing_key() {
        let store = MemoryStore::new();
        store
            .upsert(&Sample {
                name: "mood".to_string(),
                active: true,
            })
            .unwrap();
        store
            .upsert(&Sample {
                name: "MOOD".to_string(),
                active: false,
            })
            .unwrap();

        let rows = store.select_all::<Sample>().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].active);
    }

    #[test]
    fn delete_returns_zero_for_no_match() {
        let store = MemoryStore::new();
        let removed = store
            .delete::<Sample>(&[Filter::text("name", "missing")])
            .unwrap();
        assert_eq!(removed, 0);
    }

    #[test]
    fn delete_rejects_unknown_filter_column() {
        let store = MemoryStore::new();
        let result = store.delete::<Sample>(&[Filter::text("nope", "x")]);
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }
}
