//! Entry repository contract and store-backed implementation.
//!
//! # Responsibility
//! - Map well-being entries to/from the `entries` table row shape.
//! - Provide point lookup, point delete, add-or-replace and filtered
//!   listing.
//!
//! # Invariants
//! - `add_or_replace` leaves exactly one row per (date, category, type),
//!   via the store's native upsert.
//! - Range and pair filtering happen in memory: the store filter contract
//!   is conjunctive equality only and cannot express ranges or
//!   disjunctions. O(n) over the table, acceptable at personal scale.

use crate::model::entry::{CategoryType, Entry};
use crate::repo::{RepoError, RepoResult};
use crate::store::{
    Column, ColumnKind, ColumnValue, Filter, GenericStore, StoreError, StoreResult, TableRow,
};
use chrono::NaiveDate;

/// Row shape of the `entries` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub date: NaiveDate,
    pub category: String,
    pub kind: String,
    pub values: Vec<String>,
}

impl TableRow for EntryRow {
    const TABLE: &'static str = "entries";
    const COLUMNS: &'static [Column] = &[
        Column::new("date", ColumnKind::Date),
        Column::new("category", ColumnKind::Text),
        Column::new("type", ColumnKind::Text),
        Column::new("values_list", ColumnKind::TextList),
    ];
    const KEY: &'static [&'static str] = &["date", "category", "type"];

    fn to_values(&self) -> Vec<ColumnValue> {
        vec![
            ColumnValue::Date(self.date),
            ColumnValue::Text(self.category.clone()),
            ColumnValue::Text(self.kind.clone()),
            ColumnValue::TextList(self.values.clone()),
        ]
    }

    fn from_values(values: Vec<ColumnValue>) -> StoreResult<Self> {
        let mut iter = values.into_iter();
        let date = next_value(&mut iter, "date")?.into_date()?;
        let category = next_value(&mut iter, "category")?.into_text()?;
        let kind = next_value(&mut iter, "type")?.into_text()?;
        let values = next_value(&mut iter, "values_list")?.into_text_list()?;
        Ok(Self {
            date,
            category,
            kind,
            values,
        })
    }
}

pub(crate) fn next_value(
    iter: &mut impl Iterator<Item = ColumnValue>,
    column: &str,
) -> StoreResult<ColumnValue> {
    iter.next()
        .ok_or_else(|| StoreError::InvalidData(format!("missing column `{column}` in row")))
}

impl From<Entry> for EntryRow {
    fn from(entry: Entry) -> Self {
        Self {
            date: entry.date,
            category: entry.category,
            kind: entry.kind,
            values: entry.values,
        }
    }
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Self {
            date: row.date,
            category: row.category,
            kind: row.kind,
            values: row.values,
        }
    }
}

/// Filter options for `list_all`. All predicates combine with AND; an empty
/// `pairs` list means "any category/type".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub pairs: Vec<CategoryType>,
}

/// Repository interface for entry CRUD operations.
pub trait EntryRepository {
    /// Inserts the entry or replaces the one sharing its key.
    fn add_or_replace(&self, entry: &Entry) -> RepoResult<()>;
    /// Removes the entry with the given key. No-op if the key is absent.
    fn remove_by_key(&self, date: NaiveDate, category: &str, kind: &str) -> RepoResult<()>;
    /// Returns the entry with the given key, or `None` when absent.
    fn get_by_key(&self, date: NaiveDate, category: &str, kind: &str)
        -> RepoResult<Option<Entry>>;
    /// Returns every entry satisfying the query predicates.
    fn list_all(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>>;
}

/// Generic-store-backed entry repository.
pub struct StoreEntryRepository<'s, S: GenericStore> {
    store: &'s S,
}

impl<'s, S: GenericStore> StoreEntryRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }
}

fn key_filters(date: NaiveDate, category: &str, kind: &str) -> [Filter; 3] {
    [
        Filter::date("date", date),
        Filter::text("category", category),
        Filter::text("type", kind),
    ]
}

impl<S: GenericStore> EntryRepository for StoreEntryRepository<'_, S> {
    fn add_or_replace(&self, entry: &Entry) -> RepoResult<()> {
        entry.validate()?;
        self.store.upsert(&EntryRow::from(entry.clone()))?;
        Ok(())
    }

    fn remove_by_key(&self, date: NaiveDate, category: &str, kind: &str) -> RepoResult<()> {
        self.store
            .delete::<EntryRow>(&key_filters(date, category, kind))?;
        Ok(())
    }

    fn get_by_key(
        &self,
        date: NaiveDate,
        category: &str,
        kind: &str,
    ) -> RepoResult<Option<Entry>> {
        let mut rows = self
            .store
            .select::<EntryRow>(&key_filters(date, category, kind))?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop().map(Entry::from)),
            count => Err(RepoError::InvalidData(format!(
                "{count} rows share entry key ({date}, {category}, {kind})"
            ))),
        }
    }

    fn list_all(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>> {
        let rows = self.store.select_all::<EntryRow>()?;
        let entries = rows
            .into_iter()
            .map(Entry::from)
            .filter(|entry| {
                query.start_date.map_or(true, |start| entry.date >= start)
                    && query.end_date.map_or(true, |end| entry.date <= end)
                    && (query.pairs.is_empty()
                        || query
                            .pairs
                            .iter()
                            .any(|pair| pair.matches(&entry.category, &entry.kind)))
            })
            .collect();
        Ok(entries)
    }
}
