//! SQLite store adapter.
//!
//! # Responsibility
//! - Translate the generic store operations into parameterized SQL per
//!   table schema.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Text columns are declared `COLLATE NOCASE` by the migrations, giving
//!   the same ASCII case-insensitive matching as `norm::values_equal`.
//! - Dates are bound in canonical ISO form, so TEXT equality is calendar
//!   equality.
//! - `upsert` uses native `ON CONFLICT` over the declared table key.

use super::norm::canonical_date;
use super::{ColumnKind, ColumnValue, Filter, GenericStore, StoreError, StoreResult, TableRow};
use crate::db::migrations::latest_version;
use crate::db::{open_db, open_db_in_memory};
use chrono::NaiveDate;
use rusqlite::types::{ToSql, ToSqlOutput, Value};
use rusqlite::{params_from_iter, Connection, ErrorCode, Row};
use std::path::Path;
use uuid::Uuid;

const REQUIRED_TABLES: [&str; 3] = ["entries", "definitions", "definition_values"];

/// SQLite-backed implementation of the generic store contract.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wraps a migrated connection after checking schema readiness.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration known by this binary.
    /// - `MissingTable` when a required table is absent.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .map_err(StoreError::from)?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for table in REQUIRED_TABLES {
            let present: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
                    [table],
                    |row| row.get(0),
                )
                .map_err(StoreError::from)?;
            if present == 0 {
                return Err(StoreError::MissingTable(table));
            }
        }

        Ok(Self { conn })
    }

    /// Opens a database file, applies migrations and wraps the connection.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_db(path).map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Self::try_new(conn)
    }

    /// Opens a private in-memory database with migrations applied.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory().map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Self::try_new(conn)
    }
}

impl GenericStore for SqliteStore {
    fn insert<T: TableRow>(&self, row: &T) -> StoreResult<()> {
        let column_names: Vec<&str> = T::COLUMNS.iter().map(|column| column.name).collect();
        let placeholders: Vec<String> = (1..=column_names.len())
            .map(|position| format!("?{position}"))
            .collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            T::TABLE,
            column_names.join(", "),
            placeholders.join(", ")
        );
        self.conn
            .execute(&sql, params_from_iter(row.to_values()))?;
        Ok(())
    }

    fn upsert<T: TableRow>(&self, row: &T) -> StoreResult<()> {
        let column_names: Vec<&str> = T::COLUMNS.iter().map(|column| column.name).collect();
        let placeholders: Vec<String> = (1..=column_names.len())
            .map(|position| format!("?{position}"))
            .collect();
        let non_key: Vec<String> = column_names
            .iter()
            .filter(|name| !T::KEY.contains(name))
            .map(|name| format!("{name} = excluded.{name}"))
            .collect();
        let conflict_action = if non_key.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", non_key.join(", "))
        };
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) {};",
            T::TABLE,
            column_names.join(", "),
            placeholders.join(", "),
            T::KEY.join(", "),
            conflict_action
        );
        self.conn
            .execute(&sql, params_from_iter(row.to_values()))?;
        Ok(())
    }

    fn delete<T: TableRow>(&self, filters: &[Filter]) -> StoreResult<usize> {
        let (clause, bind_values) = where_clause::<T>(filters)?;
        let sql = format!("DELETE FROM {}{};", T::TABLE, clause);
        let removed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(removed)
    }

    fn select<T: TableRow>(&self, filters: &[Filter]) -> StoreResult<Vec<T>> {
        let column_names: Vec<&str> = T::COLUMNS.iter().map(|column| column.name).collect();
        let (clause, bind_values) = where_clause::<T>(filters)?;
        let sql = format!(
            "SELECT {} FROM {}{};",
            column_names.join(", "),
            T::TABLE,
            clause
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().map_err(StoreError::from)? {
            results.push(T::from_values(read_row::<T>(row)?)?);
        }
        Ok(results)
    }

    fn select_all<T: TableRow>(&self) -> StoreResult<Vec<T>> {
        self.select::<T>(&[])
    }
}

fn where_clause<T: TableRow>(filters: &[Filter]) -> StoreResult<(String, Vec<ColumnValue>)> {
    if filters.is_empty() {
        return Ok((String::new(), Vec::new()));
    }
    let mut predicates = Vec::with_capacity(filters.len());
    let mut bind_values = Vec::with_capacity(filters.len());
    for (position, filter) in filters.iter().enumerate() {
        super::column_index(T::COLUMNS, filter.column)?;
        predicates.push(format!("{} = ?{}", filter.column, position + 1));
        bind_values.push(filter.value.clone());
    }
    Ok((format!(" WHERE {}", predicates.join(" AND ")), bind_values))
}

fn read_row<T: TableRow>(row: &Row<'_>) -> StoreResult<Vec<ColumnValue>> {
    let mut values = Vec::with_capacity(T::COLUMNS.len());
    for (index, column) in T::COLUMNS.iter().enumerate() {
        let value = match column.kind {
            ColumnKind::Id => {
                let text: String = row.get(index)?;
                let id = Uuid::parse_str(&text).map_err(|_| {
                    StoreError::InvalidData(format!(
                        "invalid uuid `{text}` in {}.{}",
                        T::TABLE,
                        column.name
                    ))
                })?;
                ColumnValue::Id(id)
            }
            ColumnKind::Text => ColumnValue::Text(row.get(index)?),
            ColumnKind::Date => {
                let text: String = row.get(index)?;
                let date = NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|_| {
                    StoreError::InvalidData(format!(
                        "invalid date `{text}` in {}.{}",
                        T::TABLE,
                        column.name
                    ))
                })?;
                ColumnValue::Date(date)
            }
            ColumnKind::Bool => match row.get::<_, i64>(index)? {
                0 => ColumnValue::Bool(false),
                1 => ColumnValue::Bool(true),
                other => {
                    return Err(StoreError::InvalidData(format!(
                        "invalid bool `{other}` in {}.{}",
                        T::TABLE,
                        column.name
                    )))
                }
            },
            ColumnKind::TextList => {
                let text: String = row.get(index)?;
                let items: Vec<String> = serde_json::from_str(&text).map_err(|err| {
                    StoreError::InvalidData(format!(
                        "invalid value list in {}.{}: {err}",
                        T::TABLE,
                        column.name
                    ))
                })?;
                ColumnValue::TextList(items)
            }
        };
        values.push(value);
    }
    Ok(values)
}

impl ToSql for ColumnValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Id(id) => Ok(ToSqlOutput::Owned(Value::Text(id.to_string()))),
            Self::Text(text) => Ok(ToSqlOutput::Borrowed(text.as_str().into())),
            Self::Date(date) => Ok(ToSqlOutput::Owned(Value::Text(canonical_date(date)))),
            Self::Bool(flag) => Ok(ToSqlOutput::Owned(Value::Integer(i64::from(*flag)))),
            Self::TextList(items) => {
                let json = serde_json::to_string(items)
                    .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
                Ok(ToSqlOutput::Owned(Value::Text(json)))
            }
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(err.to_string())
            }
            _ => Self::Unavailable(err.to_string()),
        }
    }
}
