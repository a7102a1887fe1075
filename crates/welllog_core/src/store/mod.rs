//! Generic backing-store contract and adapters.
//!
//! # Responsibility
//! - Define the table-agnostic store operations shared by every table.
//! - Keep row shapes typed per table so column-order bugs cannot exist.
//!
//! # Invariants
//! - Filters are conjunctive equality only; richer predicates live in the
//!   repository layer.
//! - Text matching is case-insensitive and date matching is calendar-only
//!   in every adapter, via the same rules (`norm`).
//! - Plain `insert` enforces the declared table key in every adapter, so
//!   `Constraint` errors behave the same in production and test paths.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod memory;
pub mod norm;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Adapter-level failures. Repositories propagate these unchanged; there is
/// no retry policy anywhere in this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or rejected the statement.
    Unavailable(String),
    /// A uniqueness constraint rejected an insert.
    Constraint(String),
    /// Persisted or supplied data did not match the table schema.
    InvalidData(String),
    /// The connection has not been migrated to the supported schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// The connection is migrated but a required table is absent.
    MissingTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
            Self::InvalidData(message) => write!(f, "invalid row data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingTable(table) => write!(f, "required table is missing: {table}"),
        }
    }
}

impl Error for StoreError {}

/// Column value kinds understood by the adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Surrogate identifier, stored as a uuid string.
    Id,
    Text,
    /// Calendar date, stored in ISO `YYYY-MM-DD` form.
    Date,
    Bool,
    /// Ordered list of strings, stored as a JSON array.
    TextList,
}

/// One column declaration in a table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// One strongly typed store value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Id(Uuid),
    Text(String),
    Date(NaiveDate),
    Bool(bool),
    TextList(Vec<String>),
}

impl ColumnValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Id(_) => ColumnKind::Id,
            Self::Text(_) => ColumnKind::Text,
            Self::Date(_) => ColumnKind::Date,
            Self::Bool(_) => ColumnKind::Bool,
            Self::TextList(_) => ColumnKind::TextList,
        }
    }

    pub fn into_id(self) -> StoreResult<Uuid> {
        match self {
            Self::Id(id) => Ok(id),
            other => Err(type_mismatch("id", &other)),
        }
    }

    pub fn into_text(self) -> StoreResult<String> {
        match self {
            Self::Text(text) => Ok(text),
            other => Err(type_mismatch("text", &other)),
        }
    }

    pub fn into_date(self) -> StoreResult<NaiveDate> {
        match self {
            Self::Date(date) => Ok(date),
            other => Err(type_mismatch("date", &other)),
        }
    }

    pub fn into_bool(self) -> StoreResult<bool> {
        match self {
            Self::Bool(flag) => Ok(flag),
            other => Err(type_mismatch("bool", &other)),
        }
    }

    pub fn into_text_list(self) -> StoreResult<Vec<String>> {
        match self {
            Self::TextList(items) => Ok(items),
            other => Err(type_mismatch("text list", &other)),
        }
    }
}

fn type_mismatch(expected: &str, actual: &ColumnValue) -> StoreError {
    StoreError::InvalidData(format!("expected {expected} value, got {actual:?}"))
}

/// One conjunctive equality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: &'static str,
    pub value: ColumnValue,
}

impl Filter {
    pub fn text(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: ColumnValue::Text(value.into()),
        }
    }

    pub fn date(column: &'static str, value: NaiveDate) -> Self {
        Self {
            column,
            value: ColumnValue::Date(value),
        }
    }
}

/// Schema + mapping contract implemented once per table.
///
/// # Invariants
/// - `KEY` names a subset of `COLUMNS`; it is the upsert conflict target
///   and the uniqueness constraint enforced on `insert`.
/// - `to_values` yields exactly one value per declared column, in order.
pub trait TableRow: Sized {
    const TABLE: &'static str;
    const COLUMNS: &'static [Column];
    const KEY: &'static [&'static str];

    fn to_values(&self) -> Vec<ColumnValue>;
    fn from_values(values: Vec<ColumnValue>) -> StoreResult<Self>;
}

/// Generic store operations shared by the SQLite adapter and the in-memory
/// test double.
///
/// # Contract
/// - `delete`/`select` match every filter conjunctively; zero matches is a
///   normal outcome, never an error.
/// - `upsert` replaces the row sharing the table key atomically within the
///   adapter.
pub trait GenericStore {
    /// Appends one row. Fails with `Constraint` when the table key is taken.
    fn insert<T: TableRow>(&self, row: &T) -> StoreResult<()>;
    /// Inserts the row or replaces the one sharing its table key.
    fn upsert<T: TableRow>(&self, row: &T) -> StoreResult<()>;
    /// Removes matching rows; returns how many were removed.
    fn delete<T: TableRow>(&self, filters: &[Filter]) -> StoreResult<usize>;
    /// Returns matching rows as typed values.
    fn select<T: TableRow>(&self, filters: &[Filter]) -> StoreResult<Vec<T>>;
    /// Returns every row in the table.
    fn select_all<T: TableRow>(&self) -> StoreResult<Vec<T>>;
}

/// Looks up a column position by name within a table schema.
pub(crate) fn column_index(columns: &[Column], name: &str) -> StoreResult<usize> {
    columns
        .iter()
        .position(|column| column.name == name)
        .ok_or_else(|| StoreError::InvalidData(format!("unknown column `{name}`")))
}
