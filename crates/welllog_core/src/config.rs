//! Store selection from the process environment.
//!
//! # Responsibility
//! - Read the adapter flag and connection string consumed by deployments.
//! - Open the selected adapter behind one `GenericStore` value.
//!
//! # Invariants
//! - `WELLLOG_USE_MEMORY_STORE` selects the in-memory adapter; otherwise
//!   `WELLLOG_DB_PATH` names the SQLite database file.
//! - Parsing is routed through a lookup closure so tests never mutate the
//!   process environment.

use crate::store::{
    Filter, GenericStore, MemoryStore, SqliteStore, StoreError, StoreResult, TableRow,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const USE_MEMORY_STORE_VAR: &str = "WELLLOG_USE_MEMORY_STORE";
pub const DB_PATH_VAR: &str = "WELLLOG_DB_PATH";

/// Backing-store choice for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub use_memory: bool,
    pub db_path: Option<PathBuf>,
}

/// Configuration surface errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingDbPath,
    InvalidFlag { name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDbPath => write!(
                f,
                "{DB_PATH_VAR} must be set when the SQLite store is selected"
            ),
            Self::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

impl StoreConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let use_memory = match lookup(USE_MEMORY_STORE_VAR) {
            None => false,
            Some(raw) => parse_flag(USE_MEMORY_STORE_VAR, &raw)?,
        };
        let db_path = lookup(DB_PATH_VAR).map(PathBuf::from);
        Ok(Self {
            use_memory,
            db_path,
        })
    }

    /// Opens the configured adapter.
    ///
    /// # Errors
    /// - `ConfigError::MissingDbPath` mapped into `StoreError::Unavailable`
    ///   when the SQLite store is selected without a path.
    pub fn open(&self) -> StoreResult<AnyStore> {
        if self.use_memory {
            info!("event=store_open module=config backend=memory");
            return Ok(AnyStore::Memory(MemoryStore::new()));
        }
        let path = self
            .db_path
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable(ConfigError::MissingDbPath.to_string()))?;
        info!(
            "event=store_open module=config backend=sqlite path={}",
            path.display()
        );
        Ok(AnyStore::Sqlite(SqliteStore::open(path)?))
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: raw.to_string(),
        }),
    }
}

/// Runtime-selected store adapter.
pub enum AnyStore {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl GenericStore for AnyStore {
    fn insert<T: TableRow>(&self, row: &T) -> StoreResult<()> {
        match self {
            Self::Memory(store) => store.insert(row),
            Self::Sqlite(store) => store.insert(row),
        }
    }

    fn upsert<T: TableRow>(&self, row: &T) -> StoreResult<()> {
        match self {
            Self::Memory(store) => store.upsert(row),
            Self::Sqlite(store) => store.upsert(row),
        }
    }

    fn delete<T: TableRow>(&self, filters: &[Filter]) -> StoreResult<usize> {
        match self {
            Self::Memory(store) => store.delete::<T>(filters),
            Self::Sqlite(store) => store.delete::<T>(filters),
        }
    }

    fn select<T: TableRow>(&self, filters: &[Filter]) -> StoreResult<Vec<T>> {
        match self {
            Self::Memory(store) => store.select::<T>(filters),
            Self::Sqlite(store) => store.select::<T>(filters),
        }
    }

    fn select_all<T: TableRow>(&self) -> StoreResult<Vec<T>> {
        match self {
            Self::Memory(store) => store.select_all::<T>(),
            Self::Sqlite(store) => store.select_all::<T>(),
        }
    }
}
