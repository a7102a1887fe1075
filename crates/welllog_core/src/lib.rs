//! Core domain logic for the well-being log.
//! This crate is the single source of truth for storage and catalog
//! invariants; HTTP and UI layers sit on top of `CommandHandler`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{AnyStore, ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::definition::{AllowedValue, CategoryTypes, Definition};
pub use model::entry::{CategoryType, Entry, KeyValidationError};
pub use repo::definition_repo::{DefinitionRepository, StoreDefinitionRepository};
pub use repo::entry_repo::{EntryListQuery, EntryRepository, StoreEntryRepository};
pub use repo::{RepoError, RepoResult};
pub use service::command_handler::CommandHandler;
pub use service::commands::{
    AddValueCmd, CreateTypeCmd, DeleteEntryCmd, DeleteTypeCmd, DeleteValueCmd, GetDefinitionsCmd,
    GetEntryCmd, GetValuesCmd, ListEntriesCmd, SetEntryCmd,
};
pub use store::{
    Filter, GenericStore, MemoryStore, SqliteStore, StoreError, StoreResult, TableRow,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
