//! REST command handler.
//!
//! # Responsibility
//! - Expose the authoritative operation contract of the core: one method
//!   per use case, each a straight pass-through to a repository.
//!
//! # Invariants
//! - No business logic lives here beyond logging; errors bubble unchanged.

use crate::model::definition::{AllowedValue, CategoryTypes, Definition};
use crate::model::entry::Entry;
use crate::repo::definition_repo::DefinitionRepository;
use crate::repo::entry_repo::{EntryListQuery, EntryRepository};
use crate::repo::RepoResult;
use crate::service::commands::{
    AddValueCmd, CreateTypeCmd, DeleteEntryCmd, DeleteTypeCmd, DeleteValueCmd, GetDefinitionsCmd,
    GetEntryCmd, GetValuesCmd, ListEntriesCmd, SetEntryCmd,
};
use log::info;

/// Use-case facade over the entry and definition repositories.
pub struct CommandHandler<E: EntryRepository, D: DefinitionRepository> {
    entries: E,
    definitions: D,
}

impl<E: EntryRepository, D: DefinitionRepository> CommandHandler<E, D> {
    pub fn new(entries: E, definitions: D) -> Self {
        Self {
            entries,
            definitions,
        }
    }

    /// Adds or replaces one entry (upsert on its key).
    pub fn set_entry(&self, cmd: &SetEntryCmd) -> RepoResult<()> {
        info!(
            "event=set_entry module=handler date={} category={} type={}",
            cmd.entry.date, cmd.entry.category, cmd.entry.kind
        );
        self.entries.add_or_replace(&cmd.entry)
    }

    /// Deletes one entry by key; missing keys are a no-op.
    pub fn delete_entry(&self, cmd: &DeleteEntryCmd) -> RepoResult<()> {
        info!(
            "event=delete_entry module=handler date={} category={} type={}",
            cmd.date, cmd.category, cmd.kind
        );
        self.entries.remove_by_key(cmd.date, &cmd.category, &cmd.kind)
    }

    /// Returns one entry by key, or `None` when absent.
    pub fn get_entry(&self, cmd: &GetEntryCmd) -> RepoResult<Option<Entry>> {
        self.entries.get_by_key(cmd.date, &cmd.category, &cmd.kind)
    }

    /// Lists entries matching the date range and (category, type) pairs.
    pub fn list_entries(&self, cmd: &ListEntriesCmd) -> RepoResult<Vec<Entry>> {
        let query = EntryListQuery {
            start_date: cmd.start_date,
            end_date: cmd.end_date,
            pairs: cmd.pairs.clone(),
        };
        self.entries.list_all(&query)
    }

    /// Declares a new (category, type) definition.
    pub fn create_type(&self, cmd: &CreateTypeCmd) -> RepoResult<()> {
        info!(
            "event=create_type module=handler category={} type={} allow_multiple={}",
            cmd.category, cmd.kind, cmd.allow_multiple
        );
        self.definitions
            .create_type(&cmd.category, &cmd.kind, cmd.allow_multiple)
    }

    /// Deletes a definition (cascading its values when unshared).
    pub fn delete_type(&self, cmd: &DeleteTypeCmd) -> RepoResult<()> {
        info!(
            "event=delete_type module=handler category={} type={}",
            cmd.category, cmd.kind
        );
        self.definitions.delete_type(&cmd.category, &cmd.kind)
    }

    /// Adds one allowed value under a type.
    pub fn add_value(&self, cmd: &AddValueCmd) -> RepoResult<()> {
        info!(
            "event=add_value module=handler type={} notable={}",
            cmd.kind, cmd.notable
        );
        self.definitions.add_value(&cmd.kind, &cmd.value, cmd.notable)
    }

    /// Removes one allowed value from a type.
    pub fn delete_value(&self, cmd: &DeleteValueCmd) -> RepoResult<()> {
        info!("event=delete_value module=handler type={}", cmd.kind);
        self.definitions.delete_value(&cmd.kind, &cmd.value)
    }

    /// Returns allowed values for one type.
    pub fn get_values(&self, cmd: &GetValuesCmd) -> RepoResult<Vec<AllowedValue>> {
        self.definitions.values_for_type(&cmd.kind)
    }

    /// Returns full definitions (with nested values) for one category.
    pub fn get_definitions(&self, cmd: &GetDefinitionsCmd) -> RepoResult<Vec<Definition>> {
        self.definitions.definitions_for_category(&cmd.category)
    }

    /// Returns the distinct (category, type) catalog.
    pub fn get_catalog(&self) -> RepoResult<Vec<CategoryTypes>> {
        self.definitions.all_categories_and_types()
    }
}
