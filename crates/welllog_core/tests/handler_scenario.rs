//! Full curate-record-query-cleanup walkthrough over the command handler,
//! exercised against both store adapters.

use chrono::NaiveDate;
use welllog_core::{
    AddValueCmd, CategoryType, CommandHandler, CreateTypeCmd, DeleteEntryCmd, DeleteTypeCmd,
    DeleteValueCmd, Entry, GenericStore, GetDefinitionsCmd, GetEntryCmd, GetValuesCmd,
    ListEntriesCmd, MemoryStore, SetEntryCmd, SqliteStore, StoreDefinitionRepository,
    StoreEntryRepository,
};

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn walkthrough<S: GenericStore>(store: &S) {
    let handler = CommandHandler::new(
        StoreEntryRepository::new(store),
        StoreDefinitionRepository::new(store),
    );

    // Curate the catalog.
    handler
        .create_type(&CreateTypeCmd {
            category: "observation".to_string(),
            kind: "mood".to_string(),
            allow_multiple: false,
        })
        .unwrap();
    handler
        .add_value(&AddValueCmd {
            kind: "mood".to_string(),
            value: "happy".to_string(),
            notable: true,
        })
        .unwrap();

    let values = handler
        .get_values(&GetValuesCmd {
            kind: "mood".to_string(),
        })
        .unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, "happy");
    assert!(values[0].notable);

    // Record an entry.
    handler
        .set_entry(&SetEntryCmd {
            entry: Entry::new(
                date("2024-01-10"),
                "observation",
                "mood",
                vec!["happy".to_string()],
            ),
        })
        .unwrap();

    // Query it back through the year-wide filter.
    let listed = handler
        .list_entries(&ListEntriesCmd {
            start_date: Some(date("2024-01-01")),
            end_date: Some(date("2024-12-31")),
            pairs: vec![CategoryType::new("observation", "mood")],
        })
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].values, vec!["happy".to_string()]);

    // Point lookup agrees.
    let single = handler
        .get_entry(&GetEntryCmd {
            date: date("2024-01-10"),
            category: "observation".to_string(),
            kind: "mood".to_string(),
        })
        .unwrap();
    assert!(single.is_some());

    // Remove the value from the catalog.
    handler
        .delete_value(&DeleteValueCmd {
            kind: "mood".to_string(),
            value: "happy".to_string(),
        })
        .unwrap();
    assert!(handler
        .get_values(&GetValuesCmd {
            kind: "mood".to_string(),
        })
        .unwrap()
        .is_empty());

    // Remove the type; the catalog no longer lists it.
    handler
        .delete_type(&DeleteTypeCmd {
            category: "observation".to_string(),
            kind: "mood".to_string(),
        })
        .unwrap();
    let definitions = handler
        .get_definitions(&GetDefinitionsCmd {
            category: "observation".to_string(),
        })
        .unwrap();
    assert!(definitions.iter().all(|def| def.kind != "mood"));
    assert!(handler.get_catalog().unwrap().is_empty());

    // The entry itself is untouched until deleted by key.
    handler
        .delete_entry(&DeleteEntryCmd {
            date: date("2024-01-10"),
            category: "observation".to_string(),
            kind: "mood".to_string(),
        })
        .unwrap();
    assert!(handler
        .list_entries(&ListEntriesCmd::default())
        .unwrap()
        .is_empty());
}

#[test]
fn scenario_runs_against_memory_store() {
    let store = MemoryStore::new();
    walkthrough(&store);
}

#[test]
fn scenario_runs_against_sqlite_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    walkthrough(&store);
}

#[test]
fn scenario_runs_against_file_backed_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(dir.path().join("welllog.db")).unwrap();
    walkthrough(&store);
}

#[test]
fn scenario_runs_against_env_selected_store() {
    let config = welllog_core::StoreConfig {
        use_memory: true,
        db_path: None,
    };
    let store = config.open().unwrap();
    walkthrough(&store);
}
