use std::fs;
use std::path::{Path, PathBuf};

use calendar_core::calendar::{Recurrence, Settings, Transaction, TransactionDraft};
use calendar_core::errors::CalendarError;
use calendar_core::store::{JsonStore, RecordStore};
use chrono::NaiveDate;
use tempfile::tempdir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(amount: f64, description: &str, anchor: NaiveDate) -> TransactionDraft {
    TransactionDraft::new(amount, description, anchor)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn create_update_delete_roundtrip() {
    let temp = tempdir().unwrap();
    let mut store = JsonStore::open(temp.path().join("store.json")).unwrap();

    let created = store
        .create_transaction(draft(42.0, "Groceries", day(2025, 1, 1)))
        .unwrap();
    assert_eq!(created.id, 1);

    let mut updated_draft = created.draft();
    updated_draft.amount = -42.0;
    let updated = store.update_transaction(created.id, updated_draft).unwrap();
    assert_eq!(updated.amount, -42.0);

    let removed = store.delete_transaction(created.id).unwrap();
    assert_eq!(removed.id, 1);
    assert!(store.list_transactions().unwrap().is_empty());
}

#[test]
fn unknown_ids_surface_not_found() {
    let temp = tempdir().unwrap();
    let mut store = JsonStore::open(temp.path().join("store.json")).unwrap();

    let err = store
        .update_transaction(99, draft(1.0, "nope", day(2025, 1, 1)))
        .expect_err("update of unknown id must fail");
    assert!(matches!(err, CalendarError::TransactionNotFound(99)));

    let err = store
        .delete_transaction(7)
        .expect_err("delete of unknown id must fail");
    assert!(matches!(err, CalendarError::TransactionNotFound(7)));
}

#[test]
fn settings_default_is_created_and_persisted_on_first_read() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("store.json");

    let mut store = JsonStore::open(path.clone()).unwrap();
    let settings = store.settings().unwrap();
    assert_eq!(settings.currency, "AUD");
    assert_eq!(settings.initial_balance, 0.0);
    assert_eq!(settings.language, "fr");

    // The lazily created record must already be on disk.
    let mut reopened = JsonStore::open(path).unwrap();
    let settings = reopened.settings().unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn settings_updates_survive_reopen() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("store.json");

    let mut store = JsonStore::open(path.clone()).unwrap();
    store
        .save_settings(Settings {
            currency: "EUR".into(),
            initial_balance: 1250.75,
            language: "en".into(),
        })
        .unwrap();

    let mut reopened = JsonStore::open(path).unwrap();
    let settings = reopened.settings().unwrap();
    assert_eq!(settings.currency, "EUR");
    assert_eq!(settings.initial_balance, 1250.75);
    assert_eq!(settings.language, "en");
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("store.json");
    let mut store = JsonStore::open(path.clone()).unwrap();

    store
        .create_transaction(draft(42.0, "Groceries", day(2025, 1, 1)))
        .unwrap();
    let original = fs::read_to_string(&path).expect("read original file");

    // Create a directory colliding with the temp file name so the staged
    // write fails before the rename.
    let tmp_path = tmp_path_for(&path);
    fs::create_dir_all(&tmp_path).unwrap();

    let result = store.create_transaction(draft(99.0, "Broken", day(2025, 1, 2)));
    assert!(
        result.is_err(),
        "expected persist to fail when the temp path is a directory"
    );

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original, "a failed save must not touch the store file");
}

#[test]
fn legacy_store_document_roundtrips() {
    // A store document from an earlier deployment loads unchanged.
    let json = r#"{
        "nextId": 3,
        "transactions": [
            {
                "id": 1,
                "amount": -75.5,
                "description": "Électricité",
                "date": "2024-01-08T00:00:00.000Z",
                "recurrence": "MONTHLY",
                "recurrenceInterval": 1,
                "recurrenceEndDate": null,
                "excludedDates": "2024-03-08",
                "isAdjustment": false
            },
            {
                "id": 2,
                "amount": 1000.0,
                "description": "Reset",
                "date": "2024-01-20T00:00:00.000Z",
                "recurrence": "NONE",
                "recurrenceInterval": 1,
                "recurrenceEndDate": null,
                "excludedDates": null,
                "isAdjustment": true
            }
        ],
        "settings": { "currency": "AUD", "initialBalance": 500.0, "language": "fr" }
    }"#;

    let temp = tempdir().unwrap();
    let path = temp.path().join("store.json");
    fs::write(&path, json).unwrap();

    let mut store = JsonStore::open(path).unwrap();
    let transactions = store.list_transactions().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].recurrence, Recurrence::Monthly);
    assert!(transactions[0].is_excluded(day(2024, 3, 8)));
    assert!(transactions[1].is_adjustment);
    assert_eq!(store.settings().unwrap().initial_balance, 500.0);

    // Ids continue after the recorded counter.
    let created = store
        .create_transaction(draft(5.0, "New", day(2024, 2, 1)))
        .unwrap();
    assert_eq!(created.id, 3);

    // The serialized form keeps the camelCase wire shape.
    let serialized = serde_json::to_value(&transactions[0]).unwrap();
    assert_eq!(serialized["excludedDates"], "2024-03-08");
    assert_eq!(serialized["recurrence"], "MONTHLY");
}

#[test]
fn listed_snapshot_is_detached_from_the_store() {
    let temp = tempdir().unwrap();
    let mut store = JsonStore::open(temp.path().join("store.json")).unwrap();
    store
        .create_transaction(draft(10.0, "One", day(2025, 1, 1)))
        .unwrap();

    let mut snapshot: Vec<Transaction> = store.list_transactions().unwrap();
    snapshot[0].amount = 999.0;

    assert_eq!(store.transaction(1).unwrap().amount, 10.0);
}
