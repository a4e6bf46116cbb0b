#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{NewTransaction, TransactionKind};
use crate::store::AppState;

fn txn(id: &str, kind: TransactionKind, amount: rust_decimal::Decimal, category: &str) -> Transaction {
    NewTransaction {
        kind,
        amount,
        category: category.into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        notes: String::new(),
    }
    .with_id(id.into())
}

fn sample_snapshot() -> Snapshot {
    let mut noted = txn("b", TransactionKind::Expense, dec!(12.50), "food");
    noted.notes = "lunch, \"the usual\"".into();
    Snapshot {
        transactions: vec![
            txn("c", TransactionKind::Income, dec!(3000.00), "salary"),
            noted,
            txn("a", TransactionKind::Expense, dec!(0), "other"),
        ],
        budgets: Budgets::new()
            .with_limit("food", dec!(250.00))
            .with_limit("rent", dec!(0)),
    }
}

// ── Round trip ────────────────────────────────────────────────

#[test]
fn test_save_then_load_round_trips() {
    let store = SlotPersistence::new(Database::open_in_memory().unwrap());
    let snapshot = sample_snapshot();
    store.save(&snapshot);
    assert_eq!(store.load(), Some(snapshot));
}

#[test]
fn test_empty_state_round_trips() {
    let store = SlotPersistence::new(Database::open_in_memory().unwrap());
    store.save(&Snapshot::default());
    assert_eq!(store.load(), Some(Snapshot::default()));
}

#[test]
fn test_document_shape() {
    let json = PersistedState::from(&sample_snapshot()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["transactions"][0]["id"], "c");
    assert_eq!(value["transactions"][1]["amount"], "12.50");
    assert_eq!(value["transactions"][1]["kind"], "expense");
    assert_eq!(value["budgets"]["food"], "250.00");
    assert_eq!(value["budgets"]["rent"], "0");
}

#[test]
fn test_numeric_amounts_accepted() {
    let raw = r#"{
        "version": 1,
        "transactions": [
            {"id":"x","kind":"expense","amount":12.5,"category":"food","date":"2024-01-02"}
        ],
        "budgets": {"food": 100}
    }"#;
    let state = PersistedState::from_json(raw).unwrap();
    assert_eq!(state.transactions[0].amount, dec!(12.5));
    assert_eq!(state.transactions[0].notes, "");
    assert_eq!(state.budgets.limit_for("food"), Some(dec!(100)));
}

#[test]
fn test_missing_sections_default() {
    let state = PersistedState::from_json("{}").unwrap();
    assert_eq!(state.version, FORMAT_VERSION);
    assert!(state.transactions.is_empty());
    assert!(state.budgets.is_empty());
}

// ── Unreadable data ───────────────────────────────────────────

#[test]
fn test_absent_slot_loads_none() {
    let store = SlotPersistence::new(Database::open_in_memory().unwrap());
    assert_eq!(store.load(), None);
}

#[test]
fn test_corrupt_payload_loads_none() {
    let db = Database::open_in_memory().unwrap();
    db.put_slot(STATE_SLOT, "{not json").unwrap();
    let store = SlotPersistence::new(db);
    assert_eq!(store.load(), None);
}

#[test]
fn test_wrong_shape_loads_none() {
    let db = Database::open_in_memory().unwrap();
    db.put_slot(STATE_SLOT, r#"{"transactions": [{"id": 5}]}"#)
        .unwrap();
    let store = SlotPersistence::new(db);
    assert_eq!(store.load(), None);
}

#[test]
fn test_newer_version_loads_none() {
    let db = Database::open_in_memory().unwrap();
    db.put_slot(STATE_SLOT, r#"{"version": 2, "transactions": [], "budgets": {}}"#)
        .unwrap();
    let store = SlotPersistence::new(db);
    assert_eq!(store.load(), None);
}

#[test]
fn test_slots_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");
    SlotPersistence::with_slot(Database::open(&path).unwrap(), "other").save(&sample_snapshot());
    let store = SlotPersistence::new(Database::open(&path).unwrap());
    assert_eq!(store.load(), None);
}

// ── Write-through ─────────────────────────────────────────────

#[test]
fn test_state_changes_are_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");

    let mut state = AppState::new();
    state.subscribe(Box::new(SlotPersistence::new(Database::open(&path).unwrap())));
    let added = state.add_transaction(NewTransaction {
        kind: TransactionKind::Expense,
        amount: dec!(42.00),
        category: "food".into(),
        date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        notes: "groceries".into(),
    });
    state.set_budgets(Budgets::new().with_limit("food", dec!(300)));

    let reader = SlotPersistence::new(Database::open(&path).unwrap());
    let stored = reader.load().unwrap();
    assert_eq!(stored, state.snapshot());
    assert_eq!(stored.transactions[0].id, added.id);

    state.delete_transaction(&added.id);
    assert!(reader.load().unwrap().transactions.is_empty());
}

#[test]
fn test_load_does_not_write_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");

    let mut state = AppState::new();
    state.subscribe(Box::new(SlotPersistence::new(Database::open(&path).unwrap())));
    state.load(sample_snapshot());

    let reader = SlotPersistence::new(Database::open(&path).unwrap());
    assert_eq!(reader.load(), None);
}

#[test]
fn test_reload_restores_order_and_budgets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");

    let mut first = AppState::new();
    first.subscribe(Box::new(SlotPersistence::new(Database::open(&path).unwrap())));
    for (amount, category) in [(dec!(1), "food"), (dec!(2), "rent"), (dec!(3), "health")] {
        first.add_transaction(NewTransaction {
            kind: TransactionKind::Expense,
            amount,
            category: category.into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            notes: String::new(),
        });
    }
    first.set_budgets(Budgets::new().with_limit("rent", dec!(900)));

    let mut second = AppState::new();
    let loaded = SlotPersistence::new(Database::open(&path).unwrap())
        .load()
        .unwrap();
    second.load(loaded);
    assert_eq!(second.snapshot(), first.snapshot());
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn test_open_state_restores_and_writes_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fintrack.db");

    let mut first = open_state(&path);
    assert!(first.is_empty());
    first.set_budgets(Budgets::new().with_limit("food", dec!(120)));

    let second = open_state(&path);
    assert_eq!(second.budgets().limit_for("food"), Some(dec!(120)));
}

#[test]
fn test_open_state_with_corrupt_database_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fintrack.db");
    let garbage = vec![0xA5u8; 4096];
    std::fs::write(&path, &garbage).unwrap();

    let mut state = open_state(&path);
    assert!(state.is_empty());
    assert!(state.budgets().is_empty());

    // The session keeps working without persistence.
    state.add_transaction(NewTransaction {
        kind: TransactionKind::Expense,
        amount: dec!(3.00),
        category: "food".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        notes: String::new(),
    });
    assert_eq!(state.transaction_count(), 1);
    assert_eq!(std::fs::read(&path).unwrap(), garbage);
}

#[test]
fn test_open_state_with_unreachable_path_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("fintrack.db");
    let state = open_state(&path);
    assert!(state.is_empty());
}
