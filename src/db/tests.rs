#![allow(clippy::unwrap_used)]

use super::*;

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_current() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_file_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fintrack.db");
    {
        let db = Database::open(&path).unwrap();
        db.put_slot("k", "v").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
    assert_eq!(db.get_slot("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_empty_version_table_is_stamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fintrack.db");
    {
        let db = Database::open(&path).unwrap();
        db.conn.execute("DELETE FROM schema_version", []).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fintrack.db");
    {
        let db = Database::open(&path).unwrap();
        db.conn
            .execute("UPDATE schema_version SET version = 9", [])
            .unwrap();
    }
    let err = Database::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("newer than this build supports"));
}

// ── Slots ─────────────────────────────────────────────────────

#[test]
fn test_missing_slot_is_none() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_slot("nothing").unwrap(), None);
}

#[test]
fn test_put_slot_overwrites() {
    let db = Database::open_in_memory().unwrap();
    db.put_slot("state", "first").unwrap();
    db.put_slot("state", "second").unwrap();
    assert_eq!(db.get_slot("state").unwrap().as_deref(), Some("second"));
}

#[test]
fn test_slots_are_independent() {
    let db = Database::open_in_memory().unwrap();
    db.put_slot("a", "1").unwrap();
    db.put_slot("b", "2").unwrap();
    assert_eq!(db.get_slot("a").unwrap().as_deref(), Some("1"));
    assert_eq!(db.get_slot("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_slot_stores_unicode_and_empty_values() {
    let db = Database::open_in_memory().unwrap();
    db.put_slot("notes", "café ☕ \"quoted\"").unwrap();
    db.put_slot("empty", "").unwrap();
    assert_eq!(
        db.get_slot("notes").unwrap().as_deref(),
        Some("café ☕ \"quoted\"")
    );
    assert_eq!(db.get_slot("empty").unwrap().as_deref(), Some(""));
}
