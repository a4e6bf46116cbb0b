#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::TransactionKind;
use rust_decimal_macros::dec;

fn txn(id: &str, kind: TransactionKind, notes: &str) -> Transaction {
    Transaction {
        id: id.into(),
        kind,
        amount: dec!(12.50),
        category: "food".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        notes: notes.into(),
    }
}

fn to_string(txns: &[Transaction]) -> String {
    let mut buf = Vec::new();
    write_csv(txns, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_empty_ledger_writes_header_only() {
    assert_eq!(
        to_string(&[]),
        "\"ID\",\"Type\",\"Amount\",\"Category\",\"Date\",\"Notes\"\n"
    );
}

#[test]
fn test_rows_follow_ledger_order() {
    let out = to_string(&[
        txn("b", TransactionKind::Income, ""),
        txn("a", TransactionKind::Expense, "lunch"),
    ]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "\"ID\",\"Type\",\"Amount\",\"Category\",\"Date\",\"Notes\""
    );
    assert_eq!(
        lines[1],
        "\"b\",\"income\",\"12.50\",\"food\",\"2024-01-05\",\"\""
    );
    assert_eq!(
        lines[2],
        "\"a\",\"expense\",\"12.50\",\"food\",\"2024-01-05\",\"lunch\""
    );
}

#[test]
fn test_notes_quotes_are_doubled() {
    let out = to_string(&[txn("x", TransactionKind::Expense, r#"the "usual", twice"#)]);
    assert!(out.ends_with("\"the \"\"usual\"\", twice\"\n"));
}

#[test]
fn test_output_reads_back() {
    let txns = vec![
        txn("1", TransactionKind::Expense, "multi\nline"),
        txn("2", TransactionKind::Income, "a,b"),
    ];
    let out = to_string(&txns);
    let mut rdr = csv::Reader::from_reader(out.as_bytes());
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["ID", "Type", "Amount", "Category", "Date", "Notes"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][5], "multi\nline");
    assert_eq!(&rows[1][5], "a,b");
    assert_eq!(&rows[1][1], "income");
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let count = export_to_csv(&[txn("1", TransactionKind::Expense, "")], &path).unwrap();
    assert_eq!(count, 1);
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("out.csv");
    assert!(export_to_csv(&[], &path).is_err());
}

#[test]
fn test_default_export_path_name() {
    let path = default_export_path(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "fintrack-transactions-2024-03-09.csv"
    );
}
