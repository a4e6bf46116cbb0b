#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use tokio::runtime::Runtime;

use super::*;
use crate::models::TransactionKind;

struct Harness {
    state: AppState,
    gateway: AdviceGateway,
    rt: Runtime,
}

impl Harness {
    fn new() -> Self {
        Self {
            state: AppState::new(),
            gateway: AdviceGateway::unconfigured(),
            rt: tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap(),
        }
    }

    fn run(&mut self, args: &[&str]) -> Result<()> {
        let mut argv = vec!["fintrack".to_string()];
        argv.extend(args.iter().map(|a| a.to_string()));
        as_cli(&argv, &mut self.state, &self.gateway, self.rt.handle())
    }
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_add_records_transaction() {
    let mut h = Harness::new();
    h.run(&["add", "expense", "12.50", "food", "2024-01-15", "lunch", "out"])
        .unwrap();

    let txns = h.state.transactions();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].kind, TransactionKind::Expense);
    assert_eq!(txns[0].amount, dec!(12.50));
    assert_eq!(txns[0].category, "food");
    assert_eq!(txns[0].notes, "lunch out");
}

#[test]
fn test_add_rejects_invalid_input() {
    let mut h = Harness::new();
    assert!(h.run(&["add"]).is_err());
    assert!(h.run(&["add", "expense", "abc", "food"]).is_err());
    assert!(h.run(&["add", "expense", "10", "salary"]).is_err());
    assert!(h.state.is_empty());
}

#[test]
fn test_edit_replaces_fields_and_keeps_id() {
    let mut h = Harness::new();
    h.run(&["add", "expense", "5", "food", "2024-01-01"]).unwrap();
    let id = h.state.transactions()[0].id.clone();

    h.run(&["edit", &id, "income", "100", "gift", "2024-02-02", "birthday"])
        .unwrap();

    let txn = h.state.transaction(&id).unwrap();
    assert_eq!(txn.kind, TransactionKind::Income);
    assert_eq!(txn.amount, dec!(100));
    assert_eq!(txn.notes, "birthday");
    assert_eq!(h.state.transaction_count(), 1);
}

#[test]
fn test_edit_without_fields_leaves_transaction() {
    let mut h = Harness::new();
    h.run(&["add", "expense", "5", "food", "2024-01-01"]).unwrap();
    let before = h.state.snapshot();
    let id = before.transactions[0].id.clone();

    h.run(&["edit", &id]).unwrap();
    assert_eq!(h.state.snapshot(), before);
}

#[test]
fn test_edit_unknown_id_fails() {
    let mut h = Harness::new();
    let err = h.run(&["edit", "nope", "expense", "1", "food"]).unwrap_err();
    assert_eq!(err.to_string(), "No transaction with id nope");
}

#[test]
fn test_delete() {
    let mut h = Harness::new();
    h.run(&["add", "income", "3000", "salary"]).unwrap();
    let id = h.state.transactions()[0].id.clone();

    h.run(&["delete", &id]).unwrap();
    assert!(h.state.is_empty());
    assert!(h.run(&["delete", &id]).is_err());
}

#[test]
fn test_list_and_reports_run_on_empty_and_filled_state() {
    let mut h = Harness::new();
    for cmd in ["list", "summary", "breakdown", "trend", "budgets"] {
        h.run(&[cmd]).unwrap();
    }
    h.run(&["add", "expense", "20", "rent", "2024-03-01"]).unwrap();
    h.run(&["budget", "rent", "10"]).unwrap();
    for cmd in ["list", "summary", "breakdown", "trend", "budgets"] {
        h.run(&[cmd]).unwrap();
    }
    h.run(&["list", "--month", "2024-03"]).unwrap();
}

#[test]
fn test_list_rejects_bad_month() {
    let mut h = Harness::new();
    assert!(h.run(&["list", "--month", "2024-13"]).is_err());
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budget_set_and_clear() {
    let mut h = Harness::new();
    h.run(&["budget", "Food", "400"]).unwrap();
    assert_eq!(h.state.budgets().limit_for("food"), Some(dec!(400)));

    h.run(&["budget", "food"]).unwrap();
    assert_eq!(h.state.budgets().limit_for("food"), None);
}

#[test]
fn test_budget_rejects_bad_input() {
    let mut h = Harness::new();
    assert!(h.run(&["budget"]).is_err());
    assert!(h.run(&["budget", "food", "-5"]).is_err());
    assert!(h.run(&["budget", "salary", "5"]).is_err());
    assert!(h.state.budgets().is_empty());
}

#[test]
fn test_clear_budgets() {
    let mut h = Harness::new();
    h.run(&["budget", "food", "400"]).unwrap();
    h.run(&["budget", "rent", "900"]).unwrap();
    h.run(&["clear-budgets"]).unwrap();
    assert!(h.state.budgets().is_empty());
}

// ── Export / insights / misc ──────────────────────────────────

#[test]
fn test_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut h = Harness::new();
    h.run(&["add", "expense", "12.50", "food", "2024-01-15"]).unwrap();

    h.run(&["export", path.to_str().unwrap()]).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains("\"12.50\""));
}

#[test]
fn test_insights_without_key_succeeds() {
    let mut h = Harness::new();
    h.run(&["insights"]).unwrap();
}

#[test]
fn test_unknown_command_fails() {
    let mut h = Harness::new();
    let err = h.run(&["frobnicate"]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown command: frobnicate");
}

#[test]
fn test_parse_month() {
    assert_eq!(
        parse_month("2024-02").unwrap(),
        MonthKey { year: 2024, month: 2 }
    );
    assert!(parse_month("2024").is_err());
    assert!(parse_month("feb").is_err());
}
