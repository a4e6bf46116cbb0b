#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::advice::AdviceGateway;
use crate::models::{NewTransaction, TransactionKind};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (tokio::runtime::Runtime, App, AppState) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let app = App::new(InsightDispatcher::new(
        AdviceGateway::unconfigured(),
        rt.handle().clone(),
    ));
    let mut state = AppState::new();
    state.subscribe(Box::new(app.view_observer()));
    (rt, app, state)
}

fn lunch() -> NewTransaction {
    NewTransaction {
        kind: TransactionKind::Expense,
        amount: dec!(12.50),
        category: "food".into(),
        date: day(2024, 3, 10),
        notes: String::new(),
    }
}

#[test]
fn test_quiet_tick_skips_rebuild() {
    let (_rt, mut app, state) = setup();
    let today = day(2024, 3, 20);
    app.refresh_at(&state, today);
    assert!(!app.refresh_if_stale(&state, today));
    assert!(!app.refresh_if_stale(&state, today));
}

#[test]
fn test_mutation_marks_views_stale() {
    let (_rt, mut app, mut state) = setup();
    let today = day(2024, 3, 20);
    app.refresh_at(&state, today);

    state.add_transaction(lunch());
    assert_eq!(app.views.totals.expenses, dec!(0));

    assert!(app.refresh_if_stale(&state, today));
    assert_eq!(app.views.totals.expenses, dec!(12.50));
    assert_eq!(app.transactions.len(), 1);
    assert!(!app.refresh_if_stale(&state, today));
}

#[test]
fn test_unknown_delete_leaves_views_fresh() {
    let (_rt, mut app, mut state) = setup();
    let today = day(2024, 3, 20);
    app.refresh_at(&state, today);
    assert!(!state.delete_transaction("missing"));
    assert!(!app.refresh_if_stale(&state, today));
}

#[test]
fn test_date_rollover_rebuilds() {
    let (_rt, mut app, state) = setup();
    app.refresh_at(&state, day(2024, 3, 31));
    assert!(app.refresh_if_stale(&state, day(2024, 4, 1)));
    assert_eq!(app.today, day(2024, 4, 1));
    assert!(!app.refresh_if_stale(&state, day(2024, 4, 1)));
}
