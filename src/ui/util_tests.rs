#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::util::*;
use crate::models::{Transaction, TransactionKind};

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("rent", 10), "rent");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("groceries", 9), "groceries");
}

#[test]
fn test_truncate_long_notes() {
    assert_eq!(truncate("dinner with friends", 7), "dinner…");
}

#[test]
fn test_truncate_zero_and_one() {
    assert_eq!(truncate("abc", 0), "");
    assert_eq!(truncate("abc", 1), "…");
    assert_eq!(truncate("", 3), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café résumé", 5), "café…");
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_separators() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_pads_cents() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(5)), "$5.00");
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
    assert_eq!(format_amount(dec!(-99999.01)), "-$99,999.01");
}

#[test]
fn test_format_signed() {
    let mut txn = Transaction {
        id: "1".into(),
        kind: TransactionKind::Income,
        amount: dec!(2500),
        category: "salary".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        notes: String::new(),
    };
    assert_eq!(format_signed(&txn), "+$2,500.00");
    txn.kind = TransactionKind::Expense;
    assert_eq!(format_signed(&txn), "-$2,500.00");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    assert_eq!(progress_bar(0.5, 4), "[██░░]");
    assert_eq!(progress_bar(1.0, 4), "[████]");
    assert_eq!(progress_bar(3.0, 4), "[████]");
    assert_eq!(progress_bar(-1.0, 4), "[░░░░]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 20, 5);
    assert_eq!((index, scroll), (19, 15));
    scroll_to_bottom(&mut index, &mut scroll, 0, 5);
    assert_eq!((index, scroll), (19, 15));
}

#[test]
fn test_clamp_cursor_after_shrink() {
    let (mut index, mut scroll) = (9, 7);
    clamp_cursor(&mut index, &mut scroll, 5);
    assert_eq!((index, scroll), (4, 4));
    clamp_cursor(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}
