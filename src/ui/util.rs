use rust_decimal::Decimal;

use crate::models::Transaction;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Amount with a `+` for income and a `-` for expenses.
pub(crate) fn format_signed(txn: &Transaction) -> String {
    let sign = if txn.is_income() { "+" } else { "-" };
    format!("{sign}{}", format_amount(txn.amount))
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}

/// `[████░░░░]` with `width` cells, `ratio` clamped to 0..=1.
pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Pull a cursor back inside a list that may have shrunk.
pub(crate) fn clamp_cursor(index: &mut usize, scroll: &mut usize, len: usize) {
    if len == 0 {
        *index = 0;
        *scroll = 0;
        return;
    }
    if *index >= len {
        *index = len - 1;
    }
    if *scroll > *index {
        *scroll = *index;
    }
}
