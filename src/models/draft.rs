use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::{Category, Field, NewTransaction, Transaction, TransactionKind, ValidationError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw transaction input as typed into a form or command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub notes: String,
}

impl TransactionDraft {
    /// Parse `<type> <amount> <category> [YYYY-MM-DD] [notes...]`.
    /// The date falls back to `today` when the fourth token is not a date.
    /// Notes are the rest of the line, inner spacing kept.
    pub fn parse_args(args: &str, today: NaiveDate) -> Self {
        let (kind, rest) = next_token(args);
        let (amount, rest) = next_token(rest);
        let (category, rest) = next_token(rest);
        let (maybe_date, after_date) = next_token(rest);

        let (date, notes) = if NaiveDate::parse_from_str(maybe_date, DATE_FORMAT).is_ok() {
            (maybe_date.to_string(), after_date)
        } else {
            (today.format(DATE_FORMAT).to_string(), rest)
        };

        Self {
            kind: kind.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            date,
            notes: notes.trim().to_string(),
        }
    }

    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind.as_str().to_string(),
            amount: txn.amount.to_string(),
            category: txn.category.clone(),
            date: txn.date.format(DATE_FORMAT).to_string(),
            notes: txn.notes.clone(),
        }
    }

    /// The inverse of [`parse_args`](Self::parse_args): one command line.
    pub fn to_args(&self) -> String {
        let mut out = format!("{} {} {} {}", self.kind, self.amount, self.category, self.date);
        if !self.notes.is_empty() {
            out.push(' ');
            out.push_str(&self.notes);
        }
        out
    }

    /// Check every required field and produce a typed record.
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let kind_raw = self.kind.trim();
        if kind_raw.is_empty() {
            return Err(ValidationError::MissingField(Field::Kind));
        }
        let kind = TransactionKind::parse(kind_raw)
            .ok_or_else(|| ValidationError::InvalidKind(kind_raw.to_string()))?;

        let amount_raw = self.amount.trim();
        if amount_raw.is_empty() {
            return Err(ValidationError::MissingField(Field::Amount));
        }
        let amount = parse_money(amount_raw)
            .map_err(|_| ValidationError::InvalidAmount(amount_raw.to_string()))?;
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(amount));
        }

        let category_raw = self.category.trim();
        if category_raw.is_empty() {
            return Err(ValidationError::MissingField(Field::Category));
        }
        let category =
            Category::find(kind, category_raw).ok_or_else(|| ValidationError::UnknownCategory {
                kind,
                category: category_raw.to_string(),
            })?;

        let date_raw = self.date.trim();
        if date_raw.is_empty() {
            return Err(ValidationError::MissingField(Field::Date));
        }
        let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(date_raw.to_string()))?;

        Ok(NewTransaction {
            kind,
            amount,
            category: category.value.to_string(),
            date,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// First whitespace-separated token and everything after it.
fn next_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => input.split_at(end),
        None => (input, ""),
    }
}

/// Parse a money amount, tolerating a leading `$` and thousands separators.
/// The result is rounded to whole cents and always carries two decimals.
pub(crate) fn parse_money(input: &str) -> Result<Decimal, rust_decimal::Error> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let mut value = Decimal::from_str(&cleaned)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);
    Ok(value)
}
