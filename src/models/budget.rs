use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::draft::parse_money;
use super::{Category, TransactionKind, ValidationError};

/// Expense category -> monthly limit. A missing entry and a zero entry both
/// mean "no budget set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budgets(BTreeMap<String, Decimal>);

impl Budgets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw entry, zero included.
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.0.get(category).copied()
    }

    /// The limit for `category`, or `None` when it is unbudgeted.
    pub fn limit_for(&self, category: &str) -> Option<Decimal> {
        self.get(category).filter(|limit| *limit > Decimal::ZERO)
    }

    /// Entries with a limit above zero, in ascending category order.
    pub fn active(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0
            .iter()
            .filter(|(_, limit)| **limit > Decimal::ZERO)
            .map(|(cat, limit)| (cat.as_str(), *limit))
    }

    /// A copy of this mapping with one entry set. Callers use this to build
    /// the full mapping they hand to the budget store.
    pub fn with_limit(&self, category: &str, limit: Decimal) -> Self {
        let mut next = self.0.clone();
        next.insert(category.to_string(), limit);
        Self(next)
    }
}

impl FromIterator<(String, Decimal)> for Budgets {
    fn from_iter<T: IntoIterator<Item = (String, Decimal)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse a budget limit as typed by the user. Blank input means 0, which
/// is the "unbudgeted" marker.
pub fn parse_budget_limit(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let amount =
        parse_money(trimmed).map_err(|_| ValidationError::InvalidBudget(trimmed.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeBudget(amount));
    }
    Ok(amount)
}

/// Resolve an expense category name (value or label) and its limit.
pub fn parse_budget_entry(
    category: &str,
    limit: &str,
) -> Result<(&'static str, Decimal), ValidationError> {
    let cat = Category::find(TransactionKind::Expense, category).ok_or_else(|| {
        ValidationError::UnknownCategory {
            kind: TransactionKind::Expense,
            category: category.trim().to_string(),
        }
    })?;
    Ok((cat.value, parse_budget_limit(limit)?))
}
