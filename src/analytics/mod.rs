//! Derived views over a ledger snapshot: totals, category breakdown,
//! monthly trend and budget consumption. Everything here is pure.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::models::{display_label, Budgets, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
}

pub(crate) fn totals(txns: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for txn in txns {
        match txn.kind {
            TransactionKind::Income => totals.income += txn.amount,
            TransactionKind::Expense => totals.expenses += txn.amount,
        }
        totals.balance += txn.signed_amount();
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total: Decimal,
}

impl CategoryTotal {
    pub(crate) fn label(&self) -> String {
        display_label(&self.category)
    }
}

/// Expense totals per raw category id, largest first, ties by id.
pub(crate) fn category_breakdown(txns: &[Transaction]) -> Vec<CategoryTotal> {
    let mut sums: HashMap<&str, Decimal> = HashMap::new();
    for txn in txns.iter().filter(|t| t.is_expense()) {
        *sums.entry(txn.category.as_str()).or_default() += txn.amount;
    }
    let mut out: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    out
}

/// Calendar month. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MonthKey {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl MonthKey {
    pub(crate) fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Short label, e.g. `Dec 23`.
    pub(crate) fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%b %y").to_string(),
            None => format!("{}-{:02}", self.year, self.month),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyTrend {
    pub(crate) month: MonthKey,
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
}

impl MonthlyTrend {
    pub(crate) fn label(&self) -> String {
        self.month.label()
    }
}

/// Income and expense per calendar month, oldest month first.
pub(crate) fn monthly_trend(txns: &[Transaction]) -> Vec<MonthlyTrend> {
    let mut months: BTreeMap<MonthKey, (Decimal, Decimal)> = BTreeMap::new();
    for txn in txns {
        let entry = months.entry(MonthKey::of(txn.date)).or_default();
        match txn.kind {
            TransactionKind::Income => entry.0 += txn.amount,
            TransactionKind::Expense => entry.1 += txn.amount,
        }
    }
    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTrend {
            month,
            income,
            expense,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetBand {
    /// Under 75% of the limit.
    Nominal,
    /// 75% up to and including 100%.
    Warning,
    /// Strictly above the limit.
    OverBudget,
}

impl std::fmt::Display for BudgetBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nominal => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::OverBudget => write!(f, "over budget"),
        }
    }
}

/// One budgeted category for the current month. `limit` is always > 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetLine {
    pub(crate) category: String,
    pub(crate) spent: Decimal,
    pub(crate) limit: Decimal,
}

impl BudgetLine {
    pub(crate) fn label(&self) -> String {
        display_label(&self.category)
    }

    pub(crate) fn band(&self) -> BudgetBand {
        if self.spent > self.limit {
            BudgetBand::OverBudget
        } else if self.spent * Decimal::from(4) >= self.limit * Decimal::from(3) {
            BudgetBand::Warning
        } else {
            BudgetBand::Nominal
        }
    }

    /// Spent as a percentage of the limit, rounded to a whole percent.
    pub(crate) fn percent(&self) -> Decimal {
        if self.limit <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.spent * Decimal::ONE_HUNDRED / self.limit).round_dp(0)
    }

    /// Fraction of the limit used, capped at 1.0 for progress bars.
    pub(crate) fn fill_ratio(&self) -> f64 {
        if self.limit <= Decimal::ZERO {
            return 0.0;
        }
        (self.spent / self.limit).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
    }
}

/// Expense totals per category for one calendar month.
pub(crate) fn month_expenses_by_category(
    txns: &[Transaction],
    month: MonthKey,
) -> BTreeMap<String, Decimal> {
    let mut out: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in txns
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
    {
        *out.entry(txn.category.clone()).or_default() += txn.amount;
    }
    out
}

/// Spend against every budget with a limit above zero, for the month that
/// contains `today`, in category order.
pub(crate) fn budget_status(
    txns: &[Transaction],
    budgets: &Budgets,
    today: NaiveDate,
) -> Vec<BudgetLine> {
    let spent = month_expenses_by_category(txns, MonthKey::of(today));
    budgets
        .active()
        .map(|(category, limit)| BudgetLine {
            category: category.to_string(),
            spent: spent.get(category).copied().unwrap_or(Decimal::ZERO),
            limit,
        })
        .collect()
}

/// All derived views, recomputed together after every state change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DerivedViews {
    pub(crate) totals: Totals,
    pub(crate) breakdown: Vec<CategoryTotal>,
    pub(crate) trend: Vec<MonthlyTrend>,
    pub(crate) budget_status: Vec<BudgetLine>,
}

impl DerivedViews {
    pub(crate) fn compute(txns: &[Transaction], budgets: &Budgets, today: NaiveDate) -> Self {
        Self {
            totals: totals(txns),
            breakdown: category_breakdown(txns),
            trend: monthly_trend(txns),
            budget_status: budget_status(txns, budgets, today),
        }
    }
}
