use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "i" | "+" => Some(Self::Income),
            "expense" | "exp" | "e" | "-" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction as entered, before the ledger has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub notes: String,
}

impl NewTransaction {
    pub fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            date: self.date,
            notes: self.notes,
        }
    }
}

/// A ledger record. `amount` is always the unsigned magnitude; the sign
/// comes from `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}
