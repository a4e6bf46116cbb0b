use rust_decimal::Decimal;
use thiserror::Error;

use super::TransactionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Kind,
    Amount,
    Category,
    Date,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kind => write!(f, "type"),
            Self::Amount => write!(f, "amount"),
            Self::Category => write!(f, "category"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// Rejected user input. Raised before any store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(Field),
    #[error("Invalid type '{0}' (expected income or expense)")]
    InvalidKind(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(Decimal),
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Unknown {kind} category '{category}'")]
    UnknownCategory {
        kind: TransactionKind,
        category: String,
    },
    #[error("Invalid budget amount: {0}")]
    InvalidBudget(String),
    #[error("Budget must not be negative: {0}")]
    NegativeBudget(Decimal),
}
