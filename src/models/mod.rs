mod budget;
mod category;
mod draft;
mod error;
mod transaction;

pub use budget::{parse_budget_entry, parse_budget_limit, Budgets};
pub use category::{display_label, Category, EXPENSE_CATEGORIES};
pub use draft::{TransactionDraft, DATE_FORMAT};
pub use error::{Field, ValidationError};
pub use transaction::{NewTransaction, Transaction, TransactionKind};
