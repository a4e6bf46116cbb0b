//! Application state container: the transaction ledger and the budget
//! mapping, plus the observers that react to every change.

mod budgets;
mod ledger;

use tracing::debug;

pub(crate) use budgets::BudgetStore;
pub(crate) use ledger::Ledger;

use crate::models::{Budgets, NewTransaction, Transaction};

/// What a mutation did. Only effective mutations are reported; an update or
/// delete for an unknown id emits nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StateChange {
    Loaded,
    TransactionAdded(String),
    TransactionUpdated(String),
    TransactionDeleted(String),
    BudgetsReplaced,
}

/// Point-in-time copy of both stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) budgets: Budgets,
}

pub(crate) trait StateObserver {
    fn on_change(&mut self, change: &StateChange, snapshot: &Snapshot);
}

#[derive(Default)]
pub(crate) struct AppState {
    ledger: Ledger,
    budgets: BudgetStore,
    observers: Vec<Box<dyn StateObserver>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            ledger: Ledger::new(),
            budgets: BudgetStore::new(),
            observers: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// Replace both stores with previously persisted contents.
    pub(crate) fn load(&mut self, snapshot: Snapshot) {
        debug!(
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            "loading state"
        );
        self.ledger.replace_all(snapshot.transactions);
        self.budgets.replace_all(snapshot.budgets);
        self.emit(StateChange::Loaded);
    }

    pub(crate) fn add_transaction(&mut self, new: NewTransaction) -> Transaction {
        let txn = self.ledger.add(new);
        debug!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction added");
        self.emit(StateChange::TransactionAdded(txn.id.clone()));
        txn
    }

    pub(crate) fn update_transaction(&mut self, txn: Transaction) -> bool {
        let id = txn.id.clone();
        if !self.ledger.update(txn) {
            debug!(%id, "update ignored, no such transaction");
            return false;
        }
        debug!(%id, "transaction updated");
        self.emit(StateChange::TransactionUpdated(id));
        true
    }

    pub(crate) fn delete_transaction(&mut self, id: &str) -> bool {
        if !self.ledger.delete(id) {
            debug!(%id, "delete ignored, no such transaction");
            return false;
        }
        debug!(%id, "transaction deleted");
        self.emit(StateChange::TransactionDeleted(id.to_string()));
        true
    }

    pub(crate) fn set_budgets(&mut self, budgets: Budgets) {
        debug!(entries = budgets.len(), "budgets replaced");
        self.budgets.replace_all(budgets);
        self.emit(StateChange::BudgetsReplaced);
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        self.ledger.list()
    }

    pub(crate) fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.ledger.get(id)
    }

    pub(crate) fn budgets(&self) -> &Budgets {
        self.budgets.get()
    }

    pub(crate) fn transaction_count(&self) -> usize {
        self.ledger.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            transactions: self.ledger.list().to_vec(),
            budgets: self.budgets.get().clone(),
        }
    }

    fn emit(&mut self, change: StateChange) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_change(&change, &snapshot);
        }
    }
}
