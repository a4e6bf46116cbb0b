use std::collections::HashSet;

use crate::models::{NewTransaction, Transaction};

/// Ordered transaction collection, newest insertion first.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    items: Vec<Transaction>,
    /// Every id handed out or loaded this session, deleted ones included.
    issued: HashSet<String>,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, new: NewTransaction) -> Transaction {
        let id = self.issue_id();
        let txn = new.with_id(id);
        self.items.insert(0, txn.clone());
        txn
    }

    /// Replace the record with the same id, keeping its position.
    /// Returns `false` (and changes nothing) if the id is unknown.
    pub(crate) fn update(&mut self, txn: Transaction) -> bool {
        match self.items.iter_mut().find(|t| t.id == txn.id) {
            Some(slot) => {
                *slot = txn;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if nothing matched.
    pub(crate) fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Load path only: the records are trusted as-is.
    pub(crate) fn replace_all(&mut self, items: Vec<Transaction>) {
        self.issued.extend(items.iter().map(|t| t.id.clone()));
        self.items = items;
    }

    pub(crate) fn list(&self) -> &[Transaction] {
        &self.items
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn issue_id(&mut self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}
