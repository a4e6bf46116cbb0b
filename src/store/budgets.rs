use crate::models::Budgets;

#[derive(Debug, Default)]
pub(crate) struct BudgetStore {
    budgets: Budgets,
}

impl BudgetStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Swap in the full mapping. Categories missing from `budgets` are gone
    /// afterwards; nothing is merged.
    pub(crate) fn replace_all(&mut self, budgets: Budgets) {
        self.budgets = budgets;
    }

    pub(crate) fn get(&self) -> &Budgets {
        &self.budgets
    }
}
