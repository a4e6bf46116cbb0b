use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::advice::InsightDispatcher;
use crate::analytics::{month_expenses_by_category, DerivedViews, MonthKey};
use crate::models::{Budgets, Transaction};
use crate::store::{AppState, Snapshot, StateChange, StateObserver};
use crate::ui::util::clamp_cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Insights,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Insights,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Insights => write!(f, "Insights"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, summary: String },
    ClearBudgets,
}

/// Set by the store whenever it changes; cleared when the views are rebuilt.
#[derive(Debug, Clone, Default)]
pub(crate) struct ViewsStale(Rc<Cell<bool>>);

impl ViewsStale {
    fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl StateObserver for ViewsStale {
    fn on_change(&mut self, _change: &StateChange, _snapshot: &Snapshot) {
        self.0.set(true);
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,

    // Derived from the store, rebuilt after each change
    pub(crate) views: DerivedViews,
    stale: ViewsStale,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) budgets: Budgets,
    pub(crate) month_spend: BTreeMap<String, Decimal>,

    // Transactions
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    /// Transaction being edited in `InputMode::Editing`.
    pub(crate) editing_id: Option<String>,

    // Budgets
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Insights
    pub(crate) insights: InsightDispatcher,
    pub(crate) insight_text: Option<String>,
    pub(crate) insight_scroll: u16,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(insights: InsightDispatcher) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today: Local::now().date_naive(),

            views: DerivedViews::default(),
            stale: ViewsStale::default(),
            transactions: Vec::new(),
            budgets: Budgets::new(),
            month_spend: BTreeMap::new(),

            transaction_index: 0,
            transaction_scroll: 0,
            editing_id: None,

            budget_index: 0,
            budget_scroll: 0,

            insights,
            insight_text: None,
            insight_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Observer to subscribe on the store so changes mark the views stale.
    pub(crate) fn view_observer(&self) -> ViewsStale {
        self.stale.clone()
    }

    /// Recompute every view from the store.
    pub(crate) fn refresh(&mut self, state: &AppState) {
        self.refresh_at(state, Local::now().date_naive());
    }

    /// Rebuild only when the store changed or the date rolled over.
    pub(crate) fn refresh_if_stale(&mut self, state: &AppState, today: NaiveDate) -> bool {
        if !self.stale.take() && today == self.today {
            return false;
        }
        self.refresh_at(state, today);
        true
    }

    pub(crate) fn refresh_at(&mut self, state: &AppState, today: NaiveDate) {
        self.stale.take();
        self.today = today;
        self.views = DerivedViews::compute(state.transactions(), state.budgets(), today);
        self.transactions = state.transactions().to_vec();
        self.budgets = state.budgets().clone();
        self.month_spend = month_expenses_by_category(state.transactions(), MonthKey::of(today));
        clamp_cursor(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
        );
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    /// Pick up a finished insights request, if any.
    pub(crate) fn poll_insights(&mut self) -> bool {
        match self.insights.poll() {
            Some(text) => {
                self.insight_text = Some(text);
                self.insight_scroll = 0;
                self.set_status("Insights ready");
                true
            }
            None => false,
        }
    }

    pub(crate) fn ask_confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.pending_action = Some(action);
        self.confirm_message = message.into();
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
