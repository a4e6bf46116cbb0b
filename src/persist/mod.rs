//! Write-through persistence of the whole application state as one JSON
//! document in a named database slot.

use anyhow::{Context, Result};
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::db::Database;
use crate::models::{Budgets, Transaction};
use crate::store::{AppState, Snapshot, StateChange, StateObserver};

pub(crate) const STATE_SLOT: &str = "finance_tracker_state";
pub(crate) const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PersistedState {
    #[serde(default = "default_version")]
    pub(crate) version: u32,
    #[serde(default)]
    pub(crate) transactions: Vec<Transaction>,
    #[serde(default)]
    pub(crate) budgets: Budgets,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

impl From<&Snapshot> for PersistedState {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            version: FORMAT_VERSION,
            transactions: snapshot.transactions.clone(),
            budgets: snapshot.budgets.clone(),
        }
    }
}

impl From<PersistedState> for Snapshot {
    fn from(state: PersistedState) -> Self {
        Self {
            transactions: state.transactions,
            budgets: state.budgets,
        }
    }
}

impl PersistedState {
    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize state")
    }

    /// Rejects payloads written by a newer format.
    pub(crate) fn from_json(raw: &str) -> Result<Self> {
        let state: Self = serde_json::from_str(raw).context("Failed to parse stored state")?;
        if state.version > FORMAT_VERSION {
            anyhow::bail!(
                "Stored state has version {}, this build reads up to {}",
                state.version,
                FORMAT_VERSION
            );
        }
        Ok(state)
    }
}

/// Storage for the application state. Neither operation raises: a missing or
/// unreadable document loads as `None`, and a failed save is only logged.
pub(crate) trait StatePersistence {
    fn load(&self) -> Option<Snapshot>;
    fn save(&self, snapshot: &Snapshot);
}

pub(crate) struct SlotPersistence {
    db: Database,
    slot: String,
}

impl SlotPersistence {
    pub(crate) fn new(db: Database) -> Self {
        Self::with_slot(db, STATE_SLOT)
    }

    pub(crate) fn with_slot(db: Database, slot: &str) -> Self {
        Self {
            db,
            slot: slot.to_string(),
        }
    }

    fn try_load(&self) -> Result<Option<Snapshot>> {
        let Some(raw) = self.db.get_slot(&self.slot)? else {
            return Ok(None);
        };
        let state = PersistedState::from_json(&raw)?;
        Ok(Some(state.into()))
    }

    fn try_save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = PersistedState::from(snapshot).to_json()?;
        self.db.put_slot(&self.slot, &json)
    }
}

impl StatePersistence for SlotPersistence {
    fn load(&self) -> Option<Snapshot> {
        match self.try_load() {
            Ok(Some(snapshot)) => {
                debug!(
                    slot = %self.slot,
                    transactions = snapshot.transactions.len(),
                    "state loaded"
                );
                Some(snapshot)
            }
            Ok(None) => {
                debug!(slot = %self.slot, "no stored state");
                None
            }
            Err(e) => {
                warn!(slot = %self.slot, "ignoring stored state: {e:#}");
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) {
        if let Err(e) = self.try_save(snapshot) {
            error!(slot = %self.slot, "failed to save state: {e:#}");
        }
    }
}

impl StateObserver for SlotPersistence {
    fn on_change(&mut self, change: &StateChange, snapshot: &Snapshot) {
        if *change == StateChange::Loaded {
            return;
        }
        self.save(snapshot);
    }
}

/// Restore the state saved at `db_path`, then write every later change back.
/// A database that cannot be opened is logged and the session runs in
/// memory only.
pub(crate) fn open_state(db_path: &Path) -> AppState {
    let mut state = AppState::new();
    let db = match Database::open(db_path) {
        Ok(db) => db,
        Err(e) => {
            error!(
                path = %db_path.display(),
                "database unavailable, changes will not be saved: {e:#}"
            );
            return state;
        }
    };

    let persistence = SlotPersistence::new(db);
    if let Some(snapshot) = persistence.load() {
        state.load(snapshot);
    }
    state.subscribe(Box::new(persistence));
    state
}

#[cfg(test)]
mod tests;
