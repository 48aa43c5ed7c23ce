use anyhow::Result;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::model::budget::{BudgetRecord, DailyBudget};
use crate::model::week::WeeklyEntries;
use crate::repository::traits::KeyValueStore;

pub const BUDGET_KEY: &str = "macroDailyBudget";
pub const ENTRIES_KEY: &str = "macroWeeklyEntries";

/// Reads and writes the two persisted records. Loads never fail; anything
/// missing or unreadable comes back as the default record.
pub struct MacroRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> MacroRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(key, "no stored record, using defaults");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "could not read stored record, using defaults");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, error = %e, "stored record is not valid, using defaults");
                None
            }
        }
    }

    pub fn load_budget(&self) -> DailyBudget {
        let Some(record) = self.read_record::<BudgetRecord>(BUDGET_KEY) else {
            return DailyBudget::default();
        };
        if record.is_legacy() {
            debug!(
                version = record.version,
                had_calories = record.calories.is_some(),
                "migrating legacy daily budget record"
            );
        }
        record.into_budget()
    }

    pub fn load_entries(&self) -> WeeklyEntries {
        self.read_record(ENTRIES_KEY).unwrap_or_default()
    }

    pub fn save_budget(&self, budget: &DailyBudget) -> Result<()> {
        let text = serde_json::to_string_pretty(&BudgetRecord::from(budget))?;
        self.store.set(BUDGET_KEY, &text)
    }

    pub fn save_entries(&self, entries: &WeeklyEntries) -> Result<()> {
        let text = serde_json::to_string_pretty(entries)?;
        self.store.set(ENTRIES_KEY, &text)
    }

    /// Removes both records. Each key is attempted even if the other fails.
    pub fn clear(&self) -> Result<()> {
        let budget = self.store.remove(BUDGET_KEY);
        let entries = self.store.remove(ENTRIES_KEY);
        budget.and(entries)
    }
}
