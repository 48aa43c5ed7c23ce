use chrono::Weekday;
use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::input::validate_input;
use crate::model::budget::DailyBudget;
use crate::model::field::Field;
use crate::model::week::WeeklyEntries;
use crate::repository::{KeyValueStore, MacroRepository, BUDGET_KEY, ENTRIES_KEY};
use crate::service::dto::WeeklySummary;

/// In-memory budget and week, kept in step with the store.
///
/// The in-memory state is authoritative: every accepted edit is applied first
/// and then saved from the current state. A failed save is logged and dropped.
pub struct MacroTracker<S: KeyValueStore> {
    repo: MacroRepository<S>,
    budget: DailyBudget,
    entries: WeeklyEntries,
}

impl<S: KeyValueStore> MacroTracker<S> {
    /// Loads both records. Loading never writes back.
    pub fn open(store: S) -> Self {
        let repo = MacroRepository::new(store);
        let budget = repo.load_budget();
        let entries = repo.load_entries();
        debug!(
            daily_calories = budget.calories(),
            logged_days = entries.iter().filter(|(_, e)| e.is_filled()).count(),
            "loaded macro tracker state"
        );
        Self {
            repo,
            budget,
            entries,
        }
    }

    pub fn budget(&self) -> &DailyBudget {
        &self.budget
    }

    pub fn entries(&self) -> &WeeklyEntries {
        &self.entries
    }

    pub fn store(&self) -> &S {
        self.repo.store()
    }

    pub fn summary(&self) -> WeeklySummary {
        WeeklySummary::build(&self.budget, &self.entries)
    }

    /// Re-reads both records, replacing the in-memory state.
    pub fn reload(&mut self) {
        self.budget = self.repo.load_budget();
        self.entries = self.repo.load_entries();
    }

    pub fn set_budget_field(&mut self, field: Field, raw: &str) -> Result<(), TrackerError> {
        let slot = self.budget.get_mut(field).ok_or(TrackerError::DerivedField)?;
        validate_input(raw)?;
        *slot = raw.to_string();
        self.save_budget();
        Ok(())
    }

    /// Several budget fields at once. Nothing changes unless every value
    /// passes the gate; the record is then saved once.
    pub fn set_budget_fields(&mut self, updates: &[(Field, &str)]) -> Result<(), TrackerError> {
        for &(field, raw) in updates {
            if self.budget.get(field).is_none() {
                return Err(TrackerError::DerivedField);
            }
            validate_input(raw)?;
        }
        for &(field, raw) in updates {
            if let Some(slot) = self.budget.get_mut(field) {
                *slot = raw.to_string();
            }
        }
        self.save_budget();
        Ok(())
    }

    pub fn set_entry_field(&mut self, day: Weekday, field: Field, raw: &str) -> Result<(), TrackerError> {
        validate_input(raw)?;
        *self.entries.day_mut(day).get_mut(field) = raw.to_string();
        self.save_entries();
        Ok(())
    }

    /// Back to defaults, in memory and in the store. Safe to repeat.
    pub fn clear_all(&mut self) {
        self.budget = DailyBudget::default();
        self.entries = WeeklyEntries::default();
        if let Err(e) = self.repo.clear() {
            warn!(error = %e, "failed to clear stored records");
        }
    }

    fn save_budget(&self) {
        if let Err(e) = self.repo.save_budget(&self.budget) {
            warn!(key = BUDGET_KEY, error = %e, "failed to save daily budget");
        }
    }

    fn save_entries(&self) {
        if let Err(e) = self.repo.save_entries(&self.entries) {
            warn!(key = ENTRIES_KEY, error = %e, "failed to save weekly entries");
        }
    }
}
