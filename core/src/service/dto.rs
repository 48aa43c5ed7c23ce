use chrono::Weekday;

use crate::model::budget::DailyBudget;
use crate::model::field::{Field, MacroTotals, PerField};
use crate::model::week::{DayEntry, WeeklyEntries};
use crate::service::budget_engine::{aggregate, is_unfilled, placeholders, remaining, weekly_budget};

/// One weekday as the rendering surfaces see it.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub day: Weekday,
    pub entry: DayEntry,
    /// Placeholder to show in each unfilled cell. Advisory only, never stored.
    pub hints: PerField<Option<i64>>,
    pub filled: bool,
}

/// Everything derived from the current budget and week in one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub daily_budget: MacroTotals,
    pub weekly_budget: MacroTotals,
    pub totals: MacroTotals,
    pub remaining: MacroTotals,
    pub empty_days: PerField<Vec<Weekday>>,
    pub placeholders: PerField<i64>,
    pub days: Vec<DaySummary>,
}

impl WeeklySummary {
    pub fn build(budget: &DailyBudget, entries: &WeeklyEntries) -> Self {
        let weekly_budget = weekly_budget(budget);
        let aggregate = aggregate(entries);
        let remaining = remaining(&weekly_budget, &aggregate.totals);
        let placeholders = placeholders(&remaining, &aggregate.empty_days);

        let days = entries
            .iter()
            .map(|(day, entry)| DaySummary {
                day,
                entry: entry.clone(),
                hints: PerField::from_fn(|field| {
                    is_unfilled(entry, field).then(|| *placeholders.get(field))
                }),
                filled: entry.is_filled(),
            })
            .collect();

        Self {
            daily_budget: PerField::from_fn(|field| budget.quantity(field)),
            weekly_budget,
            totals: aggregate.totals,
            remaining,
            empty_days: aggregate.empty_days,
            placeholders,
            days,
        }
    }

    pub fn day(&self, day: Weekday) -> Option<&DaySummary> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn is_over_budget(&self, field: Field) -> bool {
        *self.remaining.get(field) < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_hints_only_unfilled_cells() {
        let budget = DailyBudget::new("270", "110", "65");
        let mut entries = WeeklyEntries::default();
        entries.day_mut(Weekday::Mon).carbs = "300".to_string();

        let summary = WeeklySummary::build(&budget, &entries);

        assert_eq!(summary.daily_budget.calories, 2105.0);
        assert_eq!(summary.placeholders.carbs, 265);
        assert_eq!(summary.days.len(), 7);

        let monday = summary.day(Weekday::Mon).unwrap();
        assert_eq!(monday.hints.carbs, None);
        assert_eq!(monday.hints.protein, Some(110));
        assert!(monday.filled);

        let tuesday = summary.day(Weekday::Tue).unwrap();
        assert_eq!(tuesday.hints.carbs, Some(265));
        assert!(!tuesday.filled);
        assert!(!summary.is_over_budget(Field::Carbs));
    }
}
