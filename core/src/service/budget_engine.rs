use chrono::Weekday;

use crate::model::budget::DailyBudget;
use crate::model::field::{Field, MacroTotals, PerField};
use crate::model::week::{DayEntry, WeeklyEntries};

// Energy per gram
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

pub const DAYS_PER_WEEK: f64 = 7.0;

/// Sum of logged values and the days that still need one, per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub totals: MacroTotals,
    pub empty_days: PerField<Vec<Weekday>>,
}

/// Best-effort numeric read of a stored field. Anything that is not a finite number is 0.
pub fn parse_quantity(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// A field is filled when it holds a number strictly greater than zero.
/// Empty, unparsable, zero and negative values are all unfilled.
pub fn is_filled(text: &str) -> bool {
    parse_quantity(text) > 0.0
}

pub fn derive_calories(carbs: f64, protein: f64, fat: f64) -> f64 {
    carbs * KCAL_PER_GRAM_CARBS + protein * KCAL_PER_GRAM_PROTEIN + fat * KCAL_PER_GRAM_FAT
}

pub fn weekly_budget(budget: &DailyBudget) -> MacroTotals {
    PerField::from_fn(|field| budget.quantity(field) * DAYS_PER_WEEK)
}

pub fn aggregate(entries: &WeeklyEntries) -> Aggregate {
    let mut result = Aggregate::default();

    for field in Field::ALL {
        for (day, entry) in entries.iter() {
            let text = entry.get(field);
            if is_filled(text) {
                *result.totals.get_mut(field) += parse_quantity(text);
            } else {
                result.empty_days.get_mut(field).push(day);
            }
        }
    }

    result
}

/// Weekly allowance left per field. Negative when over budget.
pub fn remaining(weekly_budget: &MacroTotals, totals: &MacroTotals) -> MacroTotals {
    PerField::from_fn(|field| weekly_budget.get(field) - totals.get(field))
}

/// Suggested amount per unfilled day, spreading what is left evenly over the rest of the week.
pub fn placeholder(field: Field, remaining: &MacroTotals, empty_days: &PerField<Vec<Weekday>>) -> i64 {
    let open_days = empty_days.get(field).len();
    if open_days == 0 {
        return 0;
    }
    // f64::round rounds half away from zero
    (remaining.get(field) / open_days as f64).round() as i64
}

pub fn placeholders(remaining: &MacroTotals, empty_days: &PerField<Vec<Weekday>>) -> PerField<i64> {
    PerField::from_fn(|field| placeholder(field, remaining, empty_days))
}

pub fn is_unfilled(day: &DayEntry, field: Field) -> bool {
    !is_filled(day.get(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::week::WEEK;

    fn entries_with(day: Weekday, field: Field, value: &str) -> WeeklyEntries {
        let mut entries = WeeklyEntries::default();
        *entries.day_mut(day).get_mut(field) = value.to_string();
        entries
    }

    #[test]
    fn test_parse_quantity_falls_back_to_zero() {
        assert_eq!(parse_quantity("42"), 42.0);
        assert_eq!(parse_quantity(" 12.5 "), 12.5);
        assert_eq!(parse_quantity(""), 0.0);
        assert_eq!(parse_quantity("abc"), 0.0);
        assert_eq!(parse_quantity("NaN"), 0.0);
        assert_eq!(parse_quantity("inf"), 0.0);
        assert_eq!(parse_quantity("-3"), -3.0);
    }

    #[test]
    fn test_derive_calories_formula() {
        for c in [0u32, 1, 17, 270] {
            for p in [0u32, 3, 110] {
                for f in [0u32, 9, 65] {
                    let expected = 4.0 * c as f64 + 4.0 * p as f64 + 9.0 * f as f64;
                    assert_eq!(derive_calories(c as f64, p as f64, f as f64), expected);
                }
            }
        }
    }

    #[test]
    fn test_weekly_budget_scenario() {
        let budget = DailyBudget::new("270", "110", "65");
        assert_eq!(budget.calories(), 2105.0);

        let weekly = weekly_budget(&budget);
        assert_eq!(weekly.calories, 14735.0);
        assert_eq!(weekly.carbs, 1890.0);
        assert_eq!(weekly.protein, 770.0);
        assert_eq!(weekly.fat, 455.0);
    }

    #[test]
    fn test_weekly_budget_treats_bad_fields_as_zero() {
        let budget = DailyBudget::new("", "x1", "10");
        let weekly = weekly_budget(&budget);
        assert_eq!(weekly.carbs, 0.0);
        assert_eq!(weekly.protein, 0.0);
        assert_eq!(weekly.fat, 70.0);
        assert_eq!(weekly.calories, 630.0);
    }

    #[test]
    fn test_aggregate_partitions_every_field() {
        let mut entries = WeeklyEntries::default();
        *entries.day_mut(Weekday::Mon) = DayEntry::new("2000", "250", "0", "70");
        *entries.day_mut(Weekday::Wed) = DayEntry::new("", "abc", "100", "-4");
        *entries.day_mut(Weekday::Sun) = DayEntry::new("1800.5", "", "90", "60");

        let result = aggregate(&entries);

        assert_eq!(result.totals.calories, 3800.5);
        assert_eq!(result.totals.carbs, 250.0);
        assert_eq!(result.totals.protein, 190.0);
        assert_eq!(result.totals.fat, 130.0);

        for field in Field::ALL {
            let empty = result.empty_days.get(field);
            let filled: Vec<Weekday> = entries
                .iter()
                .filter(|(_, e)| is_filled(e.get(field)))
                .map(|(d, _)| d)
                .collect();
            assert_eq!(empty.len() + filled.len(), 7);
            assert!(filled.iter().all(|d| !empty.contains(d)));
        }

        assert_eq!(
            result.empty_days.protein,
            vec![Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Fri, Weekday::Sat]
        );
        // negative fat counts as empty
        assert!(result.empty_days.fat.contains(&Weekday::Wed));
    }

    #[test]
    fn test_empty_week_leaves_whole_budget() {
        let budget = DailyBudget::new("270", "110", "65");
        let weekly = weekly_budget(&budget);
        let result = aggregate(&WeeklyEntries::default());
        let left = remaining(&weekly, &result.totals);

        assert_eq!(left, weekly);
        assert_eq!(result.empty_days.carbs, WEEK.to_vec());
        assert_eq!(
            placeholder(Field::Carbs, &left, &result.empty_days),
            (left.carbs / 7.0).round() as i64
        );
        assert_eq!(placeholder(Field::Calories, &left, &result.empty_days), 2105);
    }

    #[test]
    fn test_one_day_logged_spreads_the_rest() {
        let budget = DailyBudget::new("270", "", "");
        let entries = entries_with(Weekday::Mon, Field::Carbs, "300");

        let weekly = weekly_budget(&budget);
        let result = aggregate(&entries);
        let left = remaining(&weekly, &result.totals);

        assert_eq!(weekly.carbs, 1890.0);
        assert_eq!(result.totals.carbs, 300.0);
        assert_eq!(left.carbs, 1590.0);
        assert_eq!(result.empty_days.carbs.len(), 6);
        assert_eq!(placeholder(Field::Carbs, &left, &result.empty_days), 265);
    }

    #[test]
    fn test_remaining_goes_negative_when_over_budget() {
        let budget = DailyBudget::new("10", "", "");
        let entries = entries_with(Weekday::Fri, Field::Carbs, "100");
        let result = aggregate(&entries);
        let left = remaining(&weekly_budget(&budget), &result.totals);

        assert_eq!(left.carbs, -30.0);
        assert_eq!(placeholder(Field::Carbs, &left, &result.empty_days), -5);
    }

    #[test]
    fn test_placeholder_is_zero_without_open_days() {
        let mut left = MacroTotals::default();
        left.carbs = 999.0;
        let empty_days = PerField::default();
        assert_eq!(placeholder(Field::Carbs, &left, &empty_days), 0);

        let mut full_week = WeeklyEntries::default();
        for day in WEEK {
            *full_week.day_mut(day) = DayEntry::new("1", "1", "1", "1");
        }
        let result = aggregate(&full_week);
        assert!(placeholders(&left, &result.empty_days) == PerField::default());
    }

    #[test]
    fn test_placeholder_rounds_half_away_from_zero() {
        let mut empty_days: PerField<Vec<Weekday>> = PerField::default();
        empty_days.fat = vec![Weekday::Mon, Weekday::Tue];

        let mut left = MacroTotals::default();
        left.fat = 5.0;
        assert_eq!(placeholder(Field::Fat, &left, &empty_days), 3);
        left.fat = -5.0;
        assert_eq!(placeholder(Field::Fat, &left, &empty_days), -3);
        left.fat = 4.0;
        assert_eq!(placeholder(Field::Fat, &left, &empty_days), 2);
    }

    #[test]
    fn test_is_unfilled_agrees_with_aggregate() {
        let day = DayEntry::new("0", "150", "abc", "-2");
        assert!(is_unfilled(&day, Field::Calories));
        assert!(!is_unfilled(&day, Field::Carbs));
        assert!(is_unfilled(&day, Field::Protein));
        assert!(is_unfilled(&day, Field::Fat));

        let mut entries = WeeklyEntries::default();
        *entries.day_mut(Weekday::Thu) = day.clone();
        let result = aggregate(&entries);
        for field in Field::ALL {
            assert_eq!(
                result.empty_days.get(field).contains(&Weekday::Thu),
                is_unfilled(&day, field),
                "{field} should agree"
            );
        }
    }

    #[test]
    fn test_zero_calories_day_is_still_logged() {
        let day = DayEntry::new("0", "200", "100", "50");
        assert!(is_unfilled(&day, Field::Calories));
        assert!(day.is_filled());
    }
}
