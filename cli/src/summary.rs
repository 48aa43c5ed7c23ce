use chrono::Weekday;
use macrobudget_core::{weekday_name, DaySummary, Field, WeeklySummary};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

// Helper struct for Table Row
#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Calories")]
    calories: String,
    #[tabled(rename = "Carbs (g)")]
    carbs: String,
    #[tabled(rename = "Protein (g)")]
    protein: String,
    #[tabled(rename = "Fat (g)")]
    fat: String,
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Calories")]
    calories: String,
    #[tabled(rename = "Carbs (g)")]
    carbs: String,
    #[tabled(rename = "Protein (g)")]
    protein: String,
    #[tabled(rename = "Fat (g)")]
    fat: String,
}

/// Logged value, or the suggested amount in brackets for an empty cell.
fn cell(day: &DaySummary, field: Field) -> String {
    match day.hints.get(field) {
        Some(hint) => format!("({})", hint),
        None => day.entry.get(field).to_string(),
    }
}

fn day_row(day: &DaySummary) -> DayRow {
    DayRow {
        day: weekday_name(day.day).to_string(),
        calories: cell(day, Field::Calories),
        carbs: cell(day, Field::Carbs),
        protein: cell(day, Field::Protein),
        fat: cell(day, Field::Fat),
    }
}

fn budget_row(label: &str, values: impl Fn(Field) -> f64) -> BudgetRow {
    let fmt = |field: Field| format!("{}", values(field).round() as i64);
    BudgetRow {
        label: label.to_string(),
        calories: fmt(Field::Calories),
        carbs: fmt(Field::Carbs),
        protein: fmt(Field::Protein),
        fat: fmt(Field::Fat),
    }
}

fn budget_rows(summary: &WeeklySummary) -> Vec<BudgetRow> {
    vec![
        budget_row("Daily budget", |f| *summary.daily_budget.get(f)),
        budget_row("Weekly budget", |f| *summary.weekly_budget.get(f)),
        budget_row("Logged", |f| *summary.totals.get(f)),
        budget_row("Remaining", |f| *summary.remaining.get(f)),
    ]
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    table.to_string()
}

pub fn print_budget(summary: &WeeklySummary) {
    let rows = budget_rows(summary).into_iter().take(2).collect();
    println!("{}", render::<BudgetRow>(rows));
}

pub fn print_week(summary: &WeeklySummary) {
    let rows: Vec<DayRow> = summary.days.iter().map(day_row).collect();
    println!("{}", render(rows));
    println!("Values in (brackets) are suggestions to stay on budget.\n");
    println!("{}", render(budget_rows(summary)));

    for field in Field::ALL {
        if summary.is_over_budget(field) {
            println!(
                "\x1b[1;31mOver the weekly {} budget by {}{}\x1b[0m",
                field,
                (-summary.remaining.get(field)).round() as i64,
                field.unit()
            );
        }
    }
}

pub fn print_day(summary: &WeeklySummary, day: Weekday) {
    if let Some(day) = summary.day(day) {
        println!("{}", render(vec![day_row(day)]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrobudget_core::{DailyBudget, WeeklyEntries};

    #[test]
    fn test_empty_cells_show_suggestions() {
        let budget = DailyBudget::new("270", "110", "65");
        let mut entries = WeeklyEntries::default();
        entries.day_mut(Weekday::Mon).carbs = "300".to_string();
        let summary = WeeklySummary::build(&budget, &entries);

        let monday = day_row(summary.day(Weekday::Mon).unwrap());
        assert_eq!(monday.carbs, "300");
        assert_eq!(monday.calories, "(2105)");

        let tuesday = day_row(summary.day(Weekday::Tue).unwrap());
        assert_eq!(tuesday.carbs, "(265)");
    }

    #[test]
    fn test_budget_rows() {
        let budget = DailyBudget::new("270", "110", "65");
        let summary = WeeklySummary::build(&budget, &WeeklyEntries::default());
        let rows = budget_rows(&summary);
        assert_eq!(rows[0].calories, "2105");
        assert_eq!(rows[1].calories, "14735");
        assert_eq!(rows[3].fat, "455");
    }
}
