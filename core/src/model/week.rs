use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::model::field::Field;
use crate::model::lenient_text;
use crate::service::budget_engine::is_filled;

/// Iteration order for everything weekly: Monday first, regardless of the calendar.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// What the user logged for one weekday. Every field is entered directly.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DayEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub calories: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub carbs: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub protein: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fat: String,
}

impl DayEntry {
    pub fn new(calories: &str, carbs: &str, protein: &str, fat: &str) -> Self {
        Self {
            calories: calories.to_string(),
            carbs: carbs.to_string(),
            protein: protein.to_string(),
            fat: fat.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Calories => &self.calories,
            Field::Carbs => &self.carbs,
            Field::Protein => &self.protein,
            Field::Fat => &self.fat,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Calories => &mut self.calories,
            Field::Carbs => &mut self.carbs,
            Field::Protein => &mut self.protein,
            Field::Fat => &mut self.fat,
        }
    }

    /// A day counts as logged once any of its four fields holds a positive number.
    pub fn is_filled(&self) -> bool {
        Field::ALL.iter().any(|field| is_filled(self.get(*field)))
    }
}

/// Exactly one [`DayEntry`] per weekday. Missing keys in stored data load as empty days.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WeeklyEntries {
    #[serde(rename = "Monday")]
    monday: DayEntry,
    #[serde(rename = "Tuesday")]
    tuesday: DayEntry,
    #[serde(rename = "Wednesday")]
    wednesday: DayEntry,
    #[serde(rename = "Thursday")]
    thursday: DayEntry,
    #[serde(rename = "Friday")]
    friday: DayEntry,
    #[serde(rename = "Saturday")]
    saturday: DayEntry,
    #[serde(rename = "Sunday")]
    sunday: DayEntry,
}

impl WeeklyEntries {
    pub fn day(&self, day: Weekday) -> &DayEntry {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DayEntry {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Days in [`WEEK`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayEntry)> + '_ {
        WEEK.iter().map(move |day| (*day, self.day(*day)))
    }
}
