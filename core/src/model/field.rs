use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four numeric fields tracked per day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Calories,
    Carbs,
    Protein,
    Fat,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Calories, Field::Carbs, Field::Protein, Field::Fat];

    /// The macros a daily budget is entered in. Calories are derived from these.
    pub const MACROS: [Field; 3] = [Field::Carbs, Field::Protein, Field::Fat];

    pub fn name(self) -> &'static str {
        match self {
            Field::Calories => "calories",
            Field::Carbs => "carbs",
            Field::Protein => "protein",
            Field::Fat => "fat",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Calories => "Calories",
            Field::Carbs => "Carbs",
            Field::Protein => "Protein",
            Field::Fat => "Fat",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::Calories => "kcal",
            _ => "g",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per [`Field`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PerField<T> {
    pub calories: T,
    pub carbs: T,
    pub protein: T,
    pub fat: T,
}

impl<T> PerField<T> {
    pub fn from_fn(mut f: impl FnMut(Field) -> T) -> Self {
        Self {
            calories: f(Field::Calories),
            carbs: f(Field::Carbs),
            protein: f(Field::Protein),
            fat: f(Field::Fat),
        }
    }

    pub fn get(&self, field: Field) -> &T {
        match field {
            Field::Calories => &self.calories,
            Field::Carbs => &self.carbs,
            Field::Protein => &self.protein,
            Field::Fat => &self.fat,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut T {
        match field {
            Field::Calories => &mut self.calories,
            Field::Carbs => &mut self.carbs,
            Field::Protein => &mut self.protein,
            Field::Fat => &mut self.fat,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Field, &T) -> U) -> PerField<U> {
        PerField::from_fn(|field| f(field, self.get(field)))
    }
}

/// Calorie and macro quantities for a day or a week.
pub type MacroTotals = PerField<f64>;
