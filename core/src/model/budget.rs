use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::field::Field;
use crate::model::lenient_text;
use crate::service::budget_engine::{derive_calories, parse_quantity};

/// Current on-disk layout of the daily budget record.
pub const BUDGET_SCHEMA_VERSION: u32 = 2;

/// The user's daily macro target. Calories are never stored, see [`DailyBudget::calories`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyBudget {
    pub carbs: String,
    pub protein: String,
    pub fat: String,
}

impl DailyBudget {
    pub fn new(carbs: &str, protein: &str, fat: &str) -> Self {
        Self {
            carbs: carbs.to_string(),
            protein: protein.to_string(),
            fat: fat.to_string(),
        }
    }

    /// Raw text of a macro field. `None` for calories, which have no stored text.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Calories => None,
            Field::Carbs => Some(&self.carbs),
            Field::Protein => Some(&self.protein),
            Field::Fat => Some(&self.fat),
        }
    }

    pub fn get_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Calories => None,
            Field::Carbs => Some(&mut self.carbs),
            Field::Protein => Some(&mut self.protein),
            Field::Fat => Some(&mut self.fat),
        }
    }

    pub fn calories(&self) -> f64 {
        derive_calories(
            parse_quantity(&self.carbs),
            parse_quantity(&self.protein),
            parse_quantity(&self.fat),
        )
    }

    /// Numeric value of any field, calories included.
    pub fn quantity(&self, field: Field) -> f64 {
        match self.get(field) {
            Some(text) => parse_quantity(text),
            None => self.calories(),
        }
    }
}

fn legacy_version() -> u32 {
    1
}

/// Persisted form of [`DailyBudget`].
///
/// Version 1 records have no `version` key and may carry an editable
/// `calories` value; both are dropped by [`BudgetRecord::into_budget`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BudgetRecord {
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    pub carbs: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub protein: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fat: String,
    #[serde(default, skip_serializing)]
    pub calories: Option<Value>,
}

impl BudgetRecord {
    pub fn is_legacy(&self) -> bool {
        self.version < BUDGET_SCHEMA_VERSION || self.calories.is_some()
    }

    pub fn into_budget(self) -> DailyBudget {
        DailyBudget {
            carbs: self.carbs,
            protein: self.protein,
            fat: self.fat,
        }
    }
}

impl From<&DailyBudget> for BudgetRecord {
    fn from(budget: &DailyBudget) -> Self {
        Self {
            version: BUDGET_SCHEMA_VERSION,
            carbs: budget.carbs.clone(),
            protein: budget.protein.clone(),
            fat: budget.fat.clone(),
            calories: None,
        }
    }
}
