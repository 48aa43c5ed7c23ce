use thiserror::Error;

/// Reasons an edit is refused. The edited value is left untouched in every case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("'{0}' is not a whole number (digits only, no sign or decimal point)")]
    Rejected(String),
    #[error("daily calories are derived from carbs, protein and fat and cannot be set directly")]
    DerivedField,
    #[error("unknown day: '{0}'")]
    UnknownDay(String),
}
