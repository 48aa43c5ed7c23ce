pub mod budget;
pub mod field;
pub mod week;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a stored numeric field as text.
///
/// Strings are kept verbatim, numbers are converted to their textual form and
/// anything else (null, bools, nested values) becomes the empty string.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
