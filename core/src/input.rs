use anyhow::{anyhow, Result};

use crate::error::TrackerError;
use crate::model::field::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputVerdict {
    Accept,
    Reject,
}

/// Gate applied to every numeric field before it is changed.
///
/// Accepts the empty string (clears the field) or one or more ASCII digits.
/// Signs, decimal points, exponents, whitespace and letters are rejected.
pub fn accept_input(raw: &str) -> InputVerdict {
    if raw.chars().all(|c| c.is_ascii_digit()) {
        InputVerdict::Accept
    } else {
        InputVerdict::Reject
    }
}

pub fn validate_input(raw: &str) -> Result<(), TrackerError> {
    match accept_input(raw) {
        InputVerdict::Accept => Ok(()),
        InputVerdict::Reject => Err(TrackerError::Rejected(raw.to_string())),
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Resolves a field name or unique prefix (`cal`, `carb`, `pro`, `f`).
pub fn parse_field(input: &str) -> Result<Field> {
    let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
    let key = input.trim().to_lowercase();
    let name = expand_key(&key, &names)?;
    Field::ALL
        .into_iter()
        .find(|f| f.name() == name)
        .ok_or_else(|| anyhow!("Unknown field: '{}'", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_digits_and_empty() {
        assert_eq!(accept_input(""), InputVerdict::Accept);
        assert_eq!(accept_input("0"), InputVerdict::Accept);
        assert_eq!(accept_input("270"), InputVerdict::Accept);
        assert_eq!(accept_input("007"), InputVerdict::Accept);
    }

    #[test]
    fn test_rejects_anything_else() {
        for raw in ["12.5", "-3", "+3", "1e3", "abc", " 12", "12 ", "١٢", "1,000"] {
            assert_eq!(accept_input(raw), InputVerdict::Reject, "{raw:?}");
        }
        assert_eq!(
            validate_input("12.5"),
            Err(TrackerError::Rejected("12.5".to_string()))
        );
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["calories", "carbs", "protein", "fat"];

        assert_eq!(expand_key("fat", &candidates).unwrap(), "fat");
        assert_eq!(expand_key("f", &candidates).unwrap(), "fat");
        assert_eq!(expand_key("car", &candidates).unwrap(), "carbs");

        // Ambiguous
        assert!(expand_key("ca", &candidates).is_err());

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("cal").unwrap(), Field::Calories);
        assert_eq!(parse_field("Carbs").unwrap(), Field::Carbs);
        assert_eq!(parse_field("pro").unwrap(), Field::Protein);
        assert!(parse_field("c").is_err());
        assert!(parse_field("sugar").is_err());
    }
}
