//! Raw cell values as handed over by the file decoder.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single raw cell value.
///
/// Decoders emit JSON-like scalars, so a cell is either a number, a string,
/// a boolean or an explicit null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Numeric reading of the value.
    ///
    /// Native numbers and strings that parse as a finite float both count.
    /// Booleans never do.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// String payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this value counts as missing.
    ///
    /// Nulls and blank strings are always missing. Strings equal to one of
    /// `null_tokens` (trimmed, ASCII case-insensitive) are missing as well.
    pub fn is_missing(&self, null_tokens: &[String]) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => {
                let trimmed = s.trim();
                trimmed.is_empty()
                    || null_tokens
                        .iter()
                        .any(|token| trimmed.eq_ignore_ascii_case(token.trim()))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_strings_parse() {
        assert_eq!(Value::from(" 42 ").as_f64(), Some(42.0));
        assert_eq!(Value::from("3.5").as_f64(), Some(3.5));
        assert_eq!(Value::from("1e3").as_f64(), Some(1000.0));
        assert_eq!(Value::from(7).as_f64(), Some(7.0));
    }

    #[test]
    fn test_non_numeric_values() {
        assert_eq!(Value::from("abc").as_f64(), None);
        assert_eq!(Value::from("").as_f64(), None);
        assert_eq!(Value::from("NaN").as_f64(), None);
        assert_eq!(Value::from("inf").as_f64(), None);
        assert_eq!(Value::Bool(true).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_missing_detection() {
        let tokens = vec!["NA".to_string()];
        assert!(Value::Null.is_missing(&[]));
        assert!(Value::from("   ").is_missing(&[]));
        assert!(!Value::from("na").is_missing(&[]));
        assert!(Value::from("na").is_missing(&tokens));
        assert!(!Value::from(0).is_missing(&tokens));
        assert!(!Value::Bool(false).is_missing(&tokens));
    }

    #[test]
    fn test_display_matches_source_text() {
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, true, 1.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Number(1.5),
                Value::String("x".to_string()),
            ]
        );
    }
}
