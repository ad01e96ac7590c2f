//! Cell values and numeric coercion.
//!
//! Cells hold dynamically-typed scalars. [`Value::List`] only ever appears
//! as an evaluation result (a selection read or a `map` output); hosts store
//! scalars.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell value or evaluation result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The cell does not exist (or holds nothing readable).
    Absent,
    Number(f64),
    Text(String),
    /// An ordered sequence produced by evaluation; never host-stored.
    List(Vec<Value>),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Render the value as the text a host would store or display.
    pub fn to_text(&self) -> String {
        match self {
            Value::Absent => String::new(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Coerce a value to a number for arithmetic folds.
///
/// Text must parse as a float in its entirety (modulo surrounding
/// whitespace) or it coerces to `0.0`. Partial numeric prefixes such as
/// `"3.5abc"` therefore coerce to zero, as do absent cells and sequences.
pub fn as_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Absent | Value::List(_) => 0.0,
    }
}

/// Loose equality across the number/text divide.
///
/// `Text("2")` equals `Number(2.0)`; everything else requires matching
/// variants. Used by `count_if` conditions.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n), Value::Text(s)) | (Value::Text(s), Value::Number(n)) => {
            s.trim().parse::<f64>().map(|p| p == *n).unwrap_or(false)
        }
        _ => a == b,
    }
}

/// Format a number the way cells display it: integral values without a
/// fractional part, everything else via the shortest float form.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_parses_floats() {
        assert_eq!(as_number(&Value::Text("3.5".into())), 3.5);
        assert_eq!(as_number(&Value::Text(" 42 ".into())), 42.0);
        assert_eq!(as_number(&Value::Number(3.0)), 3.0);
    }

    #[test]
    fn test_as_number_falls_back_to_zero() {
        assert_eq!(as_number(&Value::Text("abc".into())), 0.0);
        assert_eq!(as_number(&Value::Text("3.5abc".into())), 0.0);
        assert_eq!(as_number(&Value::Text("".into())), 0.0);
        assert_eq!(as_number(&Value::Absent), 0.0);
    }

    #[test]
    fn test_loose_eq_across_types() {
        assert!(loose_eq(&Value::Text("2".into()), &Value::Number(2.0)));
        assert!(loose_eq(&Value::Number(2.0), &Value::Text("2".into())));
        assert!(!loose_eq(&Value::Text("abc".into()), &Value::Number(0.0)));
        assert!(loose_eq(&Value::Text("a".into()), &Value::Text("a".into())));
        assert!(!loose_eq(&Value::Absent, &Value::Text("".into())));
    }

    #[test]
    fn test_format_number_drops_integral_fraction() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(3.5), "3.5");
    }
}
