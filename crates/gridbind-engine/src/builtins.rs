//! Built-in expression constructors.
//!
//! Conventions:
//! - Aggregates (`sum`, `product`, `average`, `min`, `max`, `count`) flatten
//!   their arguments, so selections, nested expressions, and literals mix
//!   freely in one call.
//! - Numeric aggregates coerce each entry with [`as_number`]; non-numeric
//!   text counts as zero rather than erroring.
//! - `map` returns a sequence and is meant as an intermediate argument to an
//!   enclosing (flattening) expression, not as a directly bound formula.

use regex::Regex;

use crate::engine::{Arg, CellRead, Coordinate, Expression, Value, as_number, loose_eq};

/// Sum of all flattened arguments (identity 0).
pub fn sum(args: Vec<Arg>) -> Expression {
    Expression::flattening(args, |values| {
        Value::Number(values.iter().map(as_number).sum())
    })
}

/// Product of all flattened arguments (identity 1).
pub fn product(args: Vec<Arg>) -> Expression {
    Expression::flattening(args, |values| {
        Value::Number(values.iter().map(as_number).product())
    })
}

/// Arithmetic mean of all flattened arguments; 0 when there are none.
pub fn average(args: Vec<Arg>) -> Expression {
    Expression::flattening(args, |values| {
        if values.is_empty() {
            return Value::Number(0.0);
        }
        let total: f64 = values.iter().map(as_number).sum();
        Value::Number(total / values.len() as f64)
    })
}

/// Smallest coerced entry; absent result when there are none.
pub fn min(args: Vec<Arg>) -> Expression {
    Expression::flattening(args, |values| {
        values
            .iter()
            .map(as_number)
            .fold(None, |acc: Option<f64>, n| {
                Some(acc.map_or(n, |m| m.min(n)))
            })
            .map(Value::Number)
            .unwrap_or(Value::Absent)
    })
}

/// Largest coerced entry; absent result when there are none.
pub fn max(args: Vec<Arg>) -> Expression {
    Expression::flattening(args, |values| {
        values
            .iter()
            .map(as_number)
            .fold(None, |acc: Option<f64>, n| {
                Some(acc.map_or(n, |m| m.max(n)))
            })
            .map(Value::Number)
            .unwrap_or(Value::Absent)
    })
}

/// Count of present entries, without numeric coercion.
pub fn count(args: Vec<Arg>) -> Expression {
    Expression::flattening(args, |values| {
        Value::Number(values.iter().filter(|v| !v.is_absent()).count() as f64)
    })
}

/// A `count_if` condition: a regular expression matched against the
/// stringified entry, or a value compared with loose equality (so a textual
/// `"2"` matches a numeric cell holding 2).
pub enum Condition {
    Pattern(Regex),
    Value(Value),
}

impl Condition {
    fn matches(&self, item: &Value) -> bool {
        match self {
            Condition::Pattern(re) => re.is_match(&item.to_text()),
            Condition::Value(needle) => loose_eq(needle, item),
        }
    }
}

impl From<Value> for Condition {
    fn from(value: Value) -> Condition {
        Condition::Value(value)
    }
}

impl From<&str> for Condition {
    fn from(s: &str) -> Condition {
        Condition::Value(Value::Text(s.to_string()))
    }
}

impl From<f64> for Condition {
    fn from(n: f64) -> Condition {
        Condition::Value(Value::Number(n))
    }
}

impl From<Regex> for Condition {
    fn from(re: Regex) -> Condition {
        Condition::Pattern(re)
    }
}

/// Count the entries of `cells` matching `condition`.
pub fn count_if(cells: impl Into<Arg>, condition: impl Into<Condition>) -> Expression {
    let condition = condition.into();
    Expression::new(vec![cells.into()], move |values| {
        let haystack = match values.first() {
            Some(Value::List(items)) => items.as_slice(),
            Some(single) => std::slice::from_ref(single),
            None => &[],
        };
        Value::Number(
            haystack
                .iter()
                .filter(|item| condition.matches(item))
                .count() as f64,
        )
    })
}

/// Apply `handler` to every entry of `arg`, producing a sequence.
///
/// When `arg` is a selection the handler additionally receives the live
/// coordinate and read access to the model, in the selection's enumeration
/// order.
pub fn map(
    arg: impl Into<Arg>,
    handler: impl Fn(&Value, &dyn CellRead, Option<Coordinate>) -> Value + 'static,
) -> Expression {
    Expression::map(arg.into(), handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests_support::FixedCells;
    use crate::engine::{Selection, evaluate};

    #[test]
    fn test_sum_flattens_and_coerces() {
        let cells = FixedCells::of(&[
            ((0, 0), Value::Number(2.0)),
            ((0, 1), Value::Text("3".into())),
            ((0, 2), Value::Text("abc".into())),
        ]);
        let expr = sum(vec![Selection::range(0, 0, 0, 2).into(), 1.5.into()]);
        assert_eq!(evaluate(&cells, &expr), Value::Number(6.5));
    }

    #[test]
    fn test_sum_ignores_holes() {
        let cells = FixedCells::of(&[((0, 0), Value::Number(2.0))]);
        let expr = sum(vec![Selection::range(0, 0, 0, 5).into()]);
        assert_eq!(evaluate(&cells, &expr), Value::Number(2.0));
    }

    #[test]
    fn test_product_identity_and_fold() {
        let cells = FixedCells::of(&[
            ((1, 0), Value::Number(3.0)),
            ((1, 1), Value::Number(4.0)),
        ]);
        let expr = product(vec![Selection::range(1, 0, 1, 1).into()]);
        assert_eq!(evaluate(&cells, &expr), Value::Number(12.0));
        let none = product(vec![]);
        assert_eq!(evaluate(&cells, &none), Value::Number(1.0));
    }

    #[test]
    fn test_average_min_max_count() {
        let cells = FixedCells::of(&[
            ((0, 0), Value::Number(2.0)),
            ((0, 1), Value::Number(6.0)),
            ((0, 2), Value::Text("note".into())),
        ]);
        let sel = Selection::range(0, 0, 0, 1);
        assert_eq!(
            evaluate(&cells, &average(vec![sel.clone().into()])),
            Value::Number(4.0)
        );
        assert_eq!(
            evaluate(&cells, &min(vec![sel.clone().into()])),
            Value::Number(2.0)
        );
        assert_eq!(
            evaluate(&cells, &max(vec![sel.into()])),
            Value::Number(6.0)
        );
        assert_eq!(evaluate(&cells, &min(vec![])), Value::Absent);
        assert_eq!(
            evaluate(&cells, &count(vec![Selection::range(0, 0, 0, 5).into()])),
            Value::Number(3.0)
        );
    }

    #[test]
    fn test_count_if_loose_equality() {
        let cells = FixedCells::of(&[
            ((0, 0), Value::Text("a".into())),
            ((1, 0), Value::Text("b".into())),
            ((2, 0), Value::Text("a".into())),
        ]);
        let sel = Selection::list(vec![
            Coordinate::new(0, 0),
            Coordinate::new(1, 0),
            Coordinate::new(2, 0),
        ]);
        let expr = count_if(sel, "a");
        assert_eq!(evaluate(&cells, &expr), Value::Number(2.0));
    }

    #[test]
    fn test_count_if_pattern() {
        let cells = FixedCells::of(&[
            ((0, 0), Value::Text("apple".into())),
            ((0, 1), Value::Text("banana".into())),
            ((0, 2), Value::Text("avocado".into())),
        ]);
        let expr = count_if(
            Selection::range(0, 0, 0, 2),
            Regex::new("^a").unwrap(),
        );
        assert_eq!(evaluate(&cells, &expr), Value::Number(2.0));
    }

    #[test]
    fn test_count_if_numeric_text_cross_match() {
        let cells = FixedCells::of(&[
            ((0, 0), Value::Number(2.0)),
            ((0, 1), Value::Text("2".into())),
            ((0, 2), Value::Number(3.0)),
        ]);
        let expr = count_if(Selection::range(0, 0, 0, 2), 2.0);
        assert_eq!(evaluate(&cells, &expr), Value::Number(2.0));
    }

    #[test]
    fn test_map_over_range_preserves_order() {
        let cells = FixedCells::of(&[
            ((0, 0), Value::Number(2.0)),
            ((0, 1), Value::Number(3.0)),
        ]);
        let expr = map(Selection::range(0, 0, 0, 1), |v, _, _| {
            Value::Number(as_number(v) * 2.0)
        });
        assert_eq!(
            evaluate(&cells, &expr),
            Value::List(vec![Value::Number(4.0), Value::Number(6.0)])
        );
    }

    #[test]
    fn test_map_receives_live_coordinates() {
        let cells = FixedCells::of(&[((2, 1), Value::Number(5.0))]);
        let expr = map(Selection::point(2, 1), |v, reader, coord| {
            let coord = coord.expect("selection map sees coordinates");
            // The handler can read back through the model.
            assert_eq!(reader.read(coord), *v);
            Value::Number(coord.row as f64 + coord.col as f64)
        });
        assert_eq!(evaluate(&cells, &expr), Value::List(vec![Value::Number(3.0)]));
    }

    #[test]
    fn test_map_as_intermediate_argument() {
        let cells = FixedCells::of(&[
            ((0, 0), Value::Number(1.0)),
            ((0, 1), Value::Number(2.0)),
        ]);
        let doubled = map(Selection::range(0, 0, 0, 1), |v, _, _| {
            Value::Number(as_number(v) * 2.0)
        });
        let expr = sum(vec![doubled.into()]);
        assert_eq!(evaluate(&cells, &expr), Value::Number(6.0));
    }
}
