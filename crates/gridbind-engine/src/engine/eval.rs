//! Expression evaluation against a cell reader.
//!
//! Evaluation is total: missing cells flow through as holes (skipped when a
//! selection is aggregated), never as errors. Recursion depth follows the
//! expression tree, which is finite by construction; the unbounded-recursion
//! hazard lives in the binding layer, not here.

use super::coord::Coordinate;
use super::expr::{Apply, Arg, Expression};
use super::value::Value;

/// Read access to current cell values. Implemented by the model; small
/// enough to keep the evaluator object-safe and host-agnostic.
pub trait CellRead {
    /// Current value at `coord`; `Value::Absent` when no such cell exists.
    fn read(&self, coord: Coordinate) -> Value;
}

/// Resolve an expression to a concrete value given current cell contents.
pub fn evaluate(reader: &dyn CellRead, expr: &Expression) -> Value {
    match expr.apply() {
        Apply::Reduce(reducer) => {
            let mut values = Vec::with_capacity(expr.args().len());
            for arg in expr.args() {
                let resolved = resolve(reader, arg);
                if expr.flatten() {
                    if let Value::List(items) = resolved {
                        values.extend(items);
                        continue;
                    }
                }
                values.push(resolved);
            }
            reducer(&values)
        }
        Apply::MapCells(handler) => map_cells(reader, expr, handler),
    }
}

fn resolve(reader: &dyn CellRead, arg: &Arg) -> Value {
    match arg {
        Arg::Literal(value) => value.clone(),
        Arg::Cells(selection) => Value::List(
            selection
                .all()
                .into_iter()
                .map(|coord| reader.read(coord))
                .filter(|value| !value.is_absent())
                .collect(),
        ),
        Arg::Expr(expr) => evaluate(reader, expr),
    }
}

/// Map expressions invoke their handler per item. Over a selection the
/// handler sees each live coordinate (absent cells included, since it can
/// decide what a hole means); over anything else it sees resolved items.
fn map_cells(
    reader: &dyn CellRead,
    expr: &Expression,
    handler: &super::expr::MapFn,
) -> Value {
    let Some(arg) = expr.args().first() else {
        return Value::List(Vec::new());
    };
    match arg {
        Arg::Cells(selection) => Value::List(
            selection
                .all()
                .into_iter()
                .map(|coord| handler(&reader.read(coord), reader, Some(coord)))
                .collect(),
        ),
        other => match resolve(reader, other) {
            Value::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| handler(item, reader, None))
                    .collect(),
            ),
            single => Value::List(vec![handler(&single, reader, None)]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::selection::Selection;
    use crate::engine::tests_support::FixedCells;

    #[test]
    fn test_selection_argument_resolves_in_order_skipping_holes() {
        let cells = FixedCells::of(&[
            ((0, 0), Value::Number(1.0)),
            ((0, 2), Value::Number(3.0)),
        ]);
        let expr = Expression::new(vec![Selection::range(0, 0, 0, 2).into()], |values| {
            values[0].clone()
        });
        // (0,1) does not exist and is skipped, not substituted.
        assert_eq!(
            evaluate(&cells, &expr),
            Value::List(vec![Value::Number(1.0), Value::Number(3.0)])
        );
    }

    #[test]
    fn test_flatten_splices_sequences() {
        let cells = FixedCells::of(&[((1, 0), Value::Number(4.0))]);
        let expr = Expression::flattening(
            vec![Selection::point(1, 0).into(), 9.0.into()],
            |values| Value::Number(values.len() as f64),
        );
        // The selection's one-element sequence splices next to the literal.
        assert_eq!(evaluate(&cells, &expr), Value::Number(2.0));
    }

    #[test]
    fn test_nested_expressions_evaluate_recursively() {
        let cells = FixedCells::of(&[((0, 0), Value::Number(2.0))]);
        let inner = Expression::flattening(vec![Selection::point(0, 0).into()], |values| {
            Value::Number(crate::engine::value::as_number(&values[0]) + 1.0)
        });
        let outer = Expression::new(vec![inner.into()], |values| values[0].clone());
        assert_eq!(evaluate(&cells, &outer), Value::Number(3.0));
    }
}
