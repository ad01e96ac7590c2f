//! Expression trees with automatic dependency inference.
//!
//! An [`Expression`] is a formula node: ordered arguments (literals, cell
//! selections, or nested expressions), an apply step, and a `flatten` flag
//! controlling whether sequence-valued arguments are spliced into the
//! reducer input. The selection of every cell the expression transitively
//! reads is derived once at construction and never changes; it is what
//! decides which changes trigger re-evaluation.

use std::fmt;

use super::coord::Coordinate;
use super::eval::CellRead;
use super::selection::Selection;
use super::value::Value;

/// One expression argument.
pub enum Arg {
    Literal(Value),
    Cells(Selection),
    Expr(Expression),
}

impl From<Value> for Arg {
    fn from(value: Value) -> Arg {
        Arg::Literal(value)
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Arg {
        Arg::Literal(Value::Number(n))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Arg {
        Arg::Literal(Value::Text(s.to_string()))
    }
}

impl From<Selection> for Arg {
    fn from(selection: Selection) -> Arg {
        Arg::Cells(selection)
    }
}

impl From<Coordinate> for Arg {
    fn from(coord: Coordinate) -> Arg {
        Arg::Cells(Selection::Point(coord))
    }
}

impl From<Expression> for Arg {
    fn from(expr: Expression) -> Arg {
        Arg::Expr(expr)
    }
}

/// Folds the resolved argument list into one value.
pub type Reducer = Box<dyn Fn(&[Value]) -> Value>;

/// Per-item map handler. When the mapped argument is a selection the
/// handler receives the live coordinate and read access to the model;
/// otherwise the coordinate is `None`.
pub type MapFn = Box<dyn Fn(&Value, &dyn CellRead, Option<Coordinate>) -> Value>;

/// How an expression turns resolved arguments into its result.
pub enum Apply {
    Reduce(Reducer),
    MapCells(MapFn),
}

/// A formula node.
pub struct Expression {
    args: Vec<Arg>,
    apply: Apply,
    flatten: bool,
    source: Selection,
}

impl Expression {
    /// Expression whose reducer sees sequence-valued arguments nested.
    pub fn new(args: Vec<Arg>, reducer: impl Fn(&[Value]) -> Value + 'static) -> Expression {
        Expression::build(args, Apply::Reduce(Box::new(reducer)), false)
    }

    /// Expression whose reducer sees sequence-valued arguments spliced in.
    pub fn flattening(
        args: Vec<Arg>,
        reducer: impl Fn(&[Value]) -> Value + 'static,
    ) -> Expression {
        Expression::build(args, Apply::Reduce(Box::new(reducer)), true)
    }

    /// Map expression over one argument; see [`MapFn`].
    pub fn map(
        arg: Arg,
        handler: impl Fn(&Value, &dyn CellRead, Option<Coordinate>) -> Value + 'static,
    ) -> Expression {
        Expression::build(vec![arg], Apply::MapCells(Box::new(handler)), false)
    }

    fn build(args: Vec<Arg>, apply: Apply, flatten: bool) -> Expression {
        let source = derive_source(&args);
        Expression {
            args,
            apply,
            flatten,
            source,
        }
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn apply(&self) -> &Apply {
        &self.apply
    }

    pub fn flatten(&self) -> bool {
        self.flatten
    }

    /// Every cell this expression transitively depends on. An expression
    /// with no selection-typed arguments has an empty source and never
    /// re-evaluates automatically once bound.
    pub fn source(&self) -> &Selection {
        &self.source
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("args", &self.args.len())
            .field("flatten", &self.flatten)
            .field("source", &self.source)
            .finish()
    }
}

/// Union of every selection argument plus every sub-expression's source.
fn derive_source(args: &[Arg]) -> Selection {
    let mut members = Vec::new();
    for arg in args {
        match arg {
            Arg::Cells(sel) => members.push(sel.clone()),
            Arg::Expr(expr) => members.push(expr.source.clone()),
            Arg::Literal(_) => {}
        }
    }
    Selection::union(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_only_expression_has_empty_source() {
        let expr = Expression::new(vec![1.0.into(), 2.0.into()], |_| Value::Absent);
        assert!(expr.source().is_empty());
    }

    #[test]
    fn test_source_is_transitive_union() {
        let inner = Expression::new(vec![Selection::point(3, 3).into()], |_| Value::Absent);
        let outer = Expression::new(
            vec![Selection::range(0, 0, 0, 1).into(), inner.into(), 7.0.into()],
            |_| Value::Absent,
        );
        let source = outer.source();
        assert!(source.includes(Coordinate::new(0, 0)));
        assert!(source.includes(Coordinate::new(0, 1)));
        assert!(source.includes(Coordinate::new(3, 3)));
        assert!(!source.includes(Coordinate::new(1, 0)));
    }

    #[test]
    fn test_source_membership_is_order_independent() {
        let a = Selection::point(0, 0);
        let b = Selection::range(1, 0, 1, 1);
        let forward = Expression::new(vec![a.clone().into(), b.clone().into()], |_| Value::Absent);
        let reverse = Expression::new(vec![b.into(), a.into()], |_| Value::Absent);
        for coord in [
            Coordinate::new(0, 0),
            Coordinate::new(1, 0),
            Coordinate::new(1, 1),
            Coordinate::new(2, 2),
        ] {
            assert_eq!(forward.source().includes(coord), reverse.source().includes(coord));
        }
    }

    #[test]
    fn test_single_selection_source_is_not_wrapped() {
        let expr = Expression::new(vec![Selection::range(0, 0, 2, 2).into()], |_| Value::Absent);
        assert_eq!(*expr.source(), Selection::range(0, 0, 2, 2));
    }
}
