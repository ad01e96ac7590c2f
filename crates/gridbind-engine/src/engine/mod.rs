//! Reactive grid engine API.
//!
//! Pure, host-agnostic pieces of the model:
//!
//! - [`Coordinate`] - cell addressing
//! - [`Value`], [`as_number`], [`loose_eq`] - dynamically-typed cell values
//! - [`Selection`] - immutable, composable coordinate sets
//! - [`Expression`], [`Arg`] - formula trees with derived dependency sources
//! - [`CellRead`], [`evaluate`] - resolution of expressions to values

mod coord;
mod eval;
mod expr;
mod selection;
mod value;

pub use coord::Coordinate;
pub use eval::{CellRead, evaluate};
pub use expr::{Apply, Arg, Expression, MapFn, Reducer};
pub use selection::{Selection, SelectionError};
pub use value::{Value, as_number, format_number, loose_eq};
