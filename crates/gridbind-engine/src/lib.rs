//! gridbind-engine - selections, expressions, and evaluation.
//!
//! The pure half of the reactive grid model: everything here is
//! side-effect-free and host-agnostic. Stateful concerns (the value store,
//! change propagation, host adapters) live in `gridbind-core`.

pub mod builtins;
pub mod engine;

pub use engine::{
    Arg, CellRead, Coordinate, Expression, Selection, SelectionError, Value, as_number, evaluate,
    loose_eq,
};
