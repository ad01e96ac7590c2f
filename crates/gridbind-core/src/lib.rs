//! gridbind-core - reactive grid model over a host adapter.
//!
//! Binds addressable cells to literal values or formulas and propagates
//! recalculation when source cells change. The embedding supplies raw cell
//! access through a [`HostAdapter`]; the pure selection/expression layer
//! comes from `gridbind-engine` and is re-exported here.

pub mod host;
pub mod model;

pub use host::{HostAdapter, MemoryHost};
pub use model::{ModelOptions, TableModel, ValueCache, ValueParser};

pub use gridbind_engine::{builtins, engine};
pub use gridbind_engine::engine::{
    Arg, CellRead, Coordinate, Expression, Selection, SelectionError, Value, as_number, evaluate,
    loose_eq,
};
