//! Change-bus registry types.
//!
//! Three independent append-only registries, dispatched synchronously in
//! registration order on every committed change: cell entries first, then
//! row listeners, then column listeners. Bindings and watchers share the
//! cell registry with plain callbacks so that their relative registration
//! order is honored during dispatch.

use std::rc::Rc;

use gridbind_engine::engine::{Coordinate, Expression, Value};

/// Plain cell-change callback: `(row, col, new value)`.
pub type CellCallback = Box<dyn FnMut(usize, usize, &Value)>;

/// Row- or column-change callback.
pub type AxisCallback = Box<dyn FnMut(usize)>;

/// Watcher callback, handed the watched expression's recomputed value.
pub type WatchHandler = Box<dyn FnMut(&Value)>;

/// One entry in the cell-change registry.
pub enum CellEntry {
    /// Host-facing callback.
    Callback(CellCallback),
    /// A bound formula: re-evaluate and write to `target` when the changed
    /// cell is inside the expression's source selection.
    Binding {
        target: Coordinate,
        expr: Rc<Expression>,
    },
    /// A read-only binding: re-evaluate and hand the value to the handler
    /// without writing any cell.
    Watch {
        expr: Rc<Expression>,
        handler: WatchHandler,
    },
}
