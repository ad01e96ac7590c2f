//! Model operations: the value store, change dispatch, and bindings.

use std::rc::Rc;

use gridbind_engine::engine::{Coordinate, Expression, Value, evaluate};

use super::bus::CellEntry;
use super::state::TableModel;
use crate::host::HostAdapter;

/// Deferred work for one registry entry, decided while the registry is
/// borrowed and executed after the borrow ends.
enum Action {
    Rebind(Coordinate, Rc<Expression>),
    Notify(Rc<Expression>),
}

impl<H: HostAdapter> TableModel<H> {
    /// Current resolved value of the cell; absent cells are not an error.
    ///
    /// With caching enabled the host is consulted once per cell until the
    /// next write; with it disabled every call re-reads the host.
    pub fn get(&self, coord: impl Into<Coordinate>) -> Value {
        let coord = coord.into();
        if self.options.caching_enabled {
            if let Some(cached) = self.cache.get(&coord) {
                return cached.clone();
            }
        }
        let Some(handle) = self.host.find_cell(coord.row, coord.col) else {
            return Value::Absent;
        };
        let value = match self.host.read_raw(&handle) {
            Some(raw) => self.options.value_parser.parse(&raw),
            None => Value::Absent,
        };
        if self.options.caching_enabled {
            self.cache.insert(coord, value.clone());
        }
        value
    }

    /// Write a literal value. Returns whether the value actually changed;
    /// an unchanged write is a no-op and triggers no propagation.
    ///
    /// Propagation is depth-first: every binding reacting to this change,
    /// and every cascade those bindings trigger, completes before this call
    /// returns.
    pub fn set(&mut self, coord: impl Into<Coordinate>, value: impl Into<Value>) -> bool {
        let coord = coord.into();
        let value = value.into();
        // Snapshot before any write so a reentrant cascade never compares
        // against a partially-updated cache.
        let old = self.get(coord);
        if value == old {
            return false;
        }
        if let Some(handle) = self.host.find_cell(coord.row, coord.col) {
            self.host.write_raw(&handle, &value);
            if self.options.caching_enabled {
                self.cache.insert(coord, value.clone());
            }
        }
        // Missing cells store nothing, but the change is still announced.
        self.emit_change(coord, &value);
        true
    }

    /// Bind a formula to a target cell: evaluate it now, and re-evaluate
    /// whenever any cell in its source selection changes. Returns whether
    /// the initial evaluation changed the target.
    ///
    /// The binding graph must stay acyclic. The model performs no cycle
    /// detection; a formula whose source selection (directly or through
    /// other bindings) includes its own target re-evaluates itself
    /// unboundedly and exhausts the stack.
    pub fn bind(&mut self, target: impl Into<Coordinate>, expression: Expression) -> bool {
        let target = target.into();
        let expr = Rc::new(expression);
        self.cell_entries.push(CellEntry::Binding {
            target,
            expr: Rc::clone(&expr),
        });
        let initial = evaluate(&*self, &expr);
        self.set(target, initial)
    }

    /// Watch an expression: whenever any cell in its source selection
    /// changes, re-evaluate and hand the value to `handler`. No cell is
    /// written, and no initial call is made.
    pub fn listen(&mut self, expression: Expression, handler: impl FnMut(&Value) + 'static) {
        self.cell_entries.push(CellEntry::Watch {
            expr: Rc::new(expression),
            handler: Box::new(handler),
        });
    }

    pub fn on_cell_change(&mut self, handler: impl FnMut(usize, usize, &Value) + 'static) {
        self.cell_entries.push(CellEntry::Callback(Box::new(handler)));
    }

    pub fn on_row_change(&mut self, handler: impl FnMut(usize) + 'static) {
        self.row_listeners.push(Box::new(handler));
    }

    pub fn on_column_change(&mut self, handler: impl FnMut(usize) + 'static) {
        self.column_listeners.push(Box::new(handler));
    }

    /// Report an edit the host applied itself (the user typed into a
    /// cell). The host already holds the new raw text, so nothing is
    /// written back; the edit otherwise propagates exactly like `set`.
    ///
    /// Only the cache can witness the pre-edit value. With caching
    /// disabled the old value is unknowable and the edit always
    /// propagates.
    pub fn notify_external_edit(&mut self, row: usize, col: usize, raw: &str) -> bool {
        let coord = Coordinate::new(row, col);
        let value = self.options.value_parser.parse(raw);
        if self.options.caching_enabled {
            let old = self.cache.get(&coord).map(|cached| cached.clone());
            if old.as_ref() == Some(&value) {
                return false;
            }
            self.cache.insert(coord, value.clone());
        }
        self.emit_change(coord, &value);
        true
    }

    /// Dispatch one committed change: cell entries first (callbacks,
    /// bindings, and watchers in registration order), then row listeners,
    /// then column listeners. No de-duplication: every binding whose source
    /// includes the changed cell re-evaluates and independently re-checks
    /// whether its own value changed.
    ///
    /// Registry lengths are snapshotted at entry; entries appended during a
    /// dispatch run from the next change on.
    fn emit_change(&mut self, coord: Coordinate, value: &Value) {
        let cell_count = self.cell_entries.len();
        for index in 0..cell_count {
            let action = match &mut self.cell_entries[index] {
                CellEntry::Callback(callback) => {
                    callback(coord.row, coord.col, value);
                    None
                }
                CellEntry::Binding { target, expr } => expr
                    .source()
                    .includes(coord)
                    .then(|| Action::Rebind(*target, Rc::clone(expr))),
                CellEntry::Watch { expr, .. } => expr
                    .source()
                    .includes(coord)
                    .then(|| Action::Notify(Rc::clone(expr))),
            };
            match action {
                Some(Action::Rebind(target, expr)) => {
                    let recomputed = evaluate(&*self, &expr);
                    // `set` re-checks for an actual change and cascades.
                    self.set(target, recomputed);
                }
                Some(Action::Notify(expr)) => {
                    let recomputed = evaluate(&*self, &expr);
                    if let CellEntry::Watch { handler, .. } = &mut self.cell_entries[index] {
                        handler(&recomputed);
                    }
                }
                None => {}
            }
        }

        let row_count = self.row_listeners.len();
        for index in 0..row_count {
            (self.row_listeners[index])(coord.row);
        }
        let column_count = self.column_listeners.len();
        for index in 0..column_count {
            (self.column_listeners[index])(coord.col);
        }
    }
}
