//! Model state: host, options, cache, listener registries.

use dashmap::DashMap;

use gridbind_engine::engine::{CellRead, Coordinate, Value};

use super::bus::{AxisCallback, CellEntry};
use super::options::ModelOptions;
use crate::host::HostAdapter;

/// Sparse cache of resolved values, keyed by coordinate. Interior
/// mutability lets `get(&self)` populate it on the read path.
pub type ValueCache = DashMap<Coordinate, Value>;

/// The reactive grid model: a value store over a host adapter plus the
/// change bus that drives formula re-evaluation.
///
/// Single-threaded and synchronous: propagation runs depth-first on the
/// caller's stack, and a `set` returns only after every cascade it
/// triggered has completed. Keeping the binding graph acyclic is a caller
/// obligation; a formula whose source selection reaches its own target cell
/// recurses without bound (see [`TableModel::bind`]).
pub struct TableModel<H: HostAdapter> {
    pub(crate) host: H,
    pub(crate) options: ModelOptions,
    pub(crate) cache: ValueCache,
    pub(crate) cell_entries: Vec<CellEntry>,
    pub(crate) row_listeners: Vec<AxisCallback>,
    pub(crate) column_listeners: Vec<AxisCallback>,
}

impl<H: HostAdapter> TableModel<H> {
    pub fn new(host: H) -> TableModel<H> {
        TableModel::with_options(host, ModelOptions::default())
    }

    /// Every registry and the cache are constructed per instance; two
    /// models never share state.
    pub fn with_options(host: H, options: ModelOptions) -> TableModel<H> {
        TableModel {
            host,
            options,
            cache: ValueCache::default(),
            cell_entries: Vec::new(),
            row_listeners: Vec::new(),
            column_listeners: Vec::new(),
        }
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access. Edits made through this must be reported with
    /// [`TableModel::notify_external_edit`] or the model will not react.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: HostAdapter> CellRead for TableModel<H> {
    fn read(&self, coord: Coordinate) -> Value {
        self.get(coord)
    }
}
