//! Host adapter contract.
//!
//! The model never talks to a UI, a document tree, or any storage directly;
//! it reads and writes raw cell text through a [`HostAdapter`]. This is the
//! seam where an embedding supplies its own grid surface.

use std::collections::HashMap;

use gridbind_engine::engine::Value;

/// Raw cell access supplied by the embedding.
///
/// `find_cell` resolves a coordinate to an opaque handle, or `None` when no
/// such cell exists; missing cells are never an error, they read as absent.
/// Edits made by the host itself (not through the model) must be reported
/// via `TableModel::notify_external_edit` to keep propagation running.
pub trait HostAdapter {
    type Handle;

    fn find_cell(&self, row: usize, col: usize) -> Option<Self::Handle>;

    /// Raw text of the cell; `None` when the cell holds nothing readable.
    fn read_raw(&self, handle: &Self::Handle) -> Option<String>;

    fn write_raw(&mut self, handle: &Self::Handle, value: &Value);
}

/// In-process host over a sparse map of raw strings.
///
/// Cells outside the configured extent do not exist; cells inside it that
/// were never written read as absent. Useful for embedders without an
/// external surface, and for tests.
pub struct MemoryHost {
    rows: usize,
    cols: usize,
    cells: HashMap<(usize, usize), String>,
}

impl MemoryHost {
    pub fn new(rows: usize, cols: usize) -> MemoryHost {
        MemoryHost {
            rows,
            cols,
            cells: HashMap::new(),
        }
    }

    /// Host-side edit, as if a user typed into the cell. The model will not
    /// observe it until `notify_external_edit` is called.
    pub fn edit(&mut self, row: usize, col: usize, raw: &str) {
        if row < self.rows && col < self.cols {
            self.cells.insert((row, col), raw.to_string());
        }
    }

    pub fn raw(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(&(row, col)).map(String::as_str)
    }
}

impl HostAdapter for MemoryHost {
    type Handle = (usize, usize);

    fn find_cell(&self, row: usize, col: usize) -> Option<Self::Handle> {
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    fn read_raw(&self, handle: &Self::Handle) -> Option<String> {
        self.cells.get(handle).cloned()
    }

    fn write_raw(&mut self, handle: &Self::Handle, value: &Value) {
        self.cells.insert(*handle, value.to_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_outside_extent_do_not_exist() {
        let host = MemoryHost::new(2, 2);
        assert!(host.find_cell(1, 1).is_some());
        assert!(host.find_cell(2, 0).is_none());
        assert!(host.find_cell(0, 2).is_none());
    }

    #[test]
    fn test_unwritten_cells_read_as_nothing() {
        let mut host = MemoryHost::new(2, 2);
        let handle = host.find_cell(0, 0).unwrap();
        assert_eq!(host.read_raw(&handle), None);
        host.write_raw(&handle, &Value::Number(5.0));
        assert_eq!(host.read_raw(&handle), Some("5".to_string()));
    }
}
