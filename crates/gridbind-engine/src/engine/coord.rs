//! Cell coordinates.
//!
//! A [`Coordinate`] addresses exactly one cell by zero-indexed row and
//! column. Ordering beyond the row-major enumeration used by range
//! selections carries no meaning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The (row, column) address of a cell (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Coordinate {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row, self.col)
    }
}
