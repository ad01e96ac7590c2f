//! Selection algebra: immutable, composable sets of cell coordinates.
//!
//! A [`Selection`] names the cells a formula reads. Selections answer three
//! questions: does a coordinate belong (`includes`), which coordinates are
//! in it and in what order (`all`), and is it empty (`is_empty`). They are
//! value types; combining selections never mutates the operands.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coord::Coordinate;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("argument cannot be interpreted as a selection")]
    InvalidSelectionArgument,
}

/// A set of cell coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    Empty,
    Point(Coordinate),
    /// Explicit ordered coordinates; duplicates are kept as given.
    List(Vec<Coordinate>),
    /// Rectangular, inclusive on all four bounds.
    Range {
        top: usize,
        left: usize,
        bottom: usize,
        right: usize,
    },
    Union(Vec<Selection>),
}

impl Selection {
    pub fn empty() -> Selection {
        Selection::Empty
    }

    pub fn point(row: usize, col: usize) -> Selection {
        Selection::Point(Coordinate::new(row, col))
    }

    /// Rectangular selection; empty when `bottom < top` or `right < left`.
    pub fn range(top: usize, left: usize, bottom: usize, right: usize) -> Selection {
        Selection::Range {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn list(coords: Vec<Coordinate>) -> Selection {
        Selection::List(coords)
    }

    /// Combine selections. Empty members are dropped; a union that
    /// collapses to a single member returns that member unwrapped.
    pub fn union(members: Vec<Selection>) -> Selection {
        let mut kept: Vec<Selection> = members.into_iter().filter(|s| !s.is_empty()).collect();
        match kept.len() {
            0 => Selection::Empty,
            1 => kept.remove(0),
            _ => Selection::Union(kept),
        }
    }

    /// Interpret untyped `[row, col]` integer rows from a host.
    ///
    /// A single two-element row is a point, several two-element rows form a
    /// list (insertion order, duplicates kept), and anything else is an
    /// [`SelectionError::InvalidSelectionArgument`].
    pub fn coerce(rows: &[Vec<usize>]) -> Result<Selection, SelectionError> {
        if rows.iter().any(|row| row.len() != 2) {
            return Err(SelectionError::InvalidSelectionArgument);
        }
        let coords: Vec<Coordinate> = rows
            .iter()
            .map(|row| Coordinate::new(row[0], row[1]))
            .collect();
        match coords.as_slice() {
            [single] => Ok(Selection::Point(*single)),
            _ => Ok(Selection::List(coords)),
        }
    }

    /// Membership test; this is what triggers re-evaluation.
    pub fn includes(&self, coord: Coordinate) -> bool {
        match self {
            Selection::Empty => false,
            Selection::Point(c) => *c == coord,
            Selection::List(coords) => coords.contains(&coord),
            Selection::Range {
                top,
                left,
                bottom,
                right,
            } => {
                coord.row >= *top && coord.row <= *bottom && coord.col >= *left && coord.col <= *right
            }
            Selection::Union(members) => members.iter().any(|s| s.includes(coord)),
        }
    }

    /// Enumerate every coordinate: row-major for ranges, insertion order
    /// for lists, member concatenation for unions. No de-duplication.
    pub fn all(&self) -> Vec<Coordinate> {
        match self {
            Selection::Empty => Vec::new(),
            Selection::Point(c) => vec![*c],
            Selection::List(coords) => coords.clone(),
            Selection::Range {
                top,
                left,
                bottom,
                right,
            } => {
                if bottom < top || right < left {
                    return Vec::new();
                }
                let mut coords = Vec::with_capacity(range_capacity(*top, *left, *bottom, *right));
                for row in *top..=*bottom {
                    for col in *left..=*right {
                        coords.push(Coordinate::new(row, col));
                    }
                }
                coords
            }
            Selection::Union(members) => members.iter().flat_map(Selection::all).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Empty => true,
            Selection::Point(_) => false,
            Selection::List(coords) => coords.is_empty(),
            Selection::Range {
                top,
                left,
                bottom,
                right,
            } => bottom < top || right < left,
            Selection::Union(members) => members.iter().all(Selection::is_empty),
        }
    }
}

/// Capacity hint for range enumeration. Bounds are already validated
/// (`bottom >= top`, `right >= left`); the hint saturates to none when the
/// exact cell count overflows `usize`.
fn range_capacity(top: usize, left: usize, bottom: usize, right: usize) -> usize {
    (bottom - top)
        .checked_add(1)
        .and_then(|height| height.checked_mul((right - left).checked_add(1)?))
        .unwrap_or(0)
}

impl From<Coordinate> for Selection {
    fn from(coord: Coordinate) -> Selection {
        Selection::Point(coord)
    }
}

impl From<(usize, usize)> for Selection {
    fn from(pair: (usize, usize)) -> Selection {
        Selection::Point(pair.into())
    }
}

impl From<Vec<Coordinate>> for Selection {
    fn from(coords: Vec<Coordinate>) -> Selection {
        Selection::List(coords)
    }
}

impl From<Vec<(usize, usize)>> for Selection {
    fn from(pairs: Vec<(usize, usize)>) -> Selection {
        Selection::List(pairs.into_iter().map(Coordinate::from).collect())
    }
}
