#![forbid(unsafe_code)]

//! Row-major grid positions.
//!
//! Boards and canvases both accept either a flat index or an `(x, y)` pair
//! wherever a single position is expected. Flat index `i` and `(x, y)` name
//! the same slot when `i == x + y * width`.

use std::fmt;

/// A position in a row-major grid, by flat index or by column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellIndex {
    /// Flat row-major index.
    Flat(usize),
    /// Column `x`, row `y`.
    Xy(usize, usize),
}

impl CellIndex {
    /// Resolve to a flat index within a `width` x `height` grid.
    ///
    /// Returns `None` when the position falls outside the grid. For `Xy`
    /// each axis is checked on its own, so an overlong `x` never wraps into
    /// the next row.
    #[inline]
    pub fn resolve(self, width: usize, height: usize) -> Option<usize> {
        match self {
            Self::Flat(index) => (index < width.checked_mul(height)?).then_some(index),
            Self::Xy(x, y) => (x < width && y < height).then(|| x + y * width),
        }
    }

    /// Split a flat index into `(x, y)` for a grid of the given width.
    #[inline]
    pub const fn coords(index: usize, width: usize) -> (usize, usize) {
        (index % width, index / width)
    }
}

impl From<usize> for CellIndex {
    fn from(index: usize) -> Self {
        Self::Flat(index)
    }
}

impl From<(usize, usize)> for CellIndex {
    fn from((x, y): (usize, usize)) -> Self {
        Self::Xy(x, y)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(index) => write!(f, "{index}"),
            Self::Xy(x, y) => write!(f, "({x}, {y})"),
        }
    }
}
