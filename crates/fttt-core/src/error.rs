#![forbid(unsafe_code)]

//! Errors raised by board construction, navigation and mutation.
//!
//! Every fallible operation validates before it writes, so an `Err` always
//! leaves the tree exactly as it was.

use thiserror::Error;

use crate::board::{CellKind, NodeId};
use crate::index::CellIndex;

/// Result alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors surfaced by the board tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A side is zero, or the grid has more than [`MAX_LEAVES`] cells.
    ///
    /// [`MAX_LEAVES`]: crate::board::MAX_LEAVES
    #[error(
        "board dimensions must be positive with at most {} cells, got {width}x{height}",
        crate::board::MAX_LEAVES
    )]
    InvalidDimensions { width: usize, height: usize },

    #[error("cannot build {levels} nested levels of {width}x{height} boards")]
    InvalidLevels {
        width: usize,
        height: usize,
        levels: u32,
    },

    #[error("explicit fill supplied {found} cells for a board of {expected} spaces")]
    InvalidCellCount { expected: usize, found: usize },

    #[error("index {index} is out of bounds for a {width}x{height} grid")]
    IndexOutOfBounds {
        index: CellIndex,
        width: usize,
        height: usize,
    },

    #[error("cell {index} holds a {found}, expected a {expected}")]
    TypeMismatch {
        index: usize,
        expected: CellKind,
        found: CellKind,
    },

    #[error(
        "{} cannot be used as a marker",
        .glyph.map_or_else(|| "empty text".to_string(), |g| format!("{g:?}"))
    )]
    InvalidValue { glyph: Option<char> },

    #[error("operation needs a square board, got {width}x{height}")]
    NotSquare { width: usize, height: usize },

    #[error("cell {index} has depth {found}, its siblings have depth {expected}")]
    InconsistentDepth {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("node {0} does not belong to this board")]
    UnknownNode(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = BoardError::IndexOutOfBounds {
            index: CellIndex::Xy(3, 1),
            width: 3,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "index (3, 1) is out of bounds for a 3x3 grid"
        );

        let err = BoardError::TypeMismatch {
            index: 4,
            expected: CellKind::Leaf,
            found: CellKind::Branch,
        };
        assert_eq!(err.to_string(), "cell 4 holds a sub-board, expected a marker");

        let err = BoardError::InvalidDimensions {
            width: 5000,
            height: 5000,
        };
        assert_eq!(
            err.to_string(),
            "board dimensions must be positive with at most 4194304 cells, got 5000x5000"
        );

        let err = BoardError::InvalidValue { glyph: None };
        assert_eq!(err.to_string(), "empty text cannot be used as a marker");

        let err = BoardError::InvalidValue { glyph: Some('\t') };
        assert_eq!(err.to_string(), "'\\t' cannot be used as a marker");

        let err = BoardError::UnknownNode(NodeId::ROOT);
        assert_eq!(err.to_string(), "node #0 does not belong to this board");
    }
}
