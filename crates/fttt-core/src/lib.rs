#![forbid(unsafe_code)]

//! Core: markers, grid indices, and the recursive board tree.
//!
//! A [`Board`] is a rectangular grid whose cells are either a [`Marker`] or
//! another grid, nested to a fixed depth. The tree lives in a single arena;
//! nodes are addressed by [`NodeId`] and read through borrowed [`NodeRef`]
//! views. Only leaf cells are mutable, through [`Board::set`] and
//! [`Board::fill`].
//!
//! ```
//! use fttt_core::{Board, Marker};
//!
//! let mut board = Board::uniform(3, 3, 0)?;
//! let x = Marker::new('X')?;
//! let root = board.root().id();
//! for i in 0..3 {
//!     board.set(root, (i, 0), x)?;
//! }
//! assert_eq!(board.root().winner(), Some(x));
//! # Ok::<(), fttt_core::BoardError>(())
//! ```

pub mod board;
pub mod error;
pub mod index;
pub mod logging;
pub mod marker;

pub use board::{
    Board, CellInit, CellKind, CellRef, FillStrategy, Line, MAX_DEPTH, MAX_LEAVES, NodeId, NodeRef,
};
pub use error::{BoardError, Result};
pub use index::CellIndex;
pub use marker::Marker;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span};
