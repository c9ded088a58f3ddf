#![forbid(unsafe_code)]

//! FractalTTT public facade crate.
//!
//! Recursive tic-tac-toe: boards whose cells are either markers or smaller
//! boards, with cached win detection and a plain-text renderer. This crate
//! re-exports the stable surface of the internal crates and offers a small
//! prelude.
//!
//! ```
//! use fttt::prelude::*;
//!
//! let mut board = Board::uniform(3, 3, 1)?;
//! let centre = board.drill(&[4])?.id();
//! board.set(centre, (1, 1), Marker::new('X')?)?;
//!
//! let canvas = render(&board);
//! assert_eq!(canvas.get((5, 5)), Some('X'));
//! assert_eq!(board.root().winner(), None);
//! # Ok::<(), fttt::Error>(())
//! ```

// --- Board re-exports ------------------------------------------------------

pub use fttt_core::{
    Board, CellIndex, CellInit, CellKind, CellRef, FillStrategy, Line, MAX_DEPTH, MAX_LEAVES,
    Marker, NodeId, NodeRef,
};

// --- Layout re-exports -----------------------------------------------------

pub use fttt_layout::{Layout, LayoutConfig, Size};

// --- Render re-exports -----------------------------------------------------

pub use fttt_render::{Canvas, Renderer, render, render_into, render_with};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for FractalTTT.
pub use fttt_core::BoardError as Error;

/// Standard result type for FractalTTT APIs.
pub use fttt_core::Result;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Board, Canvas, CellRef, Error, FillStrategy, Layout, Marker, NodeId, NodeRef, Renderer,
        Result, render,
    };

    pub use crate::{core, layout};
}

pub use fttt_core as core;
pub use fttt_layout as layout;
pub use fttt_render as render;
