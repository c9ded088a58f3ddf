#![forbid(unsafe_code)]

//! Text rendering for recursive boards.
//!
//! # Role in FractalTTT
//! `fttt-render` turns a board tree into characters. It owns the [`Canvas`]
//! target and the [`Renderer`] that walks a precomputed
//! [`Layout`](fttt_layout::Layout) to place every marker glyph.
//!
//! # Primary responsibilities
//! - **Canvas**: fixed-size character grid with clipped writes.
//! - **Renderer**: layout-driven placement of markers, reusable across moves.
//!
//! # How it fits in the system
//! `fttt-core` owns the board state, `fttt-layout` sizes it, and this crate
//! draws it. The facade crate `fttt` re-exports everything for applications.
//!
//! ```
//! use fttt_core::Board;
//!
//! let board = Board::uniform(3, 3, 1)?;
//! let canvas = fttt_render::render(&board);
//! assert_eq!(canvas.width(), 12);
//! assert_eq!(canvas.lines().next().as_deref(), Some("... ... ... "));
//! # Ok::<(), fttt_core::BoardError>(())
//! ```

pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, DEFAULT_FILL};
pub use renderer::{Renderer, render, render_into, render_with};
