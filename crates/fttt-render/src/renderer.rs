#![forbid(unsafe_code)]

//! Board-to-canvas rendering.
//!
//! Rendering is two passes: [`Layout::compute_with`] sizes the tree, then a
//! recursive walk writes each marker glyph at its absolute position. Markers
//! are the only thing drawn; gutters and centering slack stay as whatever the
//! canvas already held.
//!
//! A [`Renderer`] keeps the layout between frames. Markers never change the
//! shape of a board, so one layout serves every redraw of the same tree.

use fttt_core::CellRef;
use fttt_layout::{Layout, LayoutConfig};

use crate::canvas::Canvas;

/// Render `target` onto a fresh canvas sized to its layout.
pub fn render<'a>(target: impl Into<CellRef<'a>>) -> Canvas {
    render_with(target, &LayoutConfig::default())
}

/// [`render`] with explicit layout tunables.
pub fn render_with<'a>(target: impl Into<CellRef<'a>>, config: &LayoutConfig) -> Canvas {
    let target = target.into();
    Renderer::with_config(target, config).render(target)
}

/// Render `target` into an existing canvas with its top-left at `(x, y)`.
///
/// Glyphs that land outside the canvas are dropped.
pub fn render_into<'a>(target: impl Into<CellRef<'a>>, canvas: &mut Canvas, x: usize, y: usize) {
    let target = target.into();
    Renderer::new(target).render_into(target, canvas, x, y);
}

/// Precomputed layout for repeatedly drawing one board.
///
/// ```
/// use fttt_core::{Board, Marker, NodeId};
/// use fttt_render::Renderer;
///
/// let mut board = Board::uniform(2, 2, 0)?;
/// let renderer = Renderer::new(&board);
/// assert_eq!(renderer.render(&board).to_text(), "..\n..");
///
/// board.set(NodeId::ROOT, (1, 1), Marker::new('X')?)?;
/// assert_eq!(renderer.render(&board).to_text(), "..\n.X");
/// # Ok::<(), fttt_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    layout: Layout,
    config: LayoutConfig,
}

impl Renderer {
    /// Lay out `target` with the reference configuration.
    pub fn new<'a>(target: impl Into<CellRef<'a>>) -> Self {
        Self::with_config(target, &LayoutConfig::default())
    }

    pub fn with_config<'a>(target: impl Into<CellRef<'a>>, config: &LayoutConfig) -> Self {
        Self {
            layout: Layout::compute_with(target, config),
            config: *config,
        }
    }

    /// The layout every frame is drawn with.
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Width of a full render.
    #[inline]
    pub fn width(&self) -> usize {
        self.layout.width()
    }

    /// Height of a full render.
    #[inline]
    pub fn height(&self) -> usize {
        self.layout.height()
    }

    /// Draw `target` onto a fresh canvas of [`width`](Self::width) by
    /// [`height`](Self::height).
    ///
    /// `target` must have the shape this renderer was built for.
    pub fn render<'a>(&self, target: impl Into<CellRef<'a>>) -> Canvas {
        let mut canvas = Canvas::new(self.width(), self.height());
        self.render_into(target, &mut canvas, 0, 0);
        canvas
    }

    /// Draw `target` into `canvas` with its top-left at `(x, y)`.
    ///
    /// `target` must have the shape this renderer was built for.
    pub fn render_into<'a>(
        &self,
        target: impl Into<CellRef<'a>>,
        canvas: &mut Canvas,
        x: usize,
        y: usize,
    ) {
        let target = target.into();
        debug_assert!(
            self.layout.fits(target),
            "renderer layout does not match the board being drawn"
        );

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "render",
            x,
            y,
            width = self.width(),
            height = self.height(),
            canvas_width = canvas.width(),
            canvas_height = canvas.height()
        );
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        let drawn = draw(&self.layout, target, canvas, x, y);

        #[cfg(feature = "tracing")]
        tracing::trace!(markers = drawn, "board rendered");
        #[cfg(not(feature = "tracing"))]
        let _ = drawn;
    }
}

/// Write every marker under `cell`, returning how many were visited.
fn draw(layout: &Layout, cell: CellRef<'_>, canvas: &mut Canvas, x: usize, y: usize) -> usize {
    match cell {
        CellRef::Leaf(marker) => {
            canvas.set((x, y), marker.glyph());
            1
        }
        CellRef::Branch(node) => layout
            .placements()
            .zip(node.cells())
            .map(|(((dx, dy), child), cell)| {
                draw(
                    child,
                    cell,
                    canvas,
                    x.saturating_add(dx),
                    y.saturating_add(dy),
                )
            })
            .sum(),
    }
}
