#![forbid(unsafe_code)]

//! Character-grid layout for recursive boards.
//!
//! [`Layout::compute`] measures a board tree bottom-up and records, for every
//! node, the character extent of each column and row, the gutter between
//! them, and where each cell sits inside the node's own box. Nothing here
//! touches a canvas; the renderer walks the resulting tree.
//!
//! # Sizing rules
//!
//! - A marker is always `1x1`.
//! - The gutter of a node is `depth - 1`, identical on both axes.
//! - A column is as wide as its widest cell; a row as tall as its tallest.
//! - Each axis totals `Σ (track + gutter)`, trailing gutter included (see
//!   [`LayoutConfig::trailing_gutter`]).
//! - A cell is centred in its column/row box, each half truncated on its own:
//!   `offset + track / 2 - extent / 2`.
//!
//! ```
//! use fttt_core::Board;
//! use fttt_layout::Layout;
//!
//! let board = Board::uniform(3, 3, 1)?;
//! let layout = Layout::compute(&board);
//! assert_eq!(layout.gutter(), 1);
//! assert_eq!(layout.width(), 12);
//! assert_eq!(layout.x_offsets(), &[0, 4, 8]);
//! # Ok::<(), fttt_core::BoardError>(())
//! ```

use fttt_core::CellRef;

/// Width and height in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    /// The extent of a single marker.
    pub const ONE: Self = Self::new(1, 1);

    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Area in characters.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Tunables for [`Layout::compute_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Reserve one gutter after the last column and row.
    ///
    /// On by default, matching the reference sizing where a 3x3 of 3x3
    /// boards is 12 characters wide. Turning it off drops the trailing blank
    /// column and row (11 for the same board).
    pub trailing_gutter: bool,
}

impl LayoutConfig {
    /// Reference sizing, trailing gutter included.
    pub const REFERENCE: Self = Self {
        trailing_gutter: true,
    };

    /// Gutters only between tracks.
    pub const COMPACT: Self = Self {
        trailing_gutter: false,
    };

    #[must_use]
    pub const fn with_trailing_gutter(mut self, trailing_gutter: bool) -> Self {
        self.trailing_gutter = trailing_gutter;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Computed geometry of one cell and, for sub-boards, everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    size: Size,
    gutter: usize,
    column_widths: Vec<usize>,
    row_heights: Vec<usize>,
    x_offsets: Vec<usize>,
    y_offsets: Vec<usize>,
    children: Vec<Layout>,
}

impl Layout {
    /// Lay out a marker or board with the reference configuration.
    pub fn compute<'a>(target: impl Into<CellRef<'a>>) -> Self {
        Self::compute_with(target, &LayoutConfig::default())
    }

    /// Lay out a marker or board.
    pub fn compute_with<'a>(target: impl Into<CellRef<'a>>, config: &LayoutConfig) -> Self {
        let target = target.into();
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "layout_compute",
            depth = target.depth(),
            trailing_gutter = config.trailing_gutter
        );
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        let layout = Self::measure(target, config);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            width = layout.width(),
            height = layout.height(),
            gutter = layout.gutter,
            "layout computed"
        );
        layout
    }

    fn leaf() -> Self {
        Self {
            size: Size::ONE,
            gutter: 0,
            column_widths: Vec::new(),
            row_heights: Vec::new(),
            x_offsets: Vec::new(),
            y_offsets: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Children first, then this node's tracks from their extents.
    fn measure(target: CellRef<'_>, config: &LayoutConfig) -> Self {
        let node = match target {
            CellRef::Leaf(_) => return Self::leaf(),
            CellRef::Branch(node) => node,
        };
        let children: Vec<Layout> = node.cells().map(|cell| Self::measure(cell, config)).collect();
        let (columns, rows) = (node.width(), node.height());
        let gutter = node.depth().saturating_sub(1);

        let column_widths: Vec<usize> = (0..columns)
            .map(|x| {
                (0..rows)
                    .map(|y| children[x + y * columns].width())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let row_heights: Vec<usize> = (0..rows)
            .map(|y| {
                children[y * columns..(y + 1) * columns]
                    .iter()
                    .map(Layout::height)
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let (x_offsets, width) = track_offsets(&column_widths, gutter, config);
        let (y_offsets, height) = track_offsets(&row_heights, gutter, config);

        Self {
            size: Size::new(width, height),
            gutter,
            column_widths,
            row_heights,
            x_offsets,
            y_offsets,
            children,
        }
    }

    /// Rendered extent in characters.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Spacing between tracks at this level.
    #[inline]
    pub fn gutter(&self) -> usize {
        self.gutter
    }

    /// True for a marker's layout.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of columns of cells (0 for a marker).
    #[inline]
    pub fn columns(&self) -> usize {
        self.column_widths.len()
    }

    /// Number of rows of cells (0 for a marker).
    #[inline]
    pub fn rows(&self) -> usize {
        self.row_heights.len()
    }

    pub fn column_widths(&self) -> &[usize] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[usize] {
        &self.row_heights
    }

    pub fn x_offsets(&self) -> &[usize] {
        &self.x_offsets
    }

    pub fn y_offsets(&self) -> &[usize] {
        &self.y_offsets
    }

    /// Child layouts, row-major.
    pub fn children(&self) -> &[Layout] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Layout> {
        self.children.get(index)
    }

    /// Top-left of child `index`, relative to this node's origin.
    pub fn placement(&self, index: usize) -> Option<(usize, usize)> {
        let child = self.children.get(index)?;
        let (x, y) = (index % self.columns(), index / self.columns());
        Some((
            self.x_offsets[x] + self.column_widths[x] / 2 - child.width() / 2,
            self.y_offsets[y] + self.row_heights[y] / 2 - child.height() / 2,
        ))
    }

    /// Child layouts paired with their placements, row-major.
    pub fn placements(&self) -> impl Iterator<Item = ((usize, usize), &Layout)> + '_ {
        (0..self.children.len())
            .filter_map(move |index| Some((self.placement(index)?, &self.children[index])))
    }

    /// Whether this layout was computed for a tree of the same shape.
    ///
    /// Marker changes never affect shape, so a layout stays valid for the
    /// whole life of the board it was computed from.
    pub fn fits<'a>(&self, target: impl Into<CellRef<'a>>) -> bool {
        match target.into() {
            CellRef::Leaf(_) => self.is_leaf(),
            CellRef::Branch(node) => {
                self.columns() == node.width()
                    && self.children.len() == node.spaces()
                    && self
                        .children
                        .iter()
                        .zip(node.cells())
                        .all(|(layout, cell)| layout.fits(cell))
            }
        }
    }
}

/// Running offsets of each track and the total extent of the axis.
fn track_offsets(tracks: &[usize], gutter: usize, config: &LayoutConfig) -> (Vec<usize>, usize) {
    let mut total = 0;
    let offsets = tracks
        .iter()
        .map(|&track| {
            let offset = total;
            total += track + gutter;
            offset
        })
        .collect();
    if !config.trailing_gutter && !tracks.is_empty() {
        total -= gutter;
    }
    (offsets, total)
}
