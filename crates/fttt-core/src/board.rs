#![forbid(unsafe_code)]

//! The recursive board tree.
//!
//! A [`Board`] owns every node of one tree in a flat arena. Node 0 is the
//! root; every other node records the [`NodeId`] of its parent and the slot it
//! occupies there. Parent links are plain handles, so the tree owns its
//! children top-down and navigation upward never creates a second owner.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height` for every node, with `width, height > 0`
//! 2. The kind of a cell (leaf or branch) never changes after construction
//! 3. All children of a node report the same depth
//! 4. A node's cached winner is either dirty or equal to a fresh scan
//! 5. Every mutation dirties the mutated node and all of its ancestors

use std::cell::Cell;
use std::fmt;
use std::ptr;

use smallvec::SmallVec;

use crate::error::{BoardError, Result};
use crate::index::CellIndex;
use crate::marker::Marker;

/// Upper bound on the number of cells in a single grid and on the number of
/// leaves a uniform fill may create.
pub const MAX_LEAVES: usize = 1 << 22;

/// Upper bound on tree depth.
pub const MAX_DEPTH: usize = 32;

/// One line of cells: a row, a column or a diagonal.
pub type Line<'a> = SmallVec<[CellRef<'a>; 4]>;

/// Handle to a node inside the [`Board`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every board.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in its board's arena.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two kinds of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// A [`Marker`].
    Leaf,
    /// A nested board.
    Branch,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Leaf => "marker",
            Self::Branch => "sub-board",
        })
    }
}

/// Initial content of one cell for [`FillStrategy::Explicit`].
#[derive(Debug, Clone)]
pub enum CellInit {
    Leaf(Marker),
    /// A finished board, moved into the new tree as a sub-board.
    Branch(Board),
}

impl From<Marker> for CellInit {
    fn from(marker: Marker) -> Self {
        Self::Leaf(marker)
    }
}

impl From<Board> for CellInit {
    fn from(board: Board) -> Self {
        Self::Branch(board)
    }
}

/// How [`Board::new`] populates the cells of a new board.
#[derive(Debug, Clone)]
pub enum FillStrategy {
    /// Nest boards of the same shape `levels` more times, then BLANK markers.
    Uniform { levels: u32 },
    /// One initializer per flat index, row-major.
    Explicit(Vec<CellInit>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Leaf(Marker),
    Branch(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WinnerCache {
    Dirty,
    Clean(Option<Marker>),
}

#[derive(Debug, Clone)]
struct Node {
    width: usize,
    height: usize,
    cells: Vec<Slot>,
    parent: Option<NodeId>,
    slot: usize,
    depth: usize,
    winner: Cell<WinnerCache>,
}

impl Node {
    fn new(width: usize, height: usize, parent: Option<NodeId>, slot: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            cells: Vec::with_capacity(width * height),
            parent,
            slot,
            depth,
            winner: Cell::new(WinnerCache::Dirty),
        }
    }
}

/// A recursive tic-tac-toe board.
#[derive(Debug, Clone)]
pub struct Board {
    nodes: Vec<Node>,
}

impl Board {
    /// Build a `width` x `height` board using the given fill strategy.
    pub fn new(width: usize, height: usize, strategy: FillStrategy) -> Result<Self> {
        match strategy {
            FillStrategy::Uniform { levels } => Self::uniform(width, height, levels),
            FillStrategy::Explicit(cells) => Self::from_cells(width, height, cells),
        }
    }

    /// Build a board where every level has the same shape.
    ///
    /// `levels == 0` gives a single grid of BLANK markers (depth 1); each
    /// extra level wraps every cell in another `width` x `height` grid.
    pub fn uniform(width: usize, height: usize, levels: u32) -> Result<Self> {
        let spaces = check_dimensions(width, height)?;
        let too_deep = BoardError::InvalidLevels {
            width,
            height,
            levels,
        };
        let depth = levels.checked_add(1).ok_or(too_deep.clone())?;
        if depth as usize > MAX_DEPTH {
            return Err(too_deep);
        }
        match spaces.checked_pow(depth) {
            Some(leaves) if leaves <= MAX_LEAVES => {}
            _ => return Err(too_deep),
        }

        let mut nodes = Vec::new();
        push_uniform(&mut nodes, width, height, levels, None, 0);
        let board = Self { nodes };
        crate::debug!(
            width,
            height,
            levels,
            nodes = board.nodes.len(),
            "uniform board built"
        );
        Ok(board)
    }

    /// Build a board by asking `init` for the content of each flat index.
    pub fn from_fn<F>(width: usize, height: usize, init: F) -> Result<Self>
    where
        F: FnMut(usize) -> CellInit,
    {
        let spaces = check_dimensions(width, height)?;
        Self::from_cells(width, height, (0..spaces).map(init).collect())
    }

    fn from_cells(width: usize, height: usize, cells: Vec<CellInit>) -> Result<Self> {
        let spaces = check_dimensions(width, height)?;
        if cells.len() != spaces {
            return Err(BoardError::InvalidCellCount {
                expected: spaces,
                found: cells.len(),
            });
        }

        let depth_of = |cell: &CellInit| match cell {
            CellInit::Leaf(_) => 0,
            CellInit::Branch(board) => board.nodes[0].depth,
        };
        let expected = depth_of(&cells[0]);
        if let Some((index, found)) = cells
            .iter()
            .map(depth_of)
            .enumerate()
            .find(|&(_, depth)| depth != expected)
        {
            return Err(BoardError::InconsistentDepth {
                index,
                expected,
                found,
            });
        }
        let depth = expected + 1;
        if depth > MAX_DEPTH {
            return Err(BoardError::InvalidLevels {
                width,
                height,
                levels: expected as u32,
            });
        }

        let mut nodes = vec![Node::new(width, height, None, 0, depth)];
        for (index, cell) in cells.into_iter().enumerate() {
            let slot = match cell {
                CellInit::Leaf(marker) => Slot::Leaf(marker),
                CellInit::Branch(sub) => Slot::Branch(graft(&mut nodes, sub, NodeId::ROOT, index)),
            };
            nodes[0].cells.push(slot);
        }
        let board = Self { nodes };
        crate::debug!(
            width,
            height,
            depth,
            nodes = board.nodes.len(),
            "explicit board built"
        );
        Ok(board)
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        self.view(NodeId::ROOT)
    }

    /// Look up a node by handle.
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_>> {
        self.nodes.get(id.0).ok_or(BoardError::UnknownNode(id))?;
        Ok(self.view(id))
    }

    /// Descend from the root by a sequence of flat indices.
    pub fn drill(&self, path: &[usize]) -> Result<NodeRef<'_>> {
        self.root().drill(path)
    }

    /// Total number of nodes in the tree, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Replace the marker in a leaf cell, returning the previous marker.
    ///
    /// Fails with `TypeMismatch` if the cell holds a sub-board. On success
    /// the winner of `node` and of every ancestor is recomputed on next query.
    pub fn set(
        &mut self,
        node: NodeId,
        at: impl Into<CellIndex>,
        marker: Marker,
    ) -> Result<Marker> {
        let (index, previous) = self.leaf_at(node, at.into())?;
        self.write_leaf(node, index, marker);
        Ok(previous)
    }

    /// Place a marker only if the leaf cell is still BLANK.
    ///
    /// Same preconditions as [`Board::set`]. Returns whether the marker was
    /// written; an occupied cell is left untouched.
    pub fn fill(&mut self, node: NodeId, at: impl Into<CellIndex>, marker: Marker) -> Result<bool> {
        let (index, current) = self.leaf_at(node, at.into())?;
        if current.is_full() {
            return Ok(false);
        }
        self.write_leaf(node, index, marker);
        Ok(true)
    }

    #[inline]
    fn view(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef {
            board: self,
            id,
            node: &self.nodes[id.0],
        }
    }

    fn leaf_at(&self, node: NodeId, at: CellIndex) -> Result<(usize, Marker)> {
        let data = self.nodes.get(node.0).ok_or(BoardError::UnknownNode(node))?;
        let index = at
            .resolve(data.width, data.height)
            .ok_or(BoardError::IndexOutOfBounds {
                index: at,
                width: data.width,
                height: data.height,
            })?;
        match data.cells[index] {
            Slot::Leaf(marker) => Ok((index, marker)),
            Slot::Branch(_) => Err(BoardError::TypeMismatch {
                index,
                expected: CellKind::Leaf,
                found: CellKind::Branch,
            }),
        }
    }

    fn write_leaf(&mut self, node: NodeId, index: usize, marker: Marker) {
        self.nodes[node.0].cells[index] = Slot::Leaf(marker);
        crate::trace!(%node, index, glyph = %marker, "leaf set");
        self.invalidate(node);
    }

    /// Dirty the winner cache from `from` up to the root.
    ///
    /// The walk never stops early: an ancestor's scan may have short-circuited
    /// before it visited this branch, so a dirty child can sit below a clean
    /// parent.
    fn invalidate(&self, from: NodeId) {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            node.winner.set(WinnerCache::Dirty);
            cursor = node.parent;
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(spaces) if spaces > 0 && spaces <= MAX_LEAVES => Ok(spaces),
        _ => Err(BoardError::InvalidDimensions { width, height }),
    }
}

fn push_uniform(
    nodes: &mut Vec<Node>,
    width: usize,
    height: usize,
    levels: u32,
    parent: Option<NodeId>,
    slot: usize,
) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(Node::new(width, height, parent, slot, levels as usize + 1));
    for index in 0..width * height {
        let cell = if levels == 0 {
            Slot::Leaf(Marker::BLANK)
        } else {
            Slot::Branch(push_uniform(nodes, width, height, levels - 1, Some(id), index))
        };
        nodes[id.0].cells.push(cell);
    }
    id
}

/// Move every node of `sub` into `nodes`, hanging its root under `parent`.
fn graft(nodes: &mut Vec<Node>, sub: Board, parent: NodeId, slot: usize) -> NodeId {
    let offset = nodes.len();
    let shift = |id: NodeId| NodeId(id.0 + offset);
    for mut node in sub.nodes {
        match node.parent {
            Some(p) => node.parent = Some(shift(p)),
            None => {
                node.parent = Some(parent);
                node.slot = slot;
            }
        }
        for cell in &mut node.cells {
            if let Slot::Branch(child) = cell {
                *child = shift(*child);
            }
        }
        nodes.push(node);
    }
    NodeId(offset)
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    board: &'a Board,
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    /// Handle for this node, usable with [`Board::set`] and [`Board::fill`].
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The board this node belongs to.
    #[inline]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Number of columns of cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.node.width
    }

    /// Number of rows of cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.node.height
    }

    /// Number of cells, `width * height`.
    #[inline]
    pub fn spaces(&self) -> usize {
        self.node.cells.len()
    }

    #[inline]
    pub fn square(&self) -> bool {
        self.node.width == self.node.height
    }

    /// Side length of a square board.
    ///
    /// Not the number of spaces; see [`NodeRef::spaces`].
    pub fn size(&self) -> Result<usize> {
        self.require_square()?;
        Ok(self.node.width)
    }

    /// Depth of the tree below this node. Leaves count as depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.node.depth
    }

    /// The cell at a flat index or `(x, y)`.
    pub fn get(&self, at: impl Into<CellIndex>) -> Result<CellRef<'a>> {
        let at = at.into();
        at.resolve(self.width(), self.height())
            .map(|index| self.cell(index))
            .ok_or(BoardError::IndexOutOfBounds {
                index: at,
                width: self.width(),
                height: self.height(),
            })
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = CellRef<'a>> + use<'a> {
        let board = self.board;
        self.node.cells.iter().map(move |slot| CellRef::from_slot(board, *slot))
    }

    /// Row `y`, left to right.
    pub fn row(&self, y: usize) -> Result<Line<'a>> {
        if y >= self.height() {
            return Err(self.out_of_bounds(CellIndex::Xy(0, y)));
        }
        Ok(self.line(self.row_indices(y)))
    }

    /// Column `x`, top to bottom.
    pub fn column(&self, x: usize) -> Result<Line<'a>> {
        if x >= self.width() {
            return Err(self.out_of_bounds(CellIndex::Xy(x, 0)));
        }
        Ok(self.line(self.column_indices(x)))
    }

    pub fn rows(&self) -> Vec<Line<'a>> {
        (0..self.height())
            .map(|y| self.line(self.row_indices(y)))
            .collect()
    }

    pub fn columns(&self) -> Vec<Line<'a>> {
        (0..self.width())
            .map(|x| self.line(self.column_indices(x)))
            .collect()
    }

    /// Top-left to bottom-right.
    pub fn major_diagonal(&self) -> Result<Line<'a>> {
        self.require_square()?;
        Ok(self.line(self.major_indices()))
    }

    /// Top-right to bottom-left.
    pub fn minor_diagonal(&self) -> Result<Line<'a>> {
        self.require_square()?;
        Ok(self.line(self.minor_indices()))
    }

    /// Major then minor diagonal.
    pub fn diagonals(&self) -> Result<[Line<'a>; 2]> {
        Ok([self.major_diagonal()?, self.minor_diagonal()?])
    }

    /// Every line checked for a win, in scan order: rows, columns, then the
    /// diagonals when the board is square.
    pub fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = self.rows();
        lines.extend(self.columns());
        if let Ok(diagonals) = self.diagonals() {
            lines.extend(diagonals);
        }
        lines
    }

    /// The marker holding a complete line, if any.
    ///
    /// Lines are scanned rows first, then columns, then diagonals; the first
    /// complete line decides. Cached until a leaf below this node changes.
    pub fn winner(&self) -> Option<Marker> {
        if let WinnerCache::Clean(winner) = self.node.winner.get() {
            return winner;
        }
        let winner = self.scan_winner();
        crate::trace!(node = %self.id, winner = ?winner, "winner recomputed");
        self.node.winner.set(WinnerCache::Clean(winner));
        winner
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.winner().is_some()
    }

    /// The value of this board as a cell of its parent: its winner.
    #[inline]
    pub fn value(&self) -> Option<Marker> {
        self.winner()
    }

    /// Value of the cell at `at`.
    pub fn value_at(&self, at: impl Into<CellIndex>) -> Result<Option<Marker>> {
        Ok(self.get(at)?.value())
    }

    /// True when every cell, recursively, holds a placed marker.
    pub fn full(&self) -> bool {
        self.cells().all(|cell| cell.full())
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node.parent.map(|id| self.board.view(id))
    }

    /// Walk parent links up to the root.
    pub fn root(&self) -> NodeRef<'a> {
        let mut node = *self;
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// Flat index of this node inside its parent; `None` for the root.
    pub fn slot(&self) -> Option<usize> {
        self.node.parent.map(|_| self.node.slot)
    }

    /// Flat indices leading from the root down to this node.
    pub fn path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.board.root().depth());
        let mut node = *self;
        while let (Some(slot), Some(parent)) = (node.slot(), node.parent()) {
            path.push(slot);
            node = parent;
        }
        path.reverse();
        path
    }

    /// Descend through sub-boards by flat index.
    pub fn drill(&self, path: &[usize]) -> Result<NodeRef<'a>> {
        path.iter().try_fold(*self, |node, &index| match node.get(index)? {
            CellRef::Branch(child) => Ok(child),
            CellRef::Leaf(_) => Err(BoardError::TypeMismatch {
                index,
                expected: CellKind::Branch,
                found: CellKind::Leaf,
            }),
        })
    }

    #[inline]
    fn cell(&self, index: usize) -> CellRef<'a> {
        CellRef::from_slot(self.board, self.node.cells[index])
    }

    fn line(&self, indices: impl Iterator<Item = usize>) -> Line<'a> {
        indices.map(|index| self.cell(index)).collect()
    }

    fn row_indices(&self, y: usize) -> impl Iterator<Item = usize> + use<> {
        let width = self.width();
        (0..width).map(move |x| x + y * width)
    }

    fn column_indices(&self, x: usize) -> impl Iterator<Item = usize> + use<> {
        let width = self.width();
        (0..self.height()).map(move |y| x + y * width)
    }

    fn major_indices(&self) -> impl Iterator<Item = usize> + use<> {
        let width = self.width();
        (0..width).map(move |i| i + i * width)
    }

    fn minor_indices(&self) -> impl Iterator<Item = usize> + use<> {
        let width = self.width();
        (0..width).map(move |i| (width - 1 - i) + i * width)
    }

    fn scan_winner(&self) -> Option<Marker> {
        let _span = crate::trace_span!("scan_winner", node = %self.id);
        let _guard = _span.enter();

        let winner = (0..self.height())
            .find_map(|y| self.line_value(self.row_indices(y)))
            .or_else(|| (0..self.width()).find_map(|x| self.line_value(self.column_indices(x))));
        if winner.is_some() || !self.square() {
            return winner;
        }
        self.line_value(self.major_indices())
            .or_else(|| self.line_value(self.minor_indices()))
    }

    /// The shared value of a line, if every cell holds the same placed marker.
    fn line_value(&self, mut indices: impl Iterator<Item = usize>) -> Option<Marker> {
        let first = self.cell(indices.next()?).value()?;
        indices
            .all(|index| self.cell(index).value() == Some(first))
            .then_some(first)
    }

    fn require_square(&self) -> Result<()> {
        if self.square() {
            Ok(())
        } else {
            Err(BoardError::NotSquare {
                width: self.width(),
                height: self.height(),
            })
        }
    }

    fn out_of_bounds(&self, index: CellIndex) -> BoardError {
        BoardError::IndexOutOfBounds {
            index,
            width: self.width(),
            height: self.height(),
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.board, other.board) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("depth", &self.depth())
            .finish()
    }
}

/// A borrowed cell: a marker or a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef<'a> {
    Leaf(Marker),
    Branch(NodeRef<'a>),
}

impl<'a> CellRef<'a> {
    fn from_slot(board: &'a Board, slot: Slot) -> Self {
        match slot {
            Slot::Leaf(marker) => Self::Leaf(marker),
            Slot::Branch(id) => Self::Branch(board.view(id)),
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Self::Leaf(_) => CellKind::Leaf,
            Self::Branch(_) => CellKind::Branch,
        }
    }

    /// The marker's value, or the sub-board's winner.
    pub fn value(&self) -> Option<Marker> {
        match self {
            Self::Leaf(marker) => marker.value(),
            Self::Branch(node) => node.winner(),
        }
    }

    pub fn full(&self) -> bool {
        match self {
            Self::Leaf(marker) => marker.is_full(),
            Self::Branch(node) => node.full(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch(node) => node.depth(),
        }
    }

    pub fn as_marker(&self) -> Option<Marker> {
        match self {
            Self::Leaf(marker) => Some(*marker),
            Self::Branch(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeRef<'a>> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(node) => Some(*node),
        }
    }
}

impl From<Marker> for CellRef<'_> {
    fn from(marker: Marker) -> Self {
        Self::Leaf(marker)
    }
}

impl<'a> From<NodeRef<'a>> for CellRef<'a> {
    fn from(node: NodeRef<'a>) -> Self {
        Self::Branch(node)
    }
}

impl<'a> From<&'a Board> for CellRef<'a> {
    fn from(board: &'a Board) -> Self {
        Self::Branch(board.root())
    }
}
