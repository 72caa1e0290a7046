//! The [`Cell`] type: a grid node with a traversal-state tag.

use crate::geom::Pos;

/// Traversal state of a cell.
///
/// The tags are mutually exclusive. Presentation layers map them to colors or
/// glyphs; the engine only ever reasons about the tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Wall,
    Start,
    End,
    /// Discovered and waiting in a search frontier.
    Frontier,
    /// Expanded by a search.
    Visited,
    /// Part of a reconstructed path.
    Path,
}

impl CellState {
    /// Every state, in declaration order.
    pub const ALL: [CellState; 7] = [
        CellState::Free,
        CellState::Wall,
        CellState::Start,
        CellState::End,
        CellState::Frontier,
        CellState::Visited,
        CellState::Path,
    ];

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, CellState::Wall)
    }

    /// Start or End.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, CellState::Start | CellState::End)
    }

    /// Tags written by a search run (Frontier, Visited, Path).
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(
            self,
            CellState::Frontier | CellState::Visited | CellState::Path
        )
    }

    /// Text glyph used by layouts and plain-text rendering.
    pub const fn glyph(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Wall => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub fn from_glyph(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.glyph() == ch)
    }
}

/// A grid node: immutable coordinates, a state tag and the cached list of
/// currently traversable neighbours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    pub(crate) state: CellState,
    pub(crate) neighbors: Vec<Pos>,
}

impl Cell {
    pub(crate) fn new(pos: Pos) -> Self {
        Self {
            pos,
            state: CellState::Free,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Neighbours as of the last [`Grid::rebuild_neighbors`](crate::Grid::rebuild_neighbors).
    /// Empty until the first rebuild.
    #[inline]
    pub fn neighbors(&self) -> &[Pos] {
        &self.neighbors
    }
}
