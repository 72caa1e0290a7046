//! The [`Grid`] type: a square array of [`Cell`]s with cached adjacency.
//!
//! The grid owns its cells exclusively. Adjacency is not maintained
//! incrementally: after any wall edit the caller runs
//! [`rebuild_neighbors`](Grid::rebuild_neighbors), and the grid remembers
//! whether that has happened since the last wall change so searches can
//! refuse stale adjacency.

use std::fmt;
use std::str::FromStr;

use crate::cell::{Cell, CellState};
use crate::geom::Pos;

/// Construction parameters for a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Side length; the grid holds `size * size` cells.
    pub size: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { size: 40 }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A square grid of [`Cell`]s, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
    stale: bool,
}

impl Grid {
    /// Create a `size`×`size` grid of Free cells. Neighbour lists stay empty
    /// until [`rebuild_neighbors`](Self::rebuild_neighbors) is called.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        let mut cells = Vec::with_capacity((size * size) as usize);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Pos::new(row, col)));
            }
        }
        Self {
            size,
            cells,
            stale: true,
        }
    }

    pub fn from_config(cfg: &GridConfig) -> Self {
        Self::new(cfg.size)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.size && p.col < self.size
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.row * self.size + p.col) as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn pos_at(&self, idx: usize) -> Pos {
        let size = self.size.max(1) as usize;
        Pos::new((idx / size) as i32, (idx % size) as i32)
    }

    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// State of the cell at `p`, or `None` if out of bounds.
    pub fn state(&self, p: Pos) -> Option<CellState> {
        self.cell(p).map(Cell::state)
    }

    /// Overwrite the state of the cell at `p`. Returns `false` (and does
    /// nothing) when `p` is out of bounds.
    ///
    /// Start/End uniqueness is the caller's responsibility. Turning a cell
    /// into a wall, or a wall into anything else, marks the adjacency stale.
    pub fn set_state(&mut self, p: Pos, state: CellState) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.state.is_wall() != state.is_wall() {
            self.stale = true;
        }
        cell.state = state;
        true
    }

    /// Cached neighbours of `p`. Empty for out-of-bounds positions.
    pub fn neighbors(&self, p: Pos) -> &[Pos] {
        match self.index(p) {
            Some(i) => &self.cells[i].neighbors,
            None => &[],
        }
    }

    /// Recompute every cell's neighbour list from the current wall layout:
    /// orthogonal positions in down, up, left, right order, skipping
    /// out-of-bounds and Wall cells.
    pub fn rebuild_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let p = self.cells[i].pos();
            let mut buf = std::mem::take(&mut self.cells[i].neighbors);
            buf.clear();
            for n in p.neighbors_4() {
                if self.state(n).is_some_and(|s| !s.is_wall()) {
                    buf.push(n);
                }
            }
            self.cells[i].neighbors = buf;
        }
        self.stale = false;
        log::trace!("rebuilt adjacency for {0}x{0} grid", self.size);
    }

    /// Whether a wall changed since the last rebuild (or no rebuild ever ran).
    #[inline]
    pub fn neighbors_stale(&self) -> bool {
        self.stale
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Positions of every cell currently tagged `state`, row-major.
    pub fn positions(&self, state: CellState) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .filter(move |c| c.state == state)
            .map(Cell::pos)
    }

    /// First cell tagged `state`, row-major.
    pub fn find(&self, state: CellState) -> Option<Pos> {
        self.positions(state).next()
    }

    /// Number of cells tagged `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Retag every `from` cell as `to`. Returns how many cells changed.
    ///
    /// Walls are not touched by this call in either direction, so adjacency
    /// stays valid.
    pub fn replace_all(&mut self, from: CellState, to: CellState) -> usize {
        if from == to || from.is_wall() || to.is_wall() {
            return 0;
        }
        let mut n = 0;
        for c in self.cells.iter_mut().filter(|c| c.state == from) {
            c.state = to;
            n += 1;
        }
        n
    }

    /// Reset all search marks (Frontier, Visited, Path) to Free, keeping
    /// walls and endpoints.
    pub fn clear_search_marks(&mut self) -> usize {
        let mut n = 0;
        for c in self.cells.iter_mut().filter(|c| c.state.is_search_mark()) {
            c.state = CellState::Free;
            n += 1;
        }
        n
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.size as usize) {
            for c in row {
                write!(f, "{}", c.state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Text layouts
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing a text layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout has no rows.
    Empty,
    /// A row's width differs from the number of rows.
    NotSquare { row: i32, width: usize, size: usize },
    /// A character that is not a cell glyph was found.
    InvalidGlyph { ch: char, pos: Pos },
    /// More than one `S` cell.
    DuplicateStart(Pos),
    /// More than one `E` cell.
    DuplicateEnd(Pos),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout is empty"),
            Self::NotSquare { row, width, size } => {
                write!(f, "layout row {row} has width {width}, expected {size}")
            }
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "layout contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateStart(p) => write!(f, "layout has a second start cell at {p}"),
            Self::DuplicateEnd(p) => write!(f, "layout has a second end cell at {p}"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl FromStr for Grid {
    type Err = LayoutError;

    /// Parse a square layout, one line per row, using the glyphs of
    /// [`CellState::glyph`]. Blank lines and surrounding whitespace are
    /// ignored. Adjacency is left unbuilt.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }
        let size = rows.len();
        let mut grid = Grid::new(size as i32);
        let mut start = None;
        let mut end = None;
        for (r, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(LayoutError::NotSquare {
                    row: r as i32,
                    width,
                    size,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let pos = Pos::new(r as i32, c as i32);
                let state =
                    CellState::from_glyph(ch).ok_or(LayoutError::InvalidGlyph { ch, pos })?;
                if state == CellState::Start && start.replace(pos).is_some() {
                    return Err(LayoutError::DuplicateStart(pos));
                }
                if state == CellState::End && end.replace(pos).is_some() {
                    return Err(LayoutError::DuplicateEnd(pos));
                }
                grid.set_state(pos, state);
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor_lists(g: &Grid) -> Vec<Vec<Pos>> {
        g.iter().map(|c| c.neighbors().to_vec()).collect()
    }

    #[test]
    fn new_grid_is_free_and_unbuilt() {
        let g = Grid::new(4);
        assert_eq!(g.size(), 4);
        assert_eq!(g.len(), 16);
        assert_eq!(g.count(CellState::Free), 16);
        assert!(g.iter().all(|c| c.neighbors().is_empty()));
        assert!(g.neighbors_stale());
    }

    #[test]
    fn negative_size_is_empty() {
        let g = Grid::new(-3);
        assert!(g.is_empty());
        assert_eq!(g.to_string(), "");
    }

    #[test]
    fn config_default_size() {
        let g = Grid::from_config(&GridConfig::default());
        assert_eq!(g.size(), 40);
    }

    #[test]
    fn index_round_trip() {
        let g = Grid::new(5);
        for i in 0..g.len() {
            assert_eq!(g.index(g.pos_at(i)), Some(i));
        }
        assert_eq!(g.index(Pos::new(5, 0)), None);
        assert_eq!(g.index(Pos::new(0, -1)), None);
    }

    #[test]
    fn set_state_out_of_bounds_is_noop() {
        let mut g = Grid::new(2);
        assert!(!g.set_state(Pos::new(2, 2), CellState::Wall));
        assert_eq!(g.count(CellState::Wall), 0);
    }

    #[test]
    fn rebuild_uses_fixed_order_and_skips_walls() {
        let mut g = Grid::new(3);
        g.rebuild_neighbors();
        assert_eq!(
            g.neighbors(Pos::new(1, 1)),
            &[
                Pos::new(2, 1),
                Pos::new(0, 1),
                Pos::new(1, 0),
                Pos::new(1, 2),
            ]
        );
        // corners only see two cells
        assert_eq!(
            g.neighbors(Pos::new(0, 0)),
            &[Pos::new(1, 0), Pos::new(0, 1)]
        );

        g.set_state(Pos::new(0, 1), CellState::Wall);
        assert!(g.neighbors_stale());
        g.rebuild_neighbors();
        assert!(!g.neighbors_stale());
        assert_eq!(g.neighbors(Pos::new(1, 1)).len(), 3);
        assert!(
            g.iter()
                .all(|c| !c.neighbors().contains(&Pos::new(0, 1)))
        );
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut g: Grid = "\
            .#..
            ..#.
            #...
            ..#."
            .parse()
            .unwrap();
        g.rebuild_neighbors();
        let first = neighbor_lists(&g);
        g.rebuild_neighbors();
        assert_eq!(first, neighbor_lists(&g));
    }

    #[test]
    fn non_wall_edits_keep_adjacency_fresh() {
        let mut g = Grid::new(3);
        g.rebuild_neighbors();
        g.set_state(Pos::new(0, 0), CellState::Start);
        g.set_state(Pos::new(1, 1), CellState::Visited);
        assert!(!g.neighbors_stale());
        g.set_state(Pos::new(2, 2), CellState::Wall);
        g.rebuild_neighbors();
        g.set_state(Pos::new(2, 2), CellState::Free);
        assert!(g.neighbors_stale());
    }

    #[test]
    fn replace_and_clear_marks() {
        let mut g: Grid = "\
            S.o
            x#*
            ooE"
            .parse()
            .unwrap();
        assert_eq!(g.replace_all(CellState::Frontier, CellState::Visited), 3);
        assert_eq!(g.count(CellState::Visited), 4);
        assert_eq!(g.replace_all(CellState::Free, CellState::Wall), 0);
        assert_eq!(g.clear_search_marks(), 5);
        assert_eq!(g.to_string(), "S..\n.#.\n..E\n");
    }

    #[test]
    fn parse_and_display() {
        let src = "S..\n.#.\n..E\n";
        let g: Grid = src.parse().unwrap();
        assert_eq!(g.find(CellState::Start), Some(Pos::new(0, 0)));
        assert_eq!(g.find(CellState::End), Some(Pos::new(2, 2)));
        assert_eq!(g.state(Pos::new(1, 1)), Some(CellState::Wall));
        assert_eq!(g.to_string(), src);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(LayoutError::Empty));
        assert_eq!(
            "...\n..\n...".parse::<Grid>(),
            Err(LayoutError::NotSquare {
                row: 1,
                width: 2,
                size: 3
            })
        );
        assert_eq!(
            "..\n.?".parse::<Grid>(),
            Err(LayoutError::InvalidGlyph {
                ch: '?',
                pos: Pos::new(1, 1)
            })
        );
        assert_eq!(
            "SS\n..".parse::<Grid>(),
            Err(LayoutError::DuplicateStart(Pos::new(0, 1)))
        );
        assert_eq!(
            "E.\n.E".parse::<Grid>(),
            Err(LayoutError::DuplicateEnd(Pos::new(1, 1)))
        );
    }
}
