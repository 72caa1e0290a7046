//! Interactive layout editing: [`Board`].
//!
//! A `Board` wraps a [`Grid`] and tracks where the start and end cells are,
//! so that painting and erasing keep at most one of each and never let an
//! endpoint sit on a wall.

use std::fmt;

use crate::cell::CellState;
use crate::geom::Pos;
use crate::grid::{Grid, GridConfig};

/// Errors from board edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    OutOfBounds(Pos),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the board"),
        }
    }
}

impl std::error::Error for EditError {}

/// A grid plus its start/end bookkeeping.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl Board {
    pub fn new(cfg: &GridConfig) -> Self {
        Self {
            grid: Grid::from_config(cfg),
            start: None,
            end: None,
        }
    }

    /// Adopt an existing grid, picking up its Start and End cells (the first
    /// of each, row-major; any extra ones are demoted to Free).
    pub fn from_grid(mut grid: Grid) -> Self {
        let start = grid.find(CellState::Start);
        let end = grid.find(CellState::End);
        for (state, keep) in [(CellState::Start, start), (CellState::End, end)] {
            let extra: Vec<Pos> = grid.positions(state).filter(|&p| Some(p) != keep).collect();
            for p in extra {
                log::warn!("dropping duplicate {state:?} cell at {p}");
                grid.set_state(p, CellState::Free);
            }
        }
        Self { grid, start, end }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for the search engine. Callers must not move the
    /// endpoints through this handle; use [`paint`](Self::paint) and
    /// [`erase`](Self::erase) instead.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Both endpoints are placed.
    #[inline]
    pub fn ready(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Primary-button edit: place the start first, then the end, then walls.
    ///
    /// Returns the state written, or `None` when `p` is already an endpoint
    /// and nothing changed.
    pub fn paint(&mut self, p: Pos) -> Result<Option<CellState>, EditError> {
        if !self.grid.contains(p) {
            return Err(EditError::OutOfBounds(p));
        }
        let state = if self.start.is_none() && self.end != Some(p) {
            self.start = Some(p);
            CellState::Start
        } else if self.end.is_none() && self.start != Some(p) {
            self.end = Some(p);
            CellState::End
        } else if self.start != Some(p) && self.end != Some(p) {
            CellState::Wall
        } else {
            return Ok(None);
        };
        self.grid.set_state(p, state);
        Ok(Some(state))
    }

    /// Secondary-button edit: reset `p` to Free, forgetting it as an
    /// endpoint if it was one.
    pub fn erase(&mut self, p: Pos) -> Result<(), EditError> {
        if !self.grid.set_state(p, CellState::Free) {
            return Err(EditError::OutOfBounds(p));
        }
        if self.start == Some(p) {
            self.start = None;
        } else if self.end == Some(p) {
            self.end = None;
        }
        Ok(())
    }

    /// Replace the grid with a fresh one of the same size and no endpoints.
    pub fn clear(&mut self) {
        self.grid = Grid::new(self.grid.size());
        self.start = None;
        self.end = None;
    }

    /// Wipe the marks of a previous search so another can run on the same
    /// layout. Returns the number of cells reset.
    pub fn reset_search(&mut self) -> usize {
        self.grid.clear_search_marks()
    }
}
