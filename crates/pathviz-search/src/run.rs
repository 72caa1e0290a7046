//! Per-call search state.
//!
//! Everything here is created at the start of a search and dropped when it
//! returns; nothing is cached between calls. Maps are flat vectors indexed
//! by [`Grid::index`].

use pathviz_core::{CellState, Grid, Pos};

use crate::error::{EndpointFault, SearchError};

/// Sentinel cost meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// CameFrom
// ---------------------------------------------------------------------------

/// Predecessor map: for each discovered cell, the cell it was reached from.
///
/// The start of a search has no entry. Used only for path reconstruction.
#[derive(Clone, Debug)]
pub struct CameFrom {
    size: i32,
    parents: Vec<Option<Pos>>,
}

impl CameFrom {
    /// An empty map sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            size: grid.size(),
            parents: vec![None; grid.len()],
        }
    }

    #[inline]
    fn idx(&self, p: Pos) -> Option<usize> {
        if p.row < 0 || p.col < 0 || p.row >= self.size || p.col >= self.size {
            return None;
        }
        Some((p.row * self.size + p.col) as usize)
    }

    /// Predecessor of `p`, or `None` for the start and for undiscovered cells.
    #[inline]
    pub fn get(&self, p: Pos) -> Option<Pos> {
        self.idx(p).and_then(|i| self.parents[i])
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.get(p).is_some()
    }

    /// Record `parent` as the predecessor of `p`. Out-of-bounds keys are
    /// ignored.
    #[inline]
    pub fn insert(&mut self, p: Pos, parent: Pos) {
        if let Some(i) = self.idx(p) {
            self.parents[i] = Some(parent);
        }
    }

    /// Upper bound on the length of any predecessor chain.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.parents.len()
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Check the endpoints and adjacency before a search touches the grid.
/// Returns the flat indices of start and end.
pub(crate) fn validate(grid: &Grid, start: Pos, end: Pos) -> Result<(usize, usize), SearchError> {
    let checked = match (grid.index(start), grid.index(end)) {
        (None, _) => Err(EndpointFault::StartOutOfBounds(start)),
        (_, None) => Err(EndpointFault::EndOutOfBounds(end)),
        _ if start == end => Err(EndpointFault::Same(start)),
        (Some(si), Some(ei)) => {
            if grid.state(start) == Some(CellState::Wall) {
                Err(EndpointFault::StartIsWall(start))
            } else if grid.state(end) == Some(CellState::Wall) {
                Err(EndpointFault::EndIsWall(end))
            } else {
                Ok((si, ei))
            }
        }
    };
    let indices = checked.inspect_err(|fault| log::warn!("search rejected: {fault}"))?;
    if grid.neighbors_stale() {
        log::warn!("search rejected: stale adjacency");
        return Err(SearchError::StaleNeighbors);
    }
    Ok(indices)
}

/// Tags owned by one run. The endpoints keep whatever tag the caller gave
/// them; every other cell is retagged freely.
pub(crate) struct Marker {
    pub(crate) start: Pos,
    pub(crate) end: Pos,
}

impl Marker {
    #[inline]
    pub(crate) fn mark(&self, grid: &mut Grid, p: Pos, state: CellState) {
        if p != self.start && p != self.end {
            grid.set_state(p, state);
        }
    }
}
