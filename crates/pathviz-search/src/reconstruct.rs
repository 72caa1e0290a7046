//! Path reconstruction from a predecessor map.

use std::iter::FusedIterator;

use pathviz_core::{CellState, Grid, Pos};

use crate::observer::{Observer, Step};
use crate::outcome::Path;
use crate::run::{CameFrom, Marker};

/// Lazy walk over a [`CameFrom`] chain, from the goal back to the cell with
/// no predecessor.
///
/// The walk is bounded by the map's capacity, so a corrupted map with a
/// cycle still terminates.
pub struct PathIter<'a> {
    came_from: &'a CameFrom,
    next: Option<Pos>,
    remaining: usize,
}

/// Walk `came_from` from `end`. Yields `end` first and the chain's root
/// (the search start) last. If `end` was never reached the iterator yields
/// only `end`.
pub fn reconstruct(came_from: &CameFrom, end: Pos) -> PathIter<'_> {
    PathIter {
        came_from,
        next: Some(end),
        remaining: came_from.capacity().max(1),
    }
}

impl Iterator for PathIter<'_> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.came_from.get(current);
        Some(current)
    }
}

impl FusedIterator for PathIter<'_> {}

/// Tag the path between the run's endpoints as Path, yielding to the
/// observer after each tag, and return it in start→end order.
///
/// The end has already been reached at this point, so an observer that asks
/// to cancel only stops being called; the path is still completed.
pub(crate) fn mark_path<O: Observer + ?Sized>(
    grid: &mut Grid,
    came_from: &CameFrom,
    marker: &Marker,
    observer: &mut O,
) -> Path {
    let mut cells = Vec::new();
    let mut watching = true;
    for p in reconstruct(came_from, marker.end) {
        cells.push(p);
        if p == marker.start || p == marker.end {
            continue;
        }
        marker.mark(grid, p, CellState::Path);
        if watching && observer.observe(Step::Path(p), grid).is_cancel() {
            log::debug!("observer stopped watching the path at {p}");
            watching = false;
        }
    }
    cells.reverse();
    Path::new(cells)
}
