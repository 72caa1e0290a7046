use std::collections::VecDeque;

use pathviz_core::{CellState, Grid, Pos};

use crate::error::SearchError;
use crate::observer::{Observer, Step};
use crate::outcome::Outcome;
use crate::reconstruct::mark_path;
use crate::run::{CameFrom, Marker, validate};

/// Find a shortest path (by hop count) from `start` to `end` with
/// breadth-first search.
///
/// Each cell is queued at most once, the first time it is discovered, and
/// tagged Frontier; dequeued cells are tagged Visited after the observer
/// has seen them. Unlike the priority searches, Frontier cells left over
/// when the end is reached keep their tag.
pub fn bfs<O: Observer + ?Sized>(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    observer: &mut O,
) -> Result<Outcome, SearchError> {
    let (start_idx, _) = validate(grid, start, end)?;
    log::debug!("bfs: searching {start} -> {end}");

    let marker = Marker { start, end };
    let mut seen = vec![false; grid.len()];
    let mut came_from = CameFrom::new(grid);
    let mut queue: VecDeque<Pos> = VecDeque::new();

    seen[start_idx] = true;
    queue.push_back(start);

    let mut nbuf: Vec<Pos> = Vec::with_capacity(4);
    let mut expanded = 0usize;

    while let Some(cp) = queue.pop_front() {
        if cp == end {
            let path = mark_path(grid, &came_from, &marker, observer);
            grid.set_state(end, CellState::End);
            log::debug!(
                "bfs: found {} edge path after {expanded} expansions",
                path.cost()
            );
            return Ok(Outcome::Found(path));
        }

        nbuf.clear();
        nbuf.extend_from_slice(grid.neighbors(cp));

        for &np in nbuf.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if seen[ni] {
                continue;
            }
            seen[ni] = true;
            came_from.insert(np, cp);
            marker.mark(grid, np, CellState::Frontier);
            queue.push_back(np);
        }

        expanded += 1;
        log::trace!("bfs: expanded {cp}");
        if observer.observe(Step::Expanded(cp), grid).is_cancel() {
            log::debug!("bfs: cancelled after {expanded} expansions");
            return Ok(Outcome::Cancelled);
        }
        marker.mark(grid, cp, CellState::Visited);
    }

    log::debug!("bfs: {end} unreachable after {expanded} expansions");
    Ok(Outcome::Unreachable)
}
