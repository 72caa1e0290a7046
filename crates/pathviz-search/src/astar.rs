use pathviz_core::{CellState, Grid, Pos};

use crate::distance::manhattan;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::observer::{Observer, Step};
use crate::outcome::Outcome;
use crate::reconstruct::mark_path;
use crate::run::{CameFrom, Marker, UNREACHABLE, validate};

/// Find a shortest path from `start` to `end` with A*, keyed on
/// `g + manhattan(cell, end)`.
///
/// Cells are tagged Frontier when queued and Visited once expanded; the
/// observer is called after every expansion and every path cell. On success
/// leftover Frontier cells are demoted to Visited, the path is tagged and
/// `end` is tagged End.
pub fn astar<O: Observer + ?Sized>(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    observer: &mut O,
) -> Result<Outcome, SearchError> {
    best_first(grid, start, end, observer, "astar", |p| manhattan(p, end))
}

/// Shared skeleton of A* and Dijkstra: a priority frontier ordered by
/// `g + estimate(cell)`, ties broken by insertion order.
pub(crate) fn best_first<O, H>(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    observer: &mut O,
    name: &str,
    estimate: H,
) -> Result<Outcome, SearchError>
where
    O: Observer + ?Sized,
    H: Fn(Pos) -> i32,
{
    let (start_idx, _) = validate(grid, start, end)?;
    log::debug!("{name}: searching {start} -> {end}");

    let len = grid.len();
    let marker = Marker { start, end };
    let mut g_score = vec![UNREACHABLE; len];
    let mut came_from = CameFrom::new(grid);
    let mut open = Frontier::new(len);

    g_score[start_idx] = 0;
    open.push(start_idx, start, estimate(start));

    let mut nbuf: Vec<Pos> = Vec::with_capacity(4);
    let mut expanded = 0usize;

    while let Some(current) = open.pop() {
        let cp = current.pos;

        if cp == end {
            grid.replace_all(CellState::Frontier, CellState::Visited);
            let path = mark_path(grid, &came_from, &marker, observer);
            grid.set_state(end, CellState::End);
            log::debug!(
                "{name}: found {} edge path after {expanded} expansions",
                path.cost()
            );
            return Ok(Outcome::Found(path));
        }

        let current_g = g_score[current.idx];
        nbuf.clear();
        nbuf.extend_from_slice(grid.neighbors(cp));

        for &np in nbuf.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            let tentative_g = current_g + 1;
            if tentative_g >= g_score[ni] {
                continue;
            }
            came_from.insert(np, cp);
            g_score[ni] = tentative_g;
            let queued = open.is_queued(ni);
            open.push(ni, np, tentative_g + estimate(np));
            if !queued {
                marker.mark(grid, np, CellState::Frontier);
            }
        }

        expanded += 1;
        log::trace!("{name}: expanded {cp} at g={current_g}");
        if observer.observe(Step::Expanded(cp), grid).is_cancel() {
            log::debug!("{name}: cancelled after {expanded} expansions");
            return Ok(Outcome::Cancelled);
        }
        marker.mark(grid, cp, CellState::Visited);
    }

    log::debug!("{name}: {end} unreachable after {expanded} expansions");
    Ok(Outcome::Unreachable)
}
