use pathviz_core::{Grid, Pos};

use crate::astar::best_first;
use crate::error::SearchError;
use crate::observer::Observer;
use crate::outcome::Outcome;

/// Find a shortest path from `start` to `end` with Dijkstra's algorithm.
///
/// Same frontier and tagging as [`astar`](crate::astar) but keyed on
/// cost-so-far alone. On a unit-cost grid the result length matches BFS;
/// the expansion order differs only in how ties are queued.
pub fn dijkstra<O: Observer + ?Sized>(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    observer: &mut O,
) -> Result<Outcome, SearchError> {
    best_first(grid, start, end, observer, "dijkstra", |_| 0)
}
