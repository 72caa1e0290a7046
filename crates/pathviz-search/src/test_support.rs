use pathviz_core::{CellState, Grid, Pos};

/// Parse a layout, rebuild adjacency and locate `S` and `E`.
pub(crate) fn prepared(layout: &str) -> (Grid, Pos, Pos) {
    let mut g: Grid = layout.parse().expect("test layout must parse");
    g.rebuild_neighbors();
    let s = g.find(CellState::Start).expect("layout needs S");
    let e = g.find(CellState::End).expect("layout needs E");
    (g, s, e)
}

/// A path must start at `s`, end at `e`, step orthogonally and avoid walls.
pub(crate) fn assert_walkable(g: &Grid, cells: &[Pos], s: Pos, e: Pos) {
    assert_eq!(cells.first(), Some(&s));
    assert_eq!(cells.last(), Some(&e));
    for w in cells.windows(2) {
        assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
    }
    for &p in cells {
        assert_ne!(g.state(p), Some(CellState::Wall), "path crosses wall at {p}");
    }
}
