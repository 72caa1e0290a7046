use std::fmt;
use std::str::FromStr;

use pathviz_core::{Board, Grid, Pos};

use crate::error::{EndpointFault, SearchError};
use crate::observer::Observer;
use crate::outcome::Outcome;
use crate::{astar, bfs, dijkstra};

/// Run-time choice of search algorithm. Every variant takes the same
/// inputs and honours the same tagging and observer contract.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dijkstra,
    #[default]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar];

    /// Short lowercase name, accepted back by `from_str`.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    /// Human-readable title.
    pub const fn title(self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-first Search",
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::AStar => "A* Search",
        }
    }

    /// Search `grid` from `start` to `end`. The grid's adjacency must be
    /// current.
    pub fn run<O: Observer + ?Sized>(
        self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
        observer: &mut O,
    ) -> Result<Outcome, SearchError> {
        match self {
            Algorithm::Bfs => bfs(grid, start, end, observer),
            Algorithm::Dijkstra => dijkstra(grid, start, end, observer),
            Algorithm::AStar => astar(grid, start, end, observer),
        }
    }

    /// Rebuild the board's adjacency and search between its endpoints.
    pub fn run_board<O: Observer + ?Sized>(
        self,
        board: &mut Board,
        observer: &mut O,
    ) -> Result<Outcome, SearchError> {
        let start = board.start().ok_or(EndpointFault::MissingStart)?;
        let end = board.end().ok_or(EndpointFault::MissingEnd)?;
        let grid = board.grid_mut();
        grid.rebuild_neighbors();
        self.run(grid, start, end, observer)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected bfs, dijkstra, astar or 1-3)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts names (`bfs`, `dijkstra`, `astar`/`a*`, any case) and the
    /// menu keys `1`, `2`, `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "bfs" | "breadth-first" => Ok(Algorithm::Bfs),
            "2" | "dijkstra" => Ok(Algorithm::Dijkstra),
            "3" | "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pathviz_core::{CellState, GridConfig};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::distance::manhattan;
    use crate::observer::{Flow, Step, Unobserved};
    use crate::reconstruct::reconstruct;
    use crate::run::CameFrom;
    use crate::test_support::{assert_walkable, prepared};

    /// Random layout of side `size` with roughly `density` walls and two
    /// distinct free endpoints.
    fn random_layout(rng: &mut StdRng, size: i32, density: f64) -> (Grid, Pos, Pos) {
        let mut g = Grid::new(size);
        for i in 0..g.len() {
            if rng.random_bool(density) {
                let p = g.pos_at(i);
                g.set_state(p, CellState::Wall);
            }
        }
        let free: Vec<Pos> = g.positions(CellState::Free).collect();
        let s = free[rng.random_range(0..free.len())];
        let mut e = s;
        while e == s {
            e = free[rng.random_range(0..free.len())];
        }
        g.set_state(s, CellState::Start);
        g.set_state(e, CellState::End);
        g.rebuild_neighbors();
        (g, s, e)
    }

    #[test]
    fn parse_names_and_keys() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>(), Ok(a));
            assert_eq!(a.to_string(), a.name());
        }
        assert_eq!("1".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("2".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert_eq!(" A* ".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert!("4".parse::<Algorithm>().is_err());
    }

    #[test]
    fn all_agree_on_five_by_five() {
        for a in Algorithm::ALL {
            let (mut g, s, e) = prepared(
                "\
                S....
                .....
                .....
                .....
                ....E",
            );
            let out = a.run(&mut g, s, e, &mut Unobserved).unwrap();
            let path = out.path().unwrap();
            assert_eq!(path.cost(), 8, "{a}");
            assert_eq!(path.len(), 9, "{a}");
        }
    }

    #[test]
    fn all_route_through_single_gap() {
        let expected = [
            Pos::new(0, 0),
            Pos::new(1, 0),
            Pos::new(2, 0),
            Pos::new(2, 1),
            Pos::new(2, 2),
        ];
        for a in Algorithm::ALL {
            let (mut g, s, e) = prepared("S..\n.##\n..E");
            let out = a.run(&mut g, s, e, &mut Unobserved).unwrap();
            assert_eq!(out.path().unwrap().cells(), &expected, "{a}");
        }
    }

    #[test]
    fn all_cancel_on_first_frame() {
        for a in Algorithm::ALL {
            let (mut g, s, e) = prepared("S...\n....\n....\n...E");
            let out = a.run(&mut g, s, e, &mut |_: Step, _: &Grid| Flow::Cancel);
            assert_eq!(out, Ok(Outcome::Cancelled), "{a}");
            assert_eq!(g.count(CellState::Path), 0, "{a}");
            assert_eq!(g.count(CellState::Visited), 0, "{a}");
        }
    }

    #[test]
    fn open_grids_give_manhattan_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..40 {
            let (g0, s, e) = random_layout(&mut rng, 9, 0.0);
            for a in Algorithm::ALL {
                let mut g = g0.clone();
                let out = a.run(&mut g, s, e, &mut Unobserved).unwrap();
                assert_eq!(
                    out.path().map(|p| p.cost()),
                    Some(manhattan(s, e) as usize),
                    "{a} {s} -> {e}"
                );
            }
        }
    }

    #[test]
    fn random_layouts_agree_on_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut found = 0;
        for _ in 0..200 {
            let (g0, s, e) = random_layout(&mut rng, 12, 0.3);
            let mut costs = Vec::new();
            for a in Algorithm::ALL {
                let mut g = g0.clone();
                let out = a.run(&mut g, s, e, &mut Unobserved).unwrap();
                match &out {
                    Outcome::Found(p) => {
                        assert_walkable(&g0, p.cells(), s, e);
                        assert_eq!(g.count(CellState::Path), p.len() - 2, "{a}");
                    }
                    Outcome::Unreachable => assert_eq!(g.count(CellState::Path), 0, "{a}"),
                    Outcome::Cancelled => unreachable!(),
                }
                costs.push(out.path().map(|p| p.cost()));
            }
            assert!(costs.windows(2).all(|w| w[0] == w[1]), "{costs:?}\n{g0}");
            if costs[0].is_some() {
                found += 1;
            }
        }
        assert!(found > 0);
    }

    #[test]
    fn came_from_chain_terminates_at_start() {
        let (mut g, s, e) = prepared(
            "\
            S.#..
            ..#..
            .....
            ##.#.
            ....E",
        );
        // rebuild the predecessor chain from the returned path
        let out = Algorithm::AStar.run(&mut g, s, e, &mut Unobserved).unwrap();
        let cells = out.path().unwrap().cells().to_vec();
        let mut cf = CameFrom::new(&g);
        for w in cells.windows(2) {
            cf.insert(w[1], w[0]);
        }
        let back: Vec<Pos> = reconstruct(&cf, e).collect();
        assert_eq!(back.last(), Some(&s));
        assert_eq!(back.len(), cells.len());
    }

    #[test]
    fn board_runs_between_its_endpoints() {
        let mut board = Board::new(&GridConfig { size: 6 });
        assert_eq!(
            Algorithm::Bfs.run_board(&mut board, &mut Unobserved),
            Err(SearchError::InvalidEndpoints(EndpointFault::MissingStart))
        );
        board.paint(Pos::new(0, 0)).unwrap();
        assert_eq!(
            Algorithm::Bfs.run_board(&mut board, &mut Unobserved),
            Err(SearchError::InvalidEndpoints(EndpointFault::MissingEnd))
        );
        board.paint(Pos::new(5, 5)).unwrap();
        for c in 0..5 {
            board.paint(Pos::new(3, c)).unwrap();
        }
        for a in Algorithm::ALL {
            board.reset_search();
            let out = a.run_board(&mut board, &mut Unobserved).unwrap();
            assert_eq!(out.path().unwrap().cost(), 10, "{a}");
            assert!(board.ready());
        }
    }
}
