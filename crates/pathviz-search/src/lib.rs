//! Observable shortest-path search on pathviz grids.
//!
//! Three interchangeable algorithms operate on a [`Grid`](pathviz_core::Grid)
//! whose adjacency has been rebuilt:
//!
//! - **BFS** with a FIFO frontier ([`bfs`])
//! - **Dijkstra** keyed on cost-so-far ([`dijkstra`])
//! - **A\*** keyed on cost-so-far plus Manhattan distance ([`astar`])
//!
//! Every algorithm tags cells in place (Frontier, Visited, Path) and calls an
//! [`Observer`] after each expanded cell and after each reconstructed path
//! cell, which is where a caller renders a frame and may ask to stop. The
//! [`Algorithm`] enum selects one at run time.
//!
//! # Outcomes
//!
//! | Result | Meaning |
//! |---|---|
//! | `Ok(Outcome::Found(path))` | path tagged in place and returned start→end |
//! | `Ok(Outcome::Unreachable)` | frontier exhausted |
//! | `Ok(Outcome::Cancelled)` | observer asked to stop |
//! | `Err(SearchError)` | bad endpoints or stale adjacency, grid untouched |

mod algorithm;
mod astar;
mod bfs;
mod dijkstra;
mod distance;
mod error;
mod frontier;
mod observer;
mod outcome;
mod reconstruct;
mod run;
#[cfg(test)]
mod test_support;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use astar::astar;
pub use bfs::bfs;
pub use dijkstra::dijkstra;
pub use distance::manhattan;
pub use error::{EndpointFault, SearchError};
pub use observer::{CancelToken, Flow, Observer, Step, Unobserved};
pub use outcome::{Outcome, Path};
pub use reconstruct::{PathIter, reconstruct};
pub use run::{CameFrom, UNREACHABLE};
