//! **pathviz-core**: grid model for pathfinding visualization.
//!
//! This crate provides the types shared by the search engine and its
//! presentation layer: grid coordinates, tagged cells, a square grid with
//! cached 4-way adjacency, and an editing [`Board`] that keeps the
//! start/end bookkeeping consistent.

pub mod board;
pub mod cell;
pub mod geom;
pub mod grid;

pub use board::{Board, EditError};
pub use cell::{Cell, CellState};
pub use geom::Pos;
pub use grid::{Grid, GridConfig, LayoutError};
