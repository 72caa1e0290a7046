use std::fmt;

use pathviz_core::Pos;

/// Why a start/end pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    /// No start given (e.g. a board without one).
    MissingStart,
    /// No end given.
    MissingEnd,
    StartOutOfBounds(Pos),
    EndOutOfBounds(Pos),
    /// Start and end are the same cell.
    Same(Pos),
    StartIsWall(Pos),
    EndIsWall(Pos),
}

impl fmt::Display for EndpointFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "no start cell"),
            Self::MissingEnd => write!(f, "no end cell"),
            Self::StartOutOfBounds(p) => write!(f, "start {p} is outside the grid"),
            Self::EndOutOfBounds(p) => write!(f, "end {p} is outside the grid"),
            Self::Same(p) => write!(f, "start and end are both {p}"),
            Self::StartIsWall(p) => write!(f, "start {p} is a wall"),
            Self::EndIsWall(p) => write!(f, "end {p} is a wall"),
        }
    }
}

/// Errors that prevent a search from starting. The grid is never modified
/// when one of these is returned.
///
/// An unreachable end or a cancelled run is not an error; see
/// [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    InvalidEndpoints(EndpointFault),
    /// Walls changed since the last `rebuild_neighbors`, or it never ran.
    StaleNeighbors,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoints(fault) => write!(f, "invalid endpoints: {fault}"),
            Self::StaleNeighbors => {
                write!(f, "grid adjacency is stale; rebuild neighbors before searching")
            }
        }
    }
}

impl std::error::Error for SearchError {}

impl From<EndpointFault> for SearchError {
    fn from(fault: EndpointFault) -> Self {
        Self::InvalidEndpoints(fault)
    }
}
