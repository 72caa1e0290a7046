use pathviz_core::Pos;

/// A found path, start→end, both endpoints included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Pos>,
}

impl Path {
    pub(crate) fn new(cells: Vec<Pos>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of edges; every edge costs 1.
    #[inline]
    pub fn cost(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Pos> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Pos> {
        self.cells.last().copied()
    }

    pub fn into_cells(self) -> Vec<Pos> {
        self.cells
    }
}

/// Result of a search that was allowed to start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The end was reached; the path is tagged in the grid and returned.
    Found(Path),
    /// The frontier emptied without reaching the end.
    Unreachable,
    /// The observer asked to stop before the end was reached.
    Cancelled,
}

impl Outcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Outcome::Found(p) => Some(p),
            _ => None,
        }
    }
}
