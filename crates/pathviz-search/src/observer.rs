//! The progress-observer contract.
//!
//! Searches hand control back to the caller only through an [`Observer`]:
//! once after each expanded cell and once after each reconstructed path
//! cell. Cancellation is cooperative and checked only at those points.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pathviz_core::{Grid, Pos};

/// What the search just did before yielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `Pos` was taken off the frontier and its neighbours processed.
    Expanded(Pos),
    /// `Pos` was tagged as part of the path.
    Path(Pos),
}

/// Observer verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Continue,
    Cancel,
}

impl Flow {
    #[inline]
    pub fn is_cancel(self) -> bool {
        self == Flow::Cancel
    }
}

/// Receives a frame after every search step.
///
/// The grid is passed read-only so the observer can render it.
pub trait Observer {
    fn observe(&mut self, step: Step, grid: &Grid) -> Flow;
}

impl<F: FnMut(Step, &Grid) -> Flow> Observer for F {
    #[inline]
    fn observe(&mut self, step: Step, grid: &Grid) -> Flow {
        self(step, grid)
    }
}

/// An observer that never renders and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl Observer for Unobserved {
    #[inline]
    fn observe(&mut self, _step: Step, _grid: &Grid) -> Flow {
        Flow::Continue
    }
}

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// A cooperative-cancellation flag backed by an [`AtomicBool`].
///
/// Clones share the flag, so one clone can be handed to an input handler
/// (or another thread) while another is passed to the search as its
/// observer.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    done: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Observer for CancelToken {
    fn observe(&mut self, _step: Step, _grid: &Grid) -> Flow {
        if self.is_cancelled() {
            Flow::Cancel
        } else {
            Flow::Continue
        }
    }
}
