use std::collections::BinaryHeap;

use pathviz_core::Pos;

/// A priority-queue entry, ordered by `key` then by insertion sequence.
///
/// Cells have no natural order, so the sequence number gives equal keys a
/// deterministic first-inserted-wins order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    pub(crate) key: i32,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
    pub(crate) pos: Pos,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (key, seq) first.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier with queued-membership tracking.
///
/// Lowering the key of a queued cell pushes a second entry instead of
/// updating in place; the superseded entry is skipped when it surfaces.
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    queued: Vec<bool>,
    keys: Vec<i32>,
    counter: u64,
}

impl Frontier {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            queued: vec![false; len],
            keys: vec![0; len],
            counter: 0,
        }
    }

    #[inline]
    pub(crate) fn is_queued(&self, idx: usize) -> bool {
        self.queued[idx]
    }

    pub(crate) fn push(&mut self, idx: usize, pos: Pos, key: i32) {
        self.counter += 1;
        self.queued[idx] = true;
        self.keys[idx] = key;
        self.heap.push(Entry {
            key,
            seq: self.counter,
            idx,
            pos,
        });
    }

    /// Pop the live entry with the smallest key and drop it from the queued
    /// set.
    pub(crate) fn pop(&mut self) -> Option<Entry> {
        while let Some(e) = self.heap.pop() {
            if !self.queued[e.idx] || self.keys[e.idx] != e.key {
                continue;
            }
            self.queued[e.idx] = false;
            return Some(e);
        }
        None
    }
}
