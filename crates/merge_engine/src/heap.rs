//! Array-backed binary min-heap.
//!
//! Nodes live in a `Vec` laid out as a complete binary tree: the children of
//! slot `i` are `2i + 1` and `2i + 2`. Every node's priority is `<=` its
//! children's after each `push`/`pop`.

use std::fmt;

use contracts::{LogEntry, SortKey};

/// Heap payload used by the mergers: a pulled entry tagged with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapNode {
    /// Pulled, not yet emitted entry
    pub entry: LogEntry,
    /// Index of the producing source in the input list
    pub source_index: usize,
}

struct Slot<T, K> {
    item: T,
    priority: K,
}

/// Binary min-heap over `(item, priority)` pairs
///
/// Equal priorities carry no stability guarantee.
pub struct MinHeap<T, K = SortKey> {
    slots: Vec<Slot<T, K>>,
}

impl<T, K> fmt::Debug for MinHeap<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap")
            .field("len", &self.slots.len())
            .field("capacity", &self.slots.capacity())
            .finish()
    }
}

impl<T, K: Ord> Default for MinHeap<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Ord> MinHeap<T, K> {
    /// Create an empty heap
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create an empty heap sized for `capacity` nodes (one per source)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Insert an item, O(log n)
    #[inline]
    pub fn push(&mut self, item: T, priority: K) {
        self.slots.push(Slot { item, priority });
        self.sift_up(self.slots.len() - 1);
    }

    /// Remove and return the item with the smallest priority, O(log n)
    ///
    /// Returns `None` when empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let last = self.slots.len().checked_sub(1)?;
        self.slots.swap(0, last);
        let min = self.slots.pop()?;
        self.sift_down(0);
        Some(min.item)
    }

    /// Smallest priority currently queued
    #[inline]
    pub fn peek_priority(&self) -> Option<&K> {
        self.slots.first().map(|slot| &slot.priority)
    }

    /// Number of queued items
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.slots[index].priority >= self.slots[parent].priority {
                break;
            }
            self.slots.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.slots.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.slots[left].priority < self.slots[smallest].priority {
                smallest = left;
            }
            if right < len && self.slots[right].priority < self.slots[smallest].priority {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.slots.swap(index, smallest);
            index = smallest;
        }
    }

    #[cfg(test)]
    fn is_heap_ordered(&self) -> bool {
        (1..self.slots.len()).all(|i| self.slots[(i - 1) / 2].priority <= self.slots[i].priority)
    }
}
