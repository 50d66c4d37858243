//! Candidate set shared by both mergers: one pulled entry per live source.

use contracts::{LogEntry, OrderingPolicy};
use tracing::trace;

use crate::error::Result;
use crate::heap::{HeapNode, MinHeap};
use crate::order_guard::OrderGuard;

#[derive(Debug)]
pub(crate) struct Frontier {
    heap: MinHeap<HeapNode>,
    guard: OrderGuard,
}

impl Frontier {
    pub(crate) fn new(policy: OrderingPolicy, source_count: usize) -> Self {
        Self {
            heap: MinHeap::with_capacity(source_count),
            guard: OrderGuard::new(policy, source_count),
        }
    }

    /// Queue the next candidate of `source_index`
    pub(crate) fn offer(&mut self, source_index: usize, entry: LogEntry) -> Result<()> {
        self.guard.check(source_index, &entry)?;
        let key = entry.sort_key();
        trace!(source_index, key, "candidate queued");
        self.heap.push(
            HeapNode {
                entry,
                source_index,
            },
            key,
        );
        Ok(())
    }

    /// Take the globally smallest candidate
    pub(crate) fn take(&mut self) -> Option<HeapNode> {
        self.heap.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn violations(&self) -> u64 {
        self.guard.violations()
    }
}
