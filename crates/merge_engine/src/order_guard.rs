//! Per-source ordering validation.

use contracts::{LogEntry, OrderingPolicy, SortKey};
use tracing::warn;

use crate::error::{MergeError, Result};

/// Tracks the newest sort key seen from every source
///
/// Under `OrderingPolicy::Trust` the guard checks nothing.
#[derive(Debug, Clone)]
pub struct OrderGuard {
    policy: OrderingPolicy,
    newest: Vec<Option<SortKey>>,
    violations: u64,
}

impl OrderGuard {
    /// Create a guard for `source_count` sources
    pub fn new(policy: OrderingPolicy, source_count: usize) -> Self {
        let newest = match policy {
            OrderingPolicy::Trust => Vec::new(),
            OrderingPolicy::Warn | OrderingPolicy::Reject => vec![None; source_count],
        };
        Self {
            policy,
            newest,
            violations: 0,
        }
    }

    /// Validate the next entry pulled from `source_index`
    ///
    /// # Errors
    /// `MergeError::OutOfOrder` under `OrderingPolicy::Reject`.
    pub fn check(&mut self, source_index: usize, entry: &LogEntry) -> Result<()> {
        let Some(slot) = self.newest.get_mut(source_index) else {
            return Ok(());
        };

        let current = entry.sort_key();
        match *slot {
            Some(previous) if current < previous => {
                self.violations += 1;
                observability::record_out_of_order(source_index);

                if self.policy == OrderingPolicy::Reject {
                    return Err(MergeError::OutOfOrder {
                        source_index,
                        previous,
                        current,
                    });
                }
                warn!(
                    source_index,
                    previous,
                    current,
                    date = %entry.date,
                    "source yielded an entry older than its predecessor"
                );
            }
            _ => *slot = Some(current),
        }
        Ok(())
    }

    /// Violations seen so far
    pub fn violations(&self) -> u64 {
        self.violations
    }
}
