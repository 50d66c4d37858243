//! # Merge Engine
//!
//! K-way streaming merge of independently ordered log sources.
//!
//! Responsibilities:
//! - Binary min-heap keyed by entry timestamp (`MinHeap`)
//! - Synchronous draining of immediately available sources (`SyncMerger`)
//! - Asynchronous draining with bounded per-source look-ahead (`AsyncMerger`)
//! - Optional per-source ordering validation (`OrderGuard`)
//!
//! Both mergers keep exactly one pending candidate per live source in the heap,
//! so an entry is emitted as soon as it is provably the global minimum.
//!
//! ## Usage Example
//!
//! ```ignore
//! use merge_engine::{AsyncMerger, MergeConfig};
//!
//! let merger = AsyncMerger::new(MergeConfig::default());
//! let report = merger.merge(sources, &mut printer).await?;
//! println!("emitted {} entries", report.emitted);
//! ```

mod async_merge;
mod error;
mod frontier;
mod heap;
mod lookahead;
mod order_guard;
mod report;
mod sync_merge;

pub use async_merge::AsyncMerger;
pub use error::{MergeError, Result};
pub use heap::{HeapNode, MinHeap};
pub use lookahead::LookaheadReader;
pub use order_guard::OrderGuard;
pub use report::MergeReport;
pub use sync_merge::SyncMerger;

// Re-export contracts types
pub use contracts::{
    AsyncLogSource, LogEntry, LogSource, MergeConfig, MergeMode, OrderingPolicy, Printer,
    SortKey,
};
