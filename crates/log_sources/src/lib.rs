//! # Log Sources
//!
//! Concrete log entry sources used by the CLI, demos and tests.
//!
//! - `RandomLogSource`: random walk forward in time from 40-60 days ago until now,
//!   with optional simulated fetch latency
//! - `VecLogSource`: fixed list, no latency
//! - `DelayedLogSource`: fixed list, fixed latency per entry
//! - `FailingLogSource`: fixed list, then a fetch error
//!
//! ## Usage Example
//!
//! ```ignore
//! use log_sources::RandomLogSource;
//!
//! let sources = RandomLogSource::from_config(&blueprint.sources);
//! let report = AsyncMerger::new(blueprint.merge).merge(sources, &mut printer).await?;
//! ```

mod fixed;
mod random;

// Re-exports
pub use contracts::{AsyncLogSource, LogEntry, LogSource};
pub use fixed::{DelayedLogSource, FailingLogSource, VecLogSource};
pub use random::RandomLogSource;
