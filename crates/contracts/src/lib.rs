//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: the log entry
//! type, the source and printer traits, configuration structures and the unified
//! collaborator error. Business crates depend on this crate, never the reverse.
//!
//! ## Time Model
//! - Entries carry a UTC timestamp (`chrono::DateTime<Utc>`)
//! - Ordering uses [`LogEntry::sort_key`], epoch nanoseconds as `i128`

mod blueprint;
mod entry;
mod error;
mod merge_config;
mod printer;
mod source;

pub use blueprint::*;
pub use entry::{LogEntry, SortKey};
pub use error::*;
pub use merge_config::*;
pub use printer::Printer;
pub use source::{AsyncLogSource, LocalAsyncLogSource, LogSource};
