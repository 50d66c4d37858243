//! LogEntry - source output, merger input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric ordering key of a timestamp (epoch nanoseconds)
pub type SortKey = i128;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// A single timestamped log entry
///
/// Produced by a source, owned by the merger between pull and emission, then
/// handed to the printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entry timestamp (UTC)
    pub date: DateTime<Utc>,

    /// Opaque message payload
    pub msg: String,
}

impl LogEntry {
    /// Create a new entry
    pub fn new(date: DateTime<Utc>, msg: impl Into<String>) -> Self {
        Self {
            date,
            msg: msg.into(),
        }
    }

    /// Total ordering key for the merge heap
    ///
    /// Seconds and sub-second nanos are combined in `i128`, so every
    /// representable `DateTime<Utc>` maps to a distinct, comparable value.
    #[inline]
    pub fn sort_key(&self) -> SortKey {
        self.date.timestamp() as i128 * NANOS_PER_SEC + self.date.timestamp_subsec_nanos() as i128
    }
}
