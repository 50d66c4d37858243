//! Merge engine configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};

/// Default look-ahead buffer capacity per async source
pub const DEFAULT_LOOKAHEAD_CAPACITY: usize = 5;

/// Merge engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Entries buffered or in flight per async source (must be >= 1)
    #[serde(default = "default_lookahead_capacity")]
    pub lookahead_capacity: usize,

    /// What to do when a source goes backwards in time
    #[serde(default)]
    pub ordering: OrderingPolicy,
}

fn default_lookahead_capacity() -> usize {
    DEFAULT_LOOKAHEAD_CAPACITY
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            lookahead_capacity: DEFAULT_LOOKAHEAD_CAPACITY,
            ordering: OrderingPolicy::default(),
        }
    }
}

/// Handling of entries older than their source's previous entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Sources are trusted; nothing is checked
    #[default]
    Trust,
    /// Log and count violations, keep merging
    Warn,
    /// Abort the run on the first violation
    Reject,
}

/// Draining protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Immediate pulls, no concurrency
    Sync,
    /// Latent pulls overlapped through look-ahead buffers
    #[default]
    Async,
}

impl MergeMode {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}
