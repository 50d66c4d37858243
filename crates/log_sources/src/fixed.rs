//! Fixed-content sources
//!
//! Serve a prepared list of entries, optionally with a delay per fetch or a
//! fetch failure once the list runs out.

use std::collections::VecDeque;
use std::time::Duration;

use contracts::{AsyncLogSource, ContractError, LogEntry, LogSource};
use tracing::trace;

/// Source backed by an in-memory list
#[derive(Debug, Clone, Default)]
pub struct VecLogSource {
    entries: VecDeque<LogEntry>,
}

impl VecLogSource {
    /// Create a source serving `entries` in the given order
    pub fn new(entries: impl IntoIterator<Item = LogEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Entries not yet served
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl LogSource for VecLogSource {
    fn pop(&mut self) -> Option<LogEntry> {
        self.entries.pop_front()
    }
}

impl AsyncLogSource for VecLogSource {
    async fn pop_async(&mut self) -> Result<Option<LogEntry>, ContractError> {
        Ok(self.entries.pop_front())
    }
}

/// List-backed source that waits a fixed latency before every fetch
#[derive(Debug, Clone)]
pub struct DelayedLogSource {
    inner: VecLogSource,
    latency: Duration,
}

impl DelayedLogSource {
    pub fn new(entries: impl IntoIterator<Item = LogEntry>, latency: Duration) -> Self {
        Self {
            inner: VecLogSource::new(entries),
            latency,
        }
    }
}

impl AsyncLogSource for DelayedLogSource {
    async fn pop_async(&mut self) -> Result<Option<LogEntry>, ContractError> {
        tokio::time::sleep(self.latency).await;
        let next = self.inner.pop();
        trace!(remaining = self.inner.remaining(), "delayed fetch resolved");
        Ok(next)
    }
}

/// List-backed source whose fetch fails after the list is served
#[derive(Debug, Clone)]
pub struct FailingLogSource {
    id: String,
    inner: VecLogSource,
}

impl FailingLogSource {
    pub fn new(id: impl Into<String>, entries: impl IntoIterator<Item = LogEntry>) -> Self {
        Self {
            id: id.into(),
            inner: VecLogSource::new(entries),
        }
    }
}

impl AsyncLogSource for FailingLogSource {
    async fn pop_async(&mut self) -> Result<Option<LogEntry>, ContractError> {
        match self.inner.pop() {
            Some(entry) => Ok(Some(entry)),
            None => Err(ContractError::source_fetch(&self.id, "upstream went away")),
        }
    }
}
