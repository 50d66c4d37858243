//! Bounded look-ahead reader over an asynchronous source.
//!
//! A producer task pulls from the source ahead of consumption and parks the
//! results in a bounded channel. A channel slot is reserved *before* each fetch,
//! so buffered plus in-flight entries never exceed the capacity, and the source
//! never sees more than one outstanding `pop_async`.

use contracts::{AsyncLogSource, ContractError, LogEntry};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::error::{MergeError, Result};

type Fetched = std::result::Result<LogEntry, ContractError>;

/// Index-tagged reader with a fixed-capacity look-ahead buffer
#[derive(Debug)]
pub struct LookaheadReader {
    source_index: usize,
    rx: mpsc::Receiver<Fetched>,
    producer: Option<JoinHandle<()>>,
    exhausted: bool,
}

impl LookaheadReader {
    /// Wrap `source` and start prefetching immediately
    ///
    /// Must be called inside a tokio runtime. A capacity of 0 is treated as 1.
    pub fn spawn<S>(source_index: usize, source: S, capacity: usize) -> Self
    where
        S: AsyncLogSource + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let producer = tokio::spawn(prefetch(source_index, source, tx));

        Self {
            source_index,
            rx,
            producer: Some(producer),
            exhausted: false,
        }
    }

    /// Position of the wrapped source in the input list
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Entries fetched but not yet read
    pub fn buffered(&self) -> usize {
        self.rx.len()
    }

    /// Whether the next `read` has to wait for the source
    ///
    /// True when nothing is buffered and the producer is still running.
    pub fn would_wait(&self) -> bool {
        !self.exhausted && self.rx.is_empty() && !self.rx.is_closed()
    }

    /// Whether the source has been fully drained (or failed)
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Read the next entry, waiting for the source if nothing is buffered
    ///
    /// Returns `Ok(None)` once the source is exhausted, on every later call too.
    ///
    /// # Errors
    /// - `MergeError::SourceFailed` when the source's fetch failed
    /// - `MergeError::SourceTaskFailed` when the producer task panicked
    pub async fn read(&mut self) -> Result<Option<LogEntry>> {
        if self.exhausted {
            return Ok(None);
        }

        match self.rx.recv().await {
            Some(Ok(entry)) => Ok(Some(entry)),
            Some(Err(source)) => {
                self.exhausted = true;
                Err(MergeError::SourceFailed {
                    source_index: self.source_index,
                    source,
                })
            }
            None => {
                self.exhausted = true;
                self.join_producer().await?;
                Ok(None)
            }
        }
    }

    async fn join_producer(&mut self) -> Result<()> {
        if let Some(producer) = self.producer.take() {
            producer.await.map_err(|e| MergeError::SourceTaskFailed {
                source_index: self.source_index,
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl Drop for LookaheadReader {
    fn drop(&mut self) {
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
    }
}

async fn prefetch<S: AsyncLogSource>(
    source_index: usize,
    mut source: S,
    tx: mpsc::Sender<Fetched>,
) {
    debug!(source_index, capacity = tx.max_capacity(), "look-ahead producer started");

    loop {
        let Ok(permit) = tx.reserve().await else {
            debug!(source_index, "look-ahead reader dropped");
            return;
        };

        match source.pop_async().await {
            Ok(Some(entry)) => {
                trace!(source_index, date = %entry.date, "prefetched entry");
                permit.send(Ok(entry));
            }
            Ok(None) => {
                debug!(source_index, "source exhausted");
                return;
            }
            Err(e) => {
                debug!(source_index, error = %e, "source fetch failed");
                permit.send(Err(e));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn entry_at(secs: i64) -> LogEntry {
        LogEntry::new(Utc.timestamp_opt(secs, 0).unwrap(), format!("t={secs}"))
    }

    struct CountingSource {
        entries: VecDeque<LogEntry>,
        pops: Arc<AtomicUsize>,
        fail_when_drained: bool,
    }

    impl CountingSource {
        fn new(count: i64, pops: Arc<AtomicUsize>) -> Self {
            Self {
                entries: (0..count).map(entry_at).collect(),
                pops,
                fail_when_drained: false,
            }
        }
    }

    impl AsyncLogSource for CountingSource {
        async fn pop_async(&mut self) -> std::result::Result<Option<LogEntry>, ContractError> {
            self.pops.fetch_add(1, Ordering::SeqCst);
            match self.entries.pop_front() {
                Some(entry) => Ok(Some(entry)),
                None if self.fail_when_drained => {
                    Err(ContractError::source_fetch("counting", "connection reset"))
                }
                None => Ok(None),
            }
        }
    }

    struct PanickingSource;

    impl AsyncLogSource for PanickingSource {
        async fn pop_async(&mut self) -> std::result::Result<Option<LogEntry>, ContractError> {
            panic!("source blew up");
        }
    }

    #[tokio::test]
    async fn test_reads_in_order_then_stays_exhausted() {
        let pops = Arc::new(AtomicUsize::new(0));
        let mut reader = LookaheadReader::spawn(3, CountingSource::new(3, pops), 5);
        assert_eq!(reader.source_index(), 3);

        for secs in 0..3 {
            assert_eq!(reader.read().await.unwrap(), Some(entry_at(secs)));
        }
        assert_eq!(reader.read().await.unwrap(), None);
        assert!(reader.is_exhausted());
        assert_eq!(reader.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_prefetch_bounded_by_capacity() {
        let pops = Arc::new(AtomicUsize::new(0));
        let mut reader = LookaheadReader::spawn(0, CountingSource::new(100, pops.clone()), 5);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(pops.load(Ordering::SeqCst), 5);
        assert_eq!(reader.buffered(), 5);

        assert_eq!(reader.read().await.unwrap(), Some(entry_at(0)));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(pops.load(Ordering::SeqCst), 6);
        assert_eq!(reader.buffered(), 5);
    }

    #[tokio::test]
    async fn test_would_wait_tracks_buffer_and_closure() {
        let pops = Arc::new(AtomicUsize::new(0));
        let mut reader = LookaheadReader::spawn(0, CountingSource::new(2, pops), 5);

        tokio::time::sleep(Duration::from_millis(20)).await;
        // Both entries buffered and the producer has finished.
        assert!(!reader.would_wait());

        reader.read().await.unwrap();
        reader.read().await.unwrap();
        assert!(!reader.would_wait());
        assert_eq!(reader.read().await.unwrap(), None);
        assert!(!reader.would_wait());
    }

    #[tokio::test]
    async fn test_zero_capacity_treated_as_one() {
        let pops = Arc::new(AtomicUsize::new(0));
        let mut reader = LookaheadReader::spawn(0, CountingSource::new(10, pops.clone()), 0);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(pops.load(Ordering::SeqCst), 1);
        assert_eq!(reader.read().await.unwrap(), Some(entry_at(0)));
    }

    #[tokio::test]
    async fn test_fetch_error_surfaces_after_buffered_entries() {
        let pops = Arc::new(AtomicUsize::new(0));
        let mut source = CountingSource::new(2, pops);
        source.fail_when_drained = true;
        let mut reader = LookaheadReader::spawn(7, source, 5);

        assert!(reader.read().await.unwrap().is_some());
        assert!(reader.read().await.unwrap().is_some());

        let err = reader.read().await.unwrap_err();
        assert!(matches!(
            err,
            MergeError::SourceFailed {
                source_index: 7,
                source: ContractError::SourceFetch { .. }
            }
        ));
        assert_eq!(reader.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_producer_panic_is_reported() {
        let mut reader = LookaheadReader::spawn(1, PanickingSource, 5);
        let err = reader.read().await.unwrap_err();
        assert!(matches!(
            err,
            MergeError::SourceTaskFailed {
                source_index: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_drop_stops_prefetching() {
        let pops = Arc::new(AtomicUsize::new(0));
        let reader = LookaheadReader::spawn(0, CountingSource::new(100, pops.clone()), 2);
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(reader);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(pops.load(Ordering::SeqCst), 2);
    }
}
