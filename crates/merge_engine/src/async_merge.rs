//! Asynchronous K-way merge over latent sources.

use std::time::Instant;

use contracts::{AsyncLogSource, MergeConfig, MergeMode, Printer};
use futures::future::try_join_all;
use observability::{RunningStats, StatsSummary};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::frontier::Frontier;
use crate::lookahead::LookaheadReader;
use crate::report::MergeReport;

/// Merger for sources whose next entry arrives after an arbitrary latency
///
/// Every source gets a [`LookaheadReader`] that prefetches up to
/// `lookahead_capacity` entries, overlapping one source's latency with the time
/// spent on other sources' turns. The drain loop itself is sequential: one
/// pop/emit/read cycle at a time, with at most one outstanding read per source.
#[derive(Debug, Clone, Default)]
pub struct AsyncMerger {
    config: MergeConfig,
}

impl AsyncMerger {
    /// Create a new merger
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Drain every source into `printer` in global timestamp order
    ///
    /// The first read of every source is issued concurrently and joined before
    /// anything is emitted. Afterwards each emission is followed by exactly one
    /// awaited read on the emitting source.
    ///
    /// # Errors
    /// - `MergeError::SourceFailed` / `MergeError::SourceTaskFailed` when any
    ///   source fails; entries already printed stay printed and `done` is not called
    /// - `MergeError::OutOfOrder` under `OrderingPolicy::Reject`
    #[instrument(
        name = "async_merge",
        skip_all,
        fields(
            sources = sources.len(),
            lookahead = self.config.lookahead_capacity,
            ordering = ?self.config.ordering
        )
    )]
    pub async fn merge<S, P>(&self, sources: Vec<S>, printer: &mut P) -> Result<MergeReport>
    where
        S: AsyncLogSource + 'static,
        P: Printer + ?Sized,
    {
        let started = Instant::now();
        let source_count = sources.len();
        let capacity = self.config.lookahead_capacity;

        let mut readers: Vec<LookaheadReader> = sources
            .into_iter()
            .enumerate()
            .map(|(source_index, source)| LookaheadReader::spawn(source_index, source, capacity))
            .collect();
        let mut frontier = Frontier::new(self.config.ordering, source_count);

        // Fan out one read per source, then join.
        let firsts = try_join_all(readers.iter_mut().map(|reader| reader.read())).await?;
        for (source_index, first) in firsts.into_iter().enumerate() {
            if let Some(entry) = first {
                frontier.offer(source_index, entry)?;
            }
        }
        debug!(live_sources = frontier.len(), "initial candidates queued");

        let mut emitted: u64 = 0;
        let mut read_wait = RunningStats::default();
        let mut read_stalls: u64 = 0;

        while let Some(node) = frontier.take() {
            let source_index = node.source_index;
            printer.print(node.entry);
            emitted += 1;
            observability::record_entry_emitted(MergeMode::Async);

            let reader = &mut readers[source_index];
            if reader.would_wait() {
                read_stalls += 1;
                observability::record_read_stall(source_index);
            }
            let wait_started = Instant::now();
            let next = reader.read().await?;
            let waited_ms = wait_started.elapsed().as_secs_f64() * 1000.0;
            read_wait.push(waited_ms);
            observability::record_read_wait_ms(waited_ms);

            match next {
                Some(entry) => frontier.offer(source_index, entry)?,
                None => debug!(source_index, "source exhausted"),
            }
            observability::record_heap_depth(frontier.len());
        }

        printer.done();

        let report = MergeReport {
            mode: MergeMode::Async,
            sources: source_count,
            emitted,
            out_of_order: frontier.violations(),
            elapsed: started.elapsed(),
            read_wait_ms: StatsSummary::from(&read_wait),
            read_stalls,
        };
        observability::record_merge_completed(MergeMode::Async, report.emitted, report.elapsed);
        info!(
            emitted = report.emitted,
            out_of_order = report.out_of_order,
            elapsed_ms = report.elapsed.as_millis() as u64,
            mean_read_wait_ms = report.read_wait_ms.mean,
            read_stalls = report.read_stalls,
            "async merge complete"
        );

        Ok(report)
    }
}
