//! Synchronous K-way merge over immediately available sources.

use std::time::Instant;

use contracts::{LogSource, MergeConfig, MergeMode, Printer};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::frontier::Frontier;
use crate::report::MergeReport;

/// Merger for sources whose `pop` returns immediately
#[derive(Debug, Clone, Default)]
pub struct SyncMerger {
    config: MergeConfig,
}

impl SyncMerger {
    /// Create a new merger
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Drain every source into `printer` in global timestamp order
    ///
    /// Each source is pulled once up front, then once more each time one of its
    /// entries is emitted. A source that returns `None` is never pulled again.
    /// `printer.done()` is called exactly once, after the last entry.
    ///
    /// # Errors
    /// Only `MergeError::OutOfOrder`, under `OrderingPolicy::Reject`.
    #[instrument(
        name = "sync_merge",
        skip_all,
        fields(sources = sources.len(), ordering = ?self.config.ordering)
    )]
    pub fn merge<S, P>(&self, sources: &mut [S], printer: &mut P) -> Result<MergeReport>
    where
        S: LogSource,
        P: Printer + ?Sized,
    {
        let started = Instant::now();
        let mut frontier = Frontier::new(self.config.ordering, sources.len());

        for (source_index, source) in sources.iter_mut().enumerate() {
            if let Some(entry) = source.pop() {
                frontier.offer(source_index, entry)?;
            }
        }
        debug!(live_sources = frontier.len(), "initial candidates queued");

        let mut emitted: u64 = 0;
        while let Some(node) = frontier.take() {
            let source_index = node.source_index;
            printer.print(node.entry);
            emitted += 1;
            observability::record_entry_emitted(MergeMode::Sync);

            if let Some(next) = sources[source_index].pop() {
                frontier.offer(source_index, next)?;
            } else {
                debug!(source_index, "source exhausted");
            }
        }

        printer.done();

        let report = MergeReport {
            mode: MergeMode::Sync,
            sources: sources.len(),
            emitted,
            out_of_order: frontier.violations(),
            elapsed: started.elapsed(),
            ..Default::default()
        };
        observability::record_merge_completed(MergeMode::Sync, report.emitted, report.elapsed);
        info!(
            emitted = report.emitted,
            out_of_order = report.out_of_order,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "sync merge complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MergeError;
    use chrono::{TimeZone, Utc};
    use contracts::{LogEntry, OrderingPolicy};
    use std::collections::VecDeque;

    struct ListSource {
        entries: VecDeque<LogEntry>,
        pops_after_drain: usize,
    }

    impl ListSource {
        fn new(name: &str, times: &[i64]) -> Self {
            Self {
                entries: times
                    .iter()
                    .map(|&t| LogEntry::new(Utc.timestamp_opt(t, 0).unwrap(), name))
                    .collect(),
                pops_after_drain: 0,
            }
        }
    }

    impl LogSource for ListSource {
        fn pop(&mut self) -> Option<LogEntry> {
            let next = self.entries.pop_front();
            if next.is_none() {
                self.pops_after_drain += 1;
            }
            next
        }
    }

    #[derive(Default)]
    struct RecordingPrinter {
        printed: Vec<LogEntry>,
        done_calls: usize,
    }

    impl RecordingPrinter {
        fn labels(&self) -> Vec<(i64, String)> {
            self.printed
                .iter()
                .map(|e| (e.date.timestamp(), e.msg.clone()))
                .collect()
        }
    }

    impl Printer for RecordingPrinter {
        fn print(&mut self, entry: LogEntry) {
            assert_eq!(self.done_calls, 0, "print after done");
            self.printed.push(entry);
        }

        fn done(&mut self) {
            self.done_calls += 1;
        }
    }

    #[test]
    fn test_three_source_scenario() {
        let mut sources = vec![
            ListSource::new("A", &[1, 5, 9]),
            ListSource::new("B", &[2, 3, 10]),
            ListSource::new("C", &[]),
        ];
        let mut printer = RecordingPrinter::default();

        let report = SyncMerger::default()
            .merge(&mut sources, &mut printer)
            .unwrap();

        let expected: Vec<(i64, String)> = [(1, "A"), (2, "B"), (3, "B"), (5, "A"), (9, "A"), (10, "B")]
            .into_iter()
            .map(|(t, s)| (t, s.to_string()))
            .collect();
        assert_eq!(printer.labels(), expected);
        assert_eq!(printer.done_calls, 1);
        assert_eq!(report.emitted, 6);
        assert_eq!(report.sources, 3);
        assert_eq!(report.mode, MergeMode::Sync);
    }

    #[test]
    fn test_exhausted_sources_not_polled_again() {
        let mut sources = vec![
            ListSource::new("A", &[1, 2, 3]),
            ListSource::new("B", &[]),
            ListSource::new("C", &[4]),
        ];
        let mut printer = RecordingPrinter::default();

        SyncMerger::default()
            .merge(&mut sources, &mut printer)
            .unwrap();

        assert!(sources.iter().all(|s| s.pops_after_drain == 1));
    }

    #[test]
    fn test_equal_timestamps_both_emitted() {
        let mut sources = vec![ListSource::new("A", &[5]), ListSource::new("B", &[5])];
        let mut printer = RecordingPrinter::default();

        SyncMerger::default()
            .merge(&mut sources, &mut printer)
            .unwrap();

        let mut labels = printer.labels();
        labels.sort();
        assert_eq!(labels, vec![(5, "A".to_string()), (5, "B".to_string())]);
        assert_eq!(printer.done_calls, 1);
    }

    #[test]
    fn test_no_sources() {
        let mut sources: Vec<ListSource> = Vec::new();
        let mut printer = RecordingPrinter::default();

        let report = SyncMerger::default()
            .merge(&mut sources, &mut printer)
            .unwrap();

        assert!(printer.printed.is_empty());
        assert_eq!(printer.done_calls, 1);
        assert_eq!(report.emitted, 0);
    }

    #[test]
    fn test_all_sources_empty() {
        let mut sources = vec![ListSource::new("A", &[]), ListSource::new("B", &[])];
        let mut printer = RecordingPrinter::default();

        SyncMerger::default()
            .merge(&mut sources, &mut printer)
            .unwrap();

        assert!(printer.printed.is_empty());
        assert_eq!(printer.done_calls, 1);
    }

    #[test]
    fn test_per_source_order_with_duplicates() {
        let mut sources = vec![
            ListSource::new("A", &[1, 1, 1, 4]),
            ListSource::new("B", &[1, 2, 2]),
        ];
        let mut printer = RecordingPrinter::default();

        SyncMerger::default()
            .merge(&mut sources, &mut printer)
            .unwrap();

        let times: Vec<i64> = printer.labels().iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![1, 1, 1, 1, 2, 2, 4]);
    }

    #[test]
    fn test_boxed_sources() {
        let mut sources: Vec<Box<dyn LogSource>> = vec![
            Box::new(ListSource::new("A", &[3])),
            Box::new(ListSource::new("B", &[1])),
        ];
        let mut printer = RecordingPrinter::default();

        SyncMerger::default()
            .merge(&mut sources, &mut printer)
            .unwrap();

        assert_eq!(
            printer.labels(),
            vec![(1, "B".to_string()), (3, "A".to_string())]
        );
    }

    #[test]
    fn test_reject_policy_stops_before_offending_entry() {
        let config = MergeConfig {
            ordering: OrderingPolicy::Reject,
            ..Default::default()
        };
        let mut sources = vec![ListSource::new("A", &[1, 3, 2]), ListSource::new("B", &[10])];
        let mut printer = RecordingPrinter::default();

        let err = SyncMerger::new(config)
            .merge(&mut sources, &mut printer)
            .unwrap_err();

        assert!(matches!(
            err,
            MergeError::OutOfOrder {
                source_index: 0,
                ..
            }
        ));
        assert_eq!(printer.labels().len(), 2);
        assert_eq!(printer.done_calls, 0);
    }

    #[test]
    fn test_warn_policy_counts_violations() {
        let config = MergeConfig {
            ordering: OrderingPolicy::Warn,
            ..Default::default()
        };
        let mut sources = vec![ListSource::new("A", &[1, 3, 2])];
        let mut printer = RecordingPrinter::default();

        let report = SyncMerger::new(config)
            .merge(&mut sources, &mut printer)
            .unwrap();

        assert_eq!(report.emitted, 3);
        assert_eq!(report.out_of_order, 1);
        assert_eq!(printer.done_calls, 1);
    }
}
