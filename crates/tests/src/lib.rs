//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Contract snapshot tests
//! - Config -> sources -> merger -> printer runs in both modes
//! - Failure propagation across the async boundary

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ConfigVersion, MergeBlueprint, DEFAULT_LOOKAHEAD_CAPACITY};

    #[test]
    fn test_contracts_compile() {
        let _ = ConfigVersion::V1;
        assert_eq!(DEFAULT_LOOKAHEAD_CAPACITY, 5);
    }

    #[test]
    fn test_default_blueprint_survives_toml() {
        let toml = ConfigLoader::to_toml(&MergeBlueprint::default()).unwrap();
        let parsed = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed.merge.lookahead_capacity, DEFAULT_LOOKAHEAD_CAPACITY);
        assert_eq!(parsed.sources, MergeBlueprint::default().sources);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::time::{Duration, Instant};

    use chrono::{DateTime, TimeZone, Utc};
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{LogEntry, LogSource, MergeConfig};
    use log_sources::{DelayedLogSource, FailingLogSource, RandomLogSource};
    use merge_engine::{AsyncMerger, MergeError, SyncMerger};
    use observability::StatsSummary;
    use printer::{CollectPrinter, StatsPrinter};

    fn horizon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn at(secs: i64, msg: &str) -> LogEntry {
        LogEntry::new(Utc.timestamp_opt(secs, 0).unwrap(), msg)
    }

    const SMALL_RUN: &str = r#"
[merge]
lookahead_capacity = 3

[sources]
count = 8
history_days_min = 2
history_days_max = 3
max_step_hours = 3.0
latency_ms_min = 0
latency_ms_max = 2
seed = 1234
"#;

    /// Build the sources a config describes against a fixed horizon
    fn seeded_sources(content: &str) -> (MergeConfig, Vec<RandomLogSource>) {
        let blueprint = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap();
        let seed = blueprint.sources.seed.unwrap();
        let sources = (0..blueprint.sources.count)
            .map(|i| {
                RandomLogSource::with_horizon(
                    format!("source-{i}"),
                    &blueprint.sources,
                    seed + i as u64,
                    horizon(),
                )
            })
            .collect();
        (blueprint.merge, sources)
    }

    /// Sync and async draining of identical sources print identical streams
    #[tokio::test]
    async fn test_sync_and_async_agree() {
        let (config, mut sync_sources) = seeded_sources(SMALL_RUN);
        let (_, async_sources) = seeded_sources(SMALL_RUN);

        let mut sync_printer = StatsPrinter::new(CollectPrinter::new());
        let sync_report = SyncMerger::new(config.clone())
            .merge(&mut sync_sources, &mut sync_printer)
            .unwrap();

        let mut async_printer = StatsPrinter::new(CollectPrinter::new());
        let async_report = AsyncMerger::new(config)
            .merge(async_sources, &mut async_printer)
            .await
            .unwrap();

        assert_eq!(sync_report.emitted, async_report.emitted);
        assert!(sync_printer.stats().is_chronological());
        assert!(async_printer.stats().is_chronological());
        assert_eq!(
            sync_printer.into_inner().into_entries(),
            async_printer.into_inner().into_entries()
        );
    }

    /// Every generated entry reaches the printer exactly once
    #[tokio::test]
    async fn test_async_run_prints_everything() {
        let (config, sources) = seeded_sources(SMALL_RUN);
        let (_, mut reference) = seeded_sources(SMALL_RUN);
        let mut expected = 0usize;
        for source in reference.iter_mut() {
            while source.pop().is_some() {
                expected += 1;
            }
        }

        let mut printer = StatsPrinter::new(CollectPrinter::new());
        let report = AsyncMerger::new(config)
            .merge(sources, &mut printer)
            .await
            .unwrap();

        assert_eq!(report.emitted as usize, expected);
        assert_eq!(printer.stats().printed as usize, expected);
        assert_eq!(printer.into_inner().done_calls(), 1);
    }

    /// Three interleaved latent sources merge into one ordered stream
    #[tokio::test]
    async fn test_interleaved_latent_sources() {
        let latency = Duration::from_millis(2);
        let sources = vec![
            DelayedLogSource::new([at(1, "a1"), at(4, "a2"), at(7, "a3")], latency),
            DelayedLogSource::new([at(2, "b1"), at(5, "b2"), at(8, "b3")], latency),
            DelayedLogSource::new([at(3, "c1"), at(6, "c2"), at(9, "c3")], latency),
        ];

        let mut printer = CollectPrinter::new();
        AsyncMerger::new(MergeConfig::default())
            .merge(sources, &mut printer)
            .await
            .unwrap();

        let msgs: Vec<&str> = printer.entries().iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(msgs, ["a1", "b1", "c1", "a2", "b2", "c2", "a3", "b3", "c3"]);
    }

    /// Look-ahead overlaps latencies across sources
    #[tokio::test]
    async fn test_latencies_overlap() {
        let latency = Duration::from_millis(20);
        let sources: Vec<_> = (0..10)
            .map(|i| {
                DelayedLogSource::new(
                    (0..3).map(|k| at(k * 10 + i, "x")).collect::<Vec<_>>(),
                    latency,
                )
            })
            .collect();

        let started = Instant::now();
        let mut printer = CollectPrinter::new();
        AsyncMerger::new(MergeConfig::default())
            .merge(sources, &mut printer)
            .await
            .unwrap();

        // 40 fetches at 20ms each would take 800ms one after another
        assert!(started.elapsed() < Duration::from_millis(400));
        assert_eq!(printer.entries().len(), 30);
    }

    /// Async runs report one read wait per emission, sync runs report none
    #[tokio::test]
    async fn test_read_wait_statistics() {
        let latency = Duration::from_millis(10);
        let sources = vec![
            DelayedLogSource::new([at(1, "a1"), at(3, "a2")], latency),
            DelayedLogSource::new([at(2, "b1"), at(4, "b2")], latency),
        ];

        let mut printer = CollectPrinter::new();
        let report = AsyncMerger::new(MergeConfig::default())
            .merge(sources, &mut printer)
            .await
            .unwrap();

        assert_eq!(report.read_wait_ms.count, 4);
        assert!(report.read_wait_ms.min >= 0.0);
        assert!(report.read_wait_ms.max >= report.read_wait_ms.mean);
        assert!(report.read_stalls <= report.read_wait_ms.count);
        assert_ne!(report.read_wait_ms.to_string(), "N/A");
        assert!(report.to_string().contains("Read stalls:"));

        let (config, mut sources) = seeded_sources(SMALL_RUN);
        let sync_report = SyncMerger::new(config)
            .merge(&mut sources, &mut CollectPrinter::new())
            .unwrap();
        assert_eq!(sync_report.read_wait_ms, StatsSummary::default());
        assert_eq!(sync_report.read_stalls, 0);
    }

    /// A failing source aborts the run without `done`
    #[tokio::test]
    async fn test_failing_source_aborts_run() {
        let sources = vec![
            FailingLogSource::new("healthy-until-3", [at(1, "a"), at(2, "b"), at(3, "c")]),
            FailingLogSource::new("broken", [at(10, "late")]),
        ];

        let mut printer = StatsPrinter::new(CollectPrinter::new());
        let err = AsyncMerger::new(MergeConfig::default())
            .merge(sources, &mut printer)
            .await
            .unwrap_err();

        assert!(matches!(err, MergeError::SourceFailed { .. }));
        assert!(!printer.is_done());
        assert!(printer.stats().is_chronological());
        assert_eq!(printer.into_inner().done_calls(), 0);
    }
}
