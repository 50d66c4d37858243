//! Merge engine metrics
//!
//! Thin wrappers over the `metrics` macros plus an in-memory running statistic
//! used by merge reports. Without an installed recorder the macros are no-ops.

use std::time::Duration;

use contracts::MergeMode;
use metrics::{counter, gauge, histogram};

/// Record one entry handed to the printer
pub fn record_entry_emitted(mode: MergeMode) {
    counter!("log_merge_entries_emitted_total", "mode" => mode.as_str()).increment(1);
}

/// Record the number of queued candidates (live sources with a pending entry)
pub fn record_heap_depth(depth: usize) {
    gauge!("log_merge_heap_depth").set(depth as f64);
}

/// Record how long the drain loop waited on one source's read
pub fn record_read_wait_ms(waited_ms: f64) {
    histogram!("log_merge_read_wait_ms").record(waited_ms);
}

/// Record a read that found the source's look-ahead buffer empty
pub fn record_read_stall(source_index: usize) {
    counter!(
        "log_merge_read_stalls_total",
        "source_index" => source_index.to_string()
    )
    .increment(1);
}

/// Record an entry older than its source's previous entry
pub fn record_out_of_order(source_index: usize) {
    counter!(
        "log_merge_out_of_order_total",
        "source_index" => source_index.to_string()
    )
    .increment(1);
}

/// Record a finished merge run
pub fn record_merge_completed(mode: MergeMode, emitted: u64, elapsed: Duration) {
    counter!("log_merge_runs_total", "mode" => mode.as_str()).increment(1);
    histogram!("log_merge_run_duration_ms", "mode" => mode.as_str())
        .record(elapsed.as_secs_f64() * 1000.0);
    gauge!("log_merge_last_run_entries", "mode" => mode.as_str()).set(emitted as f64);
}

/// Summary of a [`RunningStats`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a sample
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
