//! Merge run summary.

use std::fmt;
use std::time::Duration;

use contracts::MergeMode;
use observability::StatsSummary;

/// Outcome of a successful merge run
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Draining protocol used
    pub mode: MergeMode,

    /// Number of input sources
    pub sources: usize,

    /// Entries handed to the printer
    pub emitted: u64,

    /// Ordering violations detected (0 under `OrderingPolicy::Trust`)
    pub out_of_order: u64,

    /// Wall time of the run
    pub elapsed: Duration,

    /// Drain-loop wait per read, milliseconds (async mode only)
    pub read_wait_ms: StatsSummary,

    /// Drain-loop reads that found the look-ahead buffer empty (async mode only)
    pub read_stalls: u64,
}

impl MergeReport {
    /// Entries emitted per second
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.emitted as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} merge ===", self.mode.as_str())?;
        writeln!(f, "Sources: {}", self.sources)?;
        writeln!(f, "Entries emitted: {}", self.emitted)?;
        writeln!(f, "Out-of-order entries: {}", self.out_of_order)?;
        writeln!(
            f,
            "Elapsed: {:.3}s ({:.2} entries/s)",
            self.elapsed.as_secs_f64(),
            self.rate()
        )?;
        if self.mode == MergeMode::Async {
            writeln!(f, "Read wait (ms): {}", self.read_wait_ms)?;
            writeln!(f, "Read stalls: {}", self.read_stalls)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_zero_elapsed() {
        let report = MergeReport {
            emitted: 10,
            ..Default::default()
        };
        assert_eq!(report.rate(), 0.0);
    }

    #[test]
    fn test_display_sync_omits_read_wait() {
        let report = MergeReport {
            mode: MergeMode::Sync,
            sources: 3,
            emitted: 6,
            elapsed: Duration::from_secs(2),
            ..Default::default()
        };
        let output = report.to_string();
        assert!(output.contains("=== sync merge ==="));
        assert!(output.contains("Entries emitted: 6"));
        assert!(output.contains("3.00 entries/s"));
        assert!(!output.contains("Read wait"));
    }
}
