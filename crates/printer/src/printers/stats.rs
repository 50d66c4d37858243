//! StatsPrinter - order verification and throughput statistics
//!
//! Wraps another printer and forwards everything to it unchanged.

use std::fmt;
use std::time::{Duration, Instant};

use contracts::{LogEntry, Printer, SortKey};
use tracing::{error, info};

/// Statistics collected by a [`StatsPrinter`]
#[derive(Debug, Clone, Default)]
pub struct PrintStats {
    /// Entries printed
    pub printed: u64,

    /// Entries older than the entry printed before them
    pub order_violations: u64,

    /// Time from printer creation to `done` (or to now, before `done`)
    pub elapsed: Duration,
}

impl PrintStats {
    /// Entries printed per second
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.printed as f64 / secs
        } else {
            0.0
        }
    }

    /// Whether every entry arrived in chronological order
    pub fn is_chronological(&self) -> bool {
        self.order_violations == 0
    }
}

impl fmt::Display for PrintStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "printed={} violations={} elapsed={:.3}s rate={:.2}/s",
            self.printed,
            self.order_violations,
            self.elapsed.as_secs_f64(),
            self.rate()
        )
    }
}

/// Printer decorator that checks global order and counts throughput
pub struct StatsPrinter<P> {
    inner: P,
    created: Instant,
    finished: Option<Instant>,
    last_key: Option<SortKey>,
    printed: u64,
    order_violations: u64,
}

impl<P: Printer> StatsPrinter<P> {
    /// Wrap `inner`; the clock starts now
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            created: Instant::now(),
            finished: None,
            last_key: None,
            printed: 0,
            order_violations: 0,
        }
    }

    /// Snapshot of the statistics so far
    pub fn stats(&self) -> PrintStats {
        let end = self.finished.unwrap_or_else(Instant::now);
        PrintStats {
            printed: self.printed,
            order_violations: self.order_violations,
            elapsed: end.duration_since(self.created),
        }
    }

    /// Whether `done` has been called
    pub fn is_done(&self) -> bool {
        self.finished.is_some()
    }

    /// Wrapped printer
    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Printer> Printer for StatsPrinter<P> {
    fn print(&mut self, entry: LogEntry) {
        let key = entry.sort_key();
        if let Some(last) = self.last_key {
            if key < last {
                self.order_violations += 1;
                error!(
                    seq = self.printed,
                    date = %entry.date,
                    "entry printed out of chronological order"
                );
            }
        }
        self.last_key = Some(self.last_key.map_or(key, |last| last.max(key)));
        self.printed += 1;
        self.inner.print(entry);
    }

    fn done(&mut self) {
        if self.finished.is_none() {
            self.finished = Some(Instant::now());
        }
        self.inner.done();
        info!(stats = %self.stats(), "printing complete");
    }
}
