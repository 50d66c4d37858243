//! TracingPrinter - logs every merged entry via tracing

use contracts::{LogEntry, Printer};
use tracing::{info, instrument};

/// Printer that emits one `info` event per entry
pub struct TracingPrinter {
    name: String,
    printed: u64,
}

impl TracingPrinter {
    /// Create a new TracingPrinter with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            printed: 0,
        }
    }

    /// Printer name (used as the `printer` field of every event)
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Printer for TracingPrinter {
    fn print(&mut self, entry: LogEntry) {
        self.printed += 1;
        info!(
            printer = %self.name,
            seq = self.printed,
            date = %entry.date,
            msg = %entry.msg,
            "entry"
        );
    }

    #[instrument(name = "tracing_printer_done", skip(self), fields(printer = %self.name))]
    fn done(&mut self) {
        info!(printer = %self.name, printed = self.printed, "stream complete");
    }
}
