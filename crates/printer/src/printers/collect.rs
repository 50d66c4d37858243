//! In-memory and no-op printers

use contracts::{LogEntry, Printer};

/// Keeps every printed entry for later inspection
#[derive(Debug, Default)]
pub struct CollectPrinter {
    entries: Vec<LogEntry>,
    done_calls: usize,
}

impl CollectPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in the order they were printed
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Take ownership of the collected entries
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }

    /// How many times `done` was called
    pub fn done_calls(&self) -> usize {
        self.done_calls
    }
}

impl Printer for CollectPrinter {
    fn print(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    fn done(&mut self) {
        self.done_calls += 1;
    }
}

/// Drops every entry
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardPrinter;

impl Printer for DiscardPrinter {
    fn print(&mut self, _entry: LogEntry) {}

    fn done(&mut self) {}
}
