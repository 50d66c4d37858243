//! # Printer
//!
//! Output side of a merge run.
//!
//! Responsibilities:
//! - Consume merged `LogEntry`s in final order
//! - Verify chronological order and collect throughput statistics
//! - Build the configured printer for the CLI

pub mod printers;

pub use contracts::{LogEntry, Printer, PrinterConfig, PrinterKind};
pub use printers::{CollectPrinter, DiscardPrinter, PrintStats, StatsPrinter, TracingPrinter};

/// Printer built from configuration, always wrapped in a [`StatsPrinter`]
pub type ConfiguredPrinter = StatsPrinter<Box<dyn Printer + Send>>;

/// Build the printer described by `config`
pub fn create_printer(config: &PrinterConfig) -> ConfiguredPrinter {
    let inner: Box<dyn Printer + Send> = match config.kind {
        PrinterKind::Log => Box::new(TracingPrinter::new("merged")),
        PrinterKind::Stats => Box::new(DiscardPrinter),
    };
    StatsPrinter::new(inner)
}
