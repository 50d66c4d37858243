//! Printer implementations

mod collect;
mod log;
mod stats;

pub use collect::{CollectPrinter, DiscardPrinter};
pub use log::TracingPrinter;
pub use stats::{PrintStats, StatsPrinter};
