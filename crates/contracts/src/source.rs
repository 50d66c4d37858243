//! LogSource traits - log entry source abstraction
//!
//! A source yields its entries in non-decreasing timestamp order and signals
//! exhaustion with `None`. Exhaustion is final: once a source has returned `None`
//! the mergers never pull it again.

use crate::{ContractError, LogEntry};

/// Source whose next entry is immediately available
pub trait LogSource {
    /// Pop the next entry, or `None` once drained
    fn pop(&mut self) -> Option<LogEntry>;
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    fn pop(&mut self) -> Option<LogEntry> {
        (**self).pop()
    }
}

impl<S: LogSource + ?Sized> LogSource for &mut S {
    fn pop(&mut self) -> Option<LogEntry> {
        (**self).pop()
    }
}

/// Source whose next entry arrives after an arbitrary latency
///
/// The `Send` variant ([`AsyncLogSource`]) is what the async merger drives from
/// its look-ahead tasks.
#[trait_variant::make(AsyncLogSource: Send)]
pub trait LocalAsyncLogSource {
    /// Fetch the next entry
    ///
    /// Resolves to `Ok(None)` on exhaustion.
    ///
    /// # Errors
    /// Returns the fetch failure; the merge run is aborted by it.
    async fn pop_async(&mut self) -> Result<Option<LogEntry>, ContractError>;
}
