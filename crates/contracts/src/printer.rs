//! Printer trait - merger output interface

use crate::LogEntry;

/// Output sink for merged entries
///
/// `print` is called once per entry in final order; `done` exactly once after the
/// last `print` of a successful run.
pub trait Printer {
    /// Receive the next entry of the merged stream
    fn print(&mut self, entry: LogEntry);

    /// End of stream
    fn done(&mut self);
}

impl<P: Printer + ?Sized> Printer for &mut P {
    fn print(&mut self, entry: LogEntry) {
        (**self).print(entry);
    }

    fn done(&mut self) {
        (**self).done();
    }
}

impl<P: Printer + ?Sized> Printer for Box<P> {
    fn print(&mut self, entry: LogEntry) {
        (**self).print(entry);
    }

    fn done(&mut self) {
        (**self).done();
    }
}
