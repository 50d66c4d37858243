//! Command implementations.

mod run;
mod validate;

pub use run::run_merge;
pub use validate::run_validate;
