//! Merge engine error types

use contracts::{ContractError, SortKey};
use thiserror::Error;

/// Errors that abort a merge run
#[derive(Debug, Error)]
pub enum MergeError {
    /// A source failed to produce its next entry
    #[error("source {source_index} failed: {source}")]
    SourceFailed {
        /// Position of the source in the input list
        source_index: usize,
        /// Underlying fetch error
        #[source]
        source: ContractError,
    },

    /// The look-ahead task of a source panicked or was cancelled
    #[error("look-ahead task for source {source_index} failed: {message}")]
    SourceTaskFailed {
        /// Position of the source in the input list
        source_index: usize,
        /// Join error description
        message: String,
    },

    /// A source yielded an entry older than its previous one (`OrderingPolicy::Reject`)
    #[error("source {source_index} went back in time: {current} < {previous}")]
    OutOfOrder {
        /// Position of the source in the input list
        source_index: usize,
        /// Sort key of the previous entry
        previous: SortKey,
        /// Sort key of the offending entry
        current: SortKey,
    },
}

/// Merge engine Result alias
pub type Result<T> = std::result::Result<T, MergeError>;
