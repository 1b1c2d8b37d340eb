//! Error types for atomdiff.
//!
//! Every error is a configuration error reported at the point of misuse.
//! Diffing well-formed sequences never fails.

use thiserror::Error;

/// Errors that can occur while configuring or feeding a differ.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// Raw input was supplied but no sequencing strategy is configured
    #[error("raw input needs a sequencing strategy, but none is configured")]
    MissingSequencer,

    /// The name does not identify an LCS engine
    #[error("unknown LCS algorithm `{0}` (expected `dynamic-programming` or `hirschberg`)")]
    UnknownLcsAlgorithm(String),

    /// The name does not identify a three-way merge algorithm
    #[error("unknown merge algorithm `{0}` (expected `three-way` or `weave`)")]
    UnknownMergeAlgorithm(String),
}

/// Result type alias for fallible atomdiff operations.
pub type DiffResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Create an unknown-LCS-engine error from the offending name.
    pub fn unknown_lcs(name: impl Into<String>) -> Self {
        Self::UnknownLcsAlgorithm(name.into())
    }

    /// Create an unknown-merge-algorithm error from the offending name.
    pub fn unknown_merge(name: impl Into<String>) -> Self {
        Self::UnknownMergeAlgorithm(name.into())
    }
}
