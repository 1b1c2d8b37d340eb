//! atomdiff - Two-way diff and three-way merge over comparable atoms
//!
//! An *atom* is whatever a sequence is made of: characters, lines, words,
//! tokens. Atoms compare with `PartialEq` unless a [`Comparator`] is
//! configured, for example to ignore whitespace.
//!
//! ## Modules
//! - `lcs`: LCS engines (dynamic programming, Hirschberg) and engine selection
//! - `differ`: Two-way diff ([`Differ`])
//! - `merge`: Three-way merge algorithms (three-way, weave)
//! - `diff3`: Three-way diff driver ([`Differ3`]) and [`coalesce`]
//! - `chunk`: Chunk and diff result model
//! - `sequence`: Raw text to atom sequences
//! - `config`: Algorithm selection by name
//!
//! ## Usage
//!
//! ```
//! use atomdiff::prelude::*;
//!
//! let differ = Differ3::<String>::new().with_sequencer(LineSequencer);
//! let merged = differ
//!     .diff_text("a\nb\nc\n", "a\nB\nc\n", "a\nb\nc\nd\n")
//!     .unwrap();
//!
//! assert!(!merged.has_conflicts());
//! assert_eq!(merged.modified_side(), ["a", "B", "c", "d"]);
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Chunk model: DiffChunk, EditPair, DiffElement, Diff
pub mod chunk;

/// Atom comparison
pub mod compare;

/// LCS engines and engine selection
pub mod lcs;

/// Two-way diff
pub mod differ;

/// Three-way merge algorithms
pub mod merge;

/// Three-way diff driver and coalescing
pub mod diff3;

/// Sequencers
pub mod sequence;

/// Algorithm configuration
pub mod config;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Chunk model
pub use chunk::{ChunkKind, Diff, DiffChunk, DiffElement, DiffStats, EditPair};

// Comparison
pub use compare::{AtomEq, Comparator};

// LCS
pub use lcs::{LcsAlgorithm, LcsSelection, LcsStrategy, LongestCommonSubsequence, SizeThreshold};

// Diff and merge
pub use diff3::{Differ3, coalesce};
pub use differ::Differ;
pub use merge::MergeAlgorithm;

// Sequencers
pub use sequence::{CharSequencer, LineSequencer, Sequencer};

// Configuration
pub use config::DiffConfig;

// Error types
pub use error::{DiffError, DiffResult};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod property_tests;
