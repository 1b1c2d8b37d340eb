//! Prelude module for common imports.
//!
//! ```
//! use atomdiff::prelude::*;
//! ```

// Chunk model
pub use crate::chunk::{ChunkKind, Diff, DiffChunk, DiffElement, DiffStats, EditPair};

// Comparison
pub use crate::compare::{AtomEq, Comparator};

// LCS
pub use crate::lcs::{LcsAlgorithm, LcsStrategy, LongestCommonSubsequence, SizeThreshold};

// Diff and merge
pub use crate::diff3::{Differ3, coalesce};
pub use crate::differ::Differ;
pub use crate::merge::MergeAlgorithm;

// Sequencers
pub use crate::sequence::{CharSequencer, LineSequencer, Sequencer};

// Configuration
pub use crate::config::DiffConfig;

// Error
pub use crate::error::{DiffError, DiffResult};
