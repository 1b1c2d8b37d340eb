//! Longest Common Subsequence (LCS) engines
//!
//! Two interchangeable engines compute the LCS of two atom sequences:
//!
//! | Engine | Time | Space | Best for |
//! |--------|------|-------|----------|
//! | [`DynamicProgramming`] | O(n*m) | O(n*m) | Small inputs |
//! | [`Hirschberg`] | O(n*m) | O(n+m) | Large inputs |
//!
//! Both return atoms of the *first* sequence. Under a fuzzy comparator two
//! "equal" atoms may differ, and callers rely on knowing which side they get.
//!
//! Which engine runs is either fixed ([`LcsAlgorithm`]) or picked per call
//! by an [`LcsStrategy`], see [`LcsSelection`].

mod dynamic;
mod hirschberg;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use dynamic::DynamicProgramming;
pub use hirschberg::Hirschberg;

#[cfg(test)]
pub(crate) use dynamic::lcs_len;

use crate::compare::AtomEq;
use crate::error::DiffError;

// =============================================================================
// Engine contract
// =============================================================================

/// Longest common subsequence of two atom sequences.
pub trait LongestCommonSubsequence {
    /// Ascending indices into `a` of the atoms forming a longest common
    /// subsequence of `a` and `b`.
    fn lcs_indices<T: PartialEq>(&self, a: &[T], b: &[T], eq: AtomEq<'_, T>) -> Vec<usize>;

    /// Atoms of `a` forming a longest common subsequence of `a` and `b`.
    fn longest_common_subsequence<T: PartialEq + Clone>(
        &self,
        a: &[T],
        b: &[T],
        eq: AtomEq<'_, T>,
    ) -> Vec<T> {
        self.lcs_indices(a, b, eq)
            .into_iter()
            .map(|i| a[i].clone())
            .collect()
    }
}

// =============================================================================
// LcsAlgorithm
// =============================================================================

/// Closed set of LCS engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LcsAlgorithm {
    /// Full score matrix with backtrace
    DynamicProgramming,
    /// Linear-space divide and conquer
    #[default]
    Hirschberg,
}

impl LcsAlgorithm {
    /// Canonical name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::DynamicProgramming => "dynamic-programming",
            Self::Hirschberg => "hirschberg",
        }
    }
}

impl LongestCommonSubsequence for LcsAlgorithm {
    fn lcs_indices<T: PartialEq>(&self, a: &[T], b: &[T], eq: AtomEq<'_, T>) -> Vec<usize> {
        match self {
            Self::DynamicProgramming => DynamicProgramming.lcs_indices(a, b, eq),
            Self::Hirschberg => Hirschberg.lcs_indices(a, b, eq),
        }
    }
}

impl fmt::Display for LcsAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LcsAlgorithm {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "dynamic-programming" | "dynamicprogramming" | "dp" | "matrix" => {
                Ok(Self::DynamicProgramming)
            }
            "hirschberg" | "linear" => Ok(Self::Hirschberg),
            _ => Err(DiffError::unknown_lcs(s)),
        }
    }
}

// =============================================================================
// Selection strategy
// =============================================================================

/// Picks an LCS engine per call from the shape of the input.
pub trait LcsStrategy<T>: Send + Sync {
    /// Engine to run for `a` against `b`.
    fn select(&self, a: &[T], b: &[T]) -> LcsAlgorithm;
}

impl<T, F> LcsStrategy<T> for F
where
    F: Fn(&[T], &[T]) -> LcsAlgorithm + Send + Sync,
{
    fn select(&self, a: &[T], b: &[T]) -> LcsAlgorithm {
        self(a, b)
    }
}

/// Dynamic programming while the score matrix stays within `max_cells`,
/// Hirschberg beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeThreshold {
    pub max_cells: usize,
}

impl SizeThreshold {
    /// One million cells: a few megabytes of `usize` scores.
    pub const DEFAULT_MAX_CELLS: usize = 1 << 20;

    pub const fn new(max_cells: usize) -> Self {
        Self { max_cells }
    }
}

impl Default for SizeThreshold {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_CELLS)
    }
}

impl<T> LcsStrategy<T> for SizeThreshold {
    fn select(&self, a: &[T], b: &[T]) -> LcsAlgorithm {
        let cells = (a.len() + 1).saturating_mul(b.len() + 1);
        if cells <= self.max_cells {
            LcsAlgorithm::DynamicProgramming
        } else {
            LcsAlgorithm::Hirschberg
        }
    }
}

/// Engine choice of a differ: a fixed engine, or a strategy consulted per call.
pub enum LcsSelection<T> {
    Fixed(LcsAlgorithm),
    Strategy(Arc<dyn LcsStrategy<T>>),
}

impl<T> LcsSelection<T> {
    /// Engine to run for `(a, b)`.
    pub fn resolve(&self, a: &[T], b: &[T]) -> LcsAlgorithm {
        match self {
            Self::Fixed(algorithm) => *algorithm,
            Self::Strategy(strategy) => strategy.select(a, b),
        }
    }
}

impl<T> Default for LcsSelection<T> {
    fn default() -> Self {
        Self::Fixed(LcsAlgorithm::default())
    }
}

impl<T> Clone for LcsSelection<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(algorithm) => Self::Fixed(*algorithm),
            Self::Strategy(strategy) => Self::Strategy(Arc::clone(strategy)),
        }
    }
}

impl<T> fmt::Debug for LcsSelection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(algorithm) => f.debug_tuple("Fixed").field(algorithm).finish(),
            Self::Strategy(_) => f.write_str("Strategy(..)"),
        }
    }
}

impl<T> From<LcsAlgorithm> for LcsSelection<T> {
    fn from(algorithm: LcsAlgorithm) -> Self {
        Self::Fixed(algorithm)
    }
}
