//! Differ configuration
//!
//! A [`DiffConfig`] names the LCS engine and the three-way merge algorithm a
//! differ starts with. Comparators, LCS strategies and sequencers are trait
//! objects and are attached to the differ itself through its `with_*`
//! builders.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DiffResult;
use crate::lcs::LcsAlgorithm;
use crate::merge::MergeAlgorithm;

/// Engine and merge algorithm selection.
///
/// Use the presets to trade memory for speed:
/// - [`DiffConfig::exact`] keeps the full LCS score matrix and aligns edits by depth
/// - [`DiffConfig::compact`] runs in linear space and weaves compatible additions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiffConfig {
    /// LCS engine for every two-way diff.
    /// Default: Hirschberg
    pub lcs: LcsAlgorithm,
    /// Algorithm combining the two diffs of a three-way diff.
    /// Default: weave merge
    pub merge: MergeAlgorithm,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            lcs: LcsAlgorithm::default(),
            merge: MergeAlgorithm::default(),
        }
    }
}

impl DiffConfig {
    /// Create config with an explicit engine and merge algorithm.
    pub fn new(lcs: LcsAlgorithm, merge: MergeAlgorithm) -> Self {
        Self { lcs, merge }
    }

    /// Create config from engine and merge algorithm names, e.g. from a
    /// command line or settings file.
    pub fn from_names(lcs: &str, merge: &str) -> DiffResult<Self> {
        Ok(Self {
            lcs: lcs.parse()?,
            merge: merge.parse()?,
        })
    }

    /// Dynamic programming LCS with depth-aligned three-way merge.
    pub fn exact() -> Self {
        Self {
            lcs: LcsAlgorithm::DynamicProgramming,
            merge: MergeAlgorithm::ThreeWay,
        }
    }

    /// Hirschberg LCS with weave merge.
    pub fn compact() -> Self {
        Self {
            lcs: LcsAlgorithm::Hirschberg,
            merge: MergeAlgorithm::Weave,
        }
    }

    /// Replace the LCS engine.
    pub fn with_lcs(mut self, lcs: LcsAlgorithm) -> Self {
        self.lcs = lcs;
        self
    }

    /// Replace the merge algorithm.
    pub fn with_merge(mut self, merge: MergeAlgorithm) -> Self {
        self.merge = merge;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;

    #[test]
    fn test_default_config() {
        let config = DiffConfig::default();
        assert_eq!(config.lcs, LcsAlgorithm::Hirschberg);
        assert_eq!(config.merge, MergeAlgorithm::Weave);
        assert_eq!(config, DiffConfig::compact());
    }

    #[test]
    fn test_presets() {
        let exact = DiffConfig::exact();
        assert_eq!(exact.lcs, LcsAlgorithm::DynamicProgramming);
        assert_eq!(exact.merge, MergeAlgorithm::ThreeWay);

        let custom = DiffConfig::compact()
            .with_lcs(LcsAlgorithm::DynamicProgramming)
            .with_merge(MergeAlgorithm::ThreeWay);
        assert_eq!(custom, exact);
        assert_eq!(
            DiffConfig::new(LcsAlgorithm::DynamicProgramming, MergeAlgorithm::ThreeWay),
            exact
        );
    }

    #[test]
    fn test_from_names() {
        assert_eq!(DiffConfig::from_names("dp", "3way"), Ok(DiffConfig::exact()));
        assert_eq!(
            DiffConfig::from_names("hirschberg", "weave"),
            Ok(DiffConfig::compact())
        );
        assert_eq!(
            DiffConfig::from_names("myers", "weave"),
            Err(DiffError::unknown_lcs("myers"))
        );
        assert_eq!(
            DiffConfig::from_names("dp", "octopus"),
            Err(DiffError::unknown_merge("octopus"))
        );
    }
}
