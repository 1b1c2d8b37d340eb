//! Randomized checks for the diff and merge engines.
//!
//! Inputs are short strings over a four-letter alphabet so that common runs,
//! same-spot additions and overlapping edits all show up often.

use proptest::prelude::*;

use crate::chunk::{DiffChunk, DiffElement};
use crate::compare::AtomEq;
use crate::diff3::{Differ3, coalesce};
use crate::differ::Differ;
use crate::lcs::{LcsAlgorithm, LongestCommonSubsequence, lcs_len};
use crate::merge::MergeAlgorithm;

const ENGINES: [LcsAlgorithm; 2] = [LcsAlgorithm::DynamicProgramming, LcsAlgorithm::Hirschberg];
const MERGES: [MergeAlgorithm; 2] = [MergeAlgorithm::ThreeWay, MergeAlgorithm::Weave];

fn arb_atoms() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'd']), 0..8)
}

fn swap_conflicts(elements: Vec<DiffElement<char>>) -> Vec<DiffElement<char>> {
    elements
        .into_iter()
        .map(|element| match element {
            DiffElement::Chunk(DiffChunk::Conflict { side1, side2 }) => {
                DiffElement::conflict(side2, side1)
            }
            other => other,
        })
        .collect()
}

fn is_well_formed(element: &DiffElement<char>) -> bool {
    match element {
        DiffElement::Chunk(DiffChunk::Conflict { side1, side2 }) => {
            !side1.is_empty() || !side2.is_empty()
        }
        DiffElement::Chunk(chunk) => !chunk.is_empty(),
        DiffElement::Edit(edit) => !edit.removed.is_empty() && !edit.added.is_empty(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Both engines find a common subsequence of maximal length.
    #[test]
    fn lcs_is_longest_common(a in arb_atoms(), b in arb_atoms()) {
        let eq = AtomEq::exact();
        let expected = lcs_len(&a, &b, eq);

        for engine in ENGINES {
            let indices = engine.lcs_indices(&a, &b, eq);
            prop_assert_eq!(indices.len(), expected, "{}", engine);
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));

            let atoms = engine.longest_common_subsequence(&a, &b, eq);
            prop_assert!(eq.is_subsequence(&atoms, &b));
            prop_assert!(eq.is_subsequence(&atoms, &a));
        }
    }

    /// A two-way diff rebuilds both of its inputs.
    #[test]
    fn two_way_reconstructs_inputs(original in arb_atoms(), modified in arb_atoms()) {
        for engine in ENGINES {
            let diff = Differ::new().with_lcs(engine).diff(&original, &modified);
            prop_assert_eq!(diff.original_side(), original.clone());
            prop_assert_eq!(diff.modified_side(), modified.clone());
            prop_assert!(diff.iter().all(is_well_formed));
            prop_assert_eq!(diff.has_changes(), original != modified);
        }
    }

    /// Diffing a sequence against itself yields a single unchanged run.
    #[test]
    fn two_way_is_idempotent(atoms in arb_atoms()) {
        for engine in ENGINES {
            let diff = Differ::new().with_lcs(engine).diff(&atoms, &atoms);
            if atoms.is_empty() {
                prop_assert!(diff.is_empty());
            } else {
                prop_assert_eq!(diff.into_elements(), vec![DiffElement::unchanged(atoms.clone())]);
            }
        }
    }

    /// Swapping the copies only swaps the sides of each conflict.
    #[test]
    fn three_way_is_symmetric(
        original in arb_atoms(),
        copy1 in arb_atoms(),
        copy2 in arb_atoms(),
    ) {
        for engine in ENGINES {
            for algorithm in MERGES {
                let differ = Differ3::new().with_lcs(engine).with_algorithm(algorithm);
                let merged = differ.diff(&original, &copy1, &copy2).into_elements();
                let flipped = differ.diff(&original, &copy2, &copy1).into_elements();

                prop_assert_eq!(swap_conflicts(flipped), merged.clone(), "{} / {}", engine, algorithm);
                prop_assert!(merged.iter().all(is_well_formed));
                prop_assert_eq!(coalesce(merged.clone()), merged);
            }
        }
    }

    /// Merging a copy with the original itself reproduces the two-way diff.
    #[test]
    fn three_way_against_unchanged_copy(original in arb_atoms(), copy in arb_atoms()) {
        let two_way = Differ::new().diff(&original, &copy);
        for algorithm in MERGES {
            let differ = Differ3::new().with_algorithm(algorithm);
            let merged = differ.diff(&original, &copy, &original);
            prop_assert!(!merged.has_conflicts());
            prop_assert_eq!(merged.original_side(), original.clone());
            prop_assert_eq!(merged.modified_side(), two_way.modified_side());
        }
    }
}
