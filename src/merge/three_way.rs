//! Depth-aligned three-way merge
//!
//! Same-spot additions keep their common prefix; whatever follows it on
//! either side becomes a conflict.
//!
//! During depth alignment the lagging side is marked conflicting as soon as
//! it contributes an addition or an edit of its own. Unchanged atoms it
//! passes over are collected too, so that a conflict shows what that side
//! holds in the aligned region. Without a conflict the driving edit wins
//! unchanged.

use std::mem;

use super::{Alignment, MergeRules, Piece, RunKind, merge_with, take_common_run};
use crate::chunk::processor::{make_added, make_conflict, make_edit};
use crate::chunk::{Diff, DiffElement};
use crate::compare::AtomEq;
use crate::differ::Differ;

/// Depth-aligned merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreeWayMerge;

impl ThreeWayMerge {
    /// Merge `copy1` and `copy2` against `original`. The result is not
    /// coalesced.
    pub fn merge<T: PartialEq + Clone>(
        &self,
        differ: &Differ<T>,
        original: &[T],
        copy1: &[T],
        copy2: &[T],
    ) -> Diff<T> {
        merge_with(self, differ, original, copy1, copy2)
    }
}

impl<T: PartialEq + Clone> MergeRules<T> for ThreeWayMerge {
    fn resolve_added(
        &self,
        mut added1: Vec<T>,
        mut added2: Vec<T>,
        eq: AtomEq<'_, T>,
        out: &mut Vec<DiffElement<T>>,
    ) {
        let common = take_common_run(eq, &mut added1, &mut added2);
        out.extend(make_added(common));
        out.extend(make_conflict(added1, added2, false));
    }

    fn absorb(
        &self,
        piece: &mut Piece<T>,
        side: usize,
        target: usize,
        alignment: &mut Alignment<T>,
    ) -> bool {
        match piece {
            Piece::Run(RunKind::Added, atoms) => {
                alignment.added[side].append(atoms);
                alignment.conflict = true;
                true
            }
            Piece::Run(kind, atoms) => {
                let consumed = atoms.len() <= target;
                let mut head = if consumed {
                    mem::take(atoms)
                } else {
                    atoms.drain(..target).collect()
                };
                alignment.depth[side] += head.len();
                if *kind == RunKind::Unchanged {
                    alignment.added[side].append(&mut head);
                }
                consumed
            }
            Piece::Edit { removed, added } => {
                alignment.added[side].append(added);
                if removed.len() > target {
                    alignment.removed.extend_from_slice(&removed[target..]);
                }
                alignment.depth[side] += removed.len();
                alignment.conflict = true;
                true
            }
        }
    }

    fn resolve_alignment(
        &self,
        alignment: Alignment<T>,
        eq: AtomEq<'_, T>,
        out: &mut Vec<DiffElement<T>>,
    ) {
        let Alignment {
            driver,
            removed,
            added: [mut added1, mut added2],
            conflict,
            ..
        } = alignment;

        if !conflict {
            let added = if driver == 0 { added1 } else { added2 };
            out.extend(make_edit(removed, added));
            return;
        }

        let common = take_common_run(eq, &mut added1, &mut added2);
        if !common.is_empty() && added1.is_empty() && added2.is_empty() {
            out.extend(make_edit(removed, common));
            return;
        }

        out.extend(make_added(common));
        out.extend(make_conflict(added1, added2, false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff3::Differ3;
    use crate::lcs::LcsAlgorithm;
    use crate::merge::MergeAlgorithm;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn u(s: &str) -> DiffElement<char> {
        DiffElement::unchanged(chars(s))
    }

    fn a(s: &str) -> DiffElement<char> {
        DiffElement::added(chars(s))
    }

    fn r(s: &str) -> DiffElement<char> {
        DiffElement::removed(chars(s))
    }

    fn e(removed: &str, added: &str) -> DiffElement<char> {
        DiffElement::edit(chars(removed), chars(added))
    }

    fn c(side1: &str, side2: &str) -> DiffElement<char> {
        DiffElement::conflict(chars(side1), chars(side2))
    }

    fn swap_conflicts(elements: &[DiffElement<char>]) -> Vec<DiffElement<char>> {
        elements
            .iter()
            .map(|element| match element {
                DiffElement::Chunk(crate::chunk::DiffChunk::Conflict { side1, side2 }) => {
                    DiffElement::conflict(side2.clone(), side1.clone())
                }
                other => other.clone(),
            })
            .collect()
    }

    #[test]
    fn test_raw_merge_is_not_coalesced() {
        let differ = Differ::new();
        let merged = ThreeWayMerge.merge(&differ, &chars("abcdef"), &chars("abwxye"), &chars("aqrsbf"));
        assert_eq!(
            merged.into_elements(),
            vec![u("a"), a("qrs"), u("b"), e("cd", "wxy"), r("e"), r("f")]
        );
    }

    #[test]
    fn test_same_spot_additions_keep_common_prefix() {
        let mut out = Vec::new();
        ThreeWayMerge.resolve_added(chars("xyz"), chars("xyq"), AtomEq::exact(), &mut out);
        assert_eq!(out, vec![a("xy"), c("z", "q")]);

        out.clear();
        ThreeWayMerge.resolve_added(chars("xy"), chars("xy"), AtomEq::exact(), &mut out);
        assert_eq!(out, vec![a("xy")]);
    }

    #[test]
    fn test_common_prefix_uses_comparator() {
        let lines = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let differ = Differ3::new()
            .with_comparator(|a: &String, b: &String| a.trim() == b.trim())
            .with_algorithm(MergeAlgorithm::ThreeWay);

        let merged = differ.diff(
            &lines(&["a", "z"]),
            &lines(&["a", "x", "z"]),
            &lines(&["a", " x ", "y", "z"]),
        );
        assert_eq!(
            merged.into_elements(),
            vec![
                DiffElement::unchanged(lines(&["a"])),
                DiffElement::added(lines(&["x"])),
                DiffElement::conflict(Vec::new(), lines(&["y"])),
                DiffElement::unchanged(lines(&["z"])),
            ]
        );
    }

    #[test]
    fn test_reference_merges() {
        let differ = Differ3::new()
            .with_lcs(LcsAlgorithm::Hirschberg)
            .with_algorithm(MergeAlgorithm::ThreeWay);

        let cases = [
            (
                "abcdef",
                "abwxye",
                "aqrsbf",
                vec![u("a"), a("qrs"), u("b"), e("cdef", "wxy")],
            ),
            (
                "abcdef",
                "abwxyzf",
                "abwxyzef",
                vec![u("ab"), a("wxyz"), c("", "e"), u("f")],
            ),
            (
                "abcdef",
                "abwxyzf",
                "abwxyef",
                vec![u("ab"), a("wxy"), c("z", "e"), u("f")],
            ),
            (
                "abcdef",
                "abwxyzfagh",
                "abwxyzfajk",
                vec![u("ab"), e("cde", "wxyz"), u("f"), a("a"), c("gh", "jk")],
            ),
            (
                "abcdef",
                "abwxyzf",
                "abwxyqfpps",
                vec![u("ab"), a("wxy"), c("z", "q"), u("f"), a("pps")],
            ),
            (
                "abcdef",
                "abwxyzcdef",
                "abwxyzqf",
                vec![u("ab"), a("wxyz"), c("cde", "q"), u("f")],
            ),
            (
                "abcdef",
                "abwxyzcdef",
                "abwxyzf",
                vec![u("ab"), a("wxyz"), c("cde", ""), u("f")],
            ),
        ];

        for (original, copy1, copy2, expected) in cases {
            let (original, copy1, copy2) = (chars(original), chars(copy1), chars(copy2));

            let merged = differ.diff(&original, &copy1, &copy2);
            assert_eq!(merged.elements(), &expected[..], "{copy1:?} / {copy2:?}");

            let flipped = differ.diff(&original, &copy2, &copy1);
            assert_eq!(flipped.into_elements(), swap_conflicts(&expected));
        }
    }
}
