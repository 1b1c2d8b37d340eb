//! Weave merge
//!
//! Two additions at the same spot are compatible when one is an ordered
//! (not necessarily contiguous) subsequence of the other; the longer one
//! then carries both. Only incompatible additions conflict.
//!
//! Depth alignment collects additions only and never flags a conflict on
//! its own. The collected additions are resolved once the depths meet:
//!
//! | copy1 added | copy2 added | Result |
//! |-------------|-------------|--------|
//! | empty | any | edit with copy2's additions |
//! | any | empty | edit with copy1's additions |
//! | compatible | compatible | edit with the longer (copy2 on equal length) |
//! | otherwise | | conflict |

use std::mem;

use super::{Alignment, MergeRules, Piece, RunKind, merge_with};
use crate::chunk::processor::{make_added, make_conflict, make_edit};
use crate::chunk::{Diff, DiffElement};
use crate::compare::AtomEq;
use crate::differ::Differ;

/// Subsequence-aware merge. The default three-way merge algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaveMerge;

impl WeaveMerge {
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

/// The longer of `added1` and `added2` when one weaves into the other;
/// both back otherwise.
fn weave<T: PartialEq>(
    added1: Vec<T>,
    added2: Vec<T>,
    eq: AtomEq<'_, T>,
) -> Result<Vec<T>, (Vec<T>, Vec<T>)> {
    if !eq.is_subsequence(&added1, &added2) {
        return Err((added1, added2));
    }
    Ok(if added1.len() > added2.len() { added1 } else { added2 })
}

impl<T: PartialEq + Clone> MergeRules<T> for WeaveMerge {
    fn resolve_added(
        &self,
        added1: Vec<T>,
        added2: Vec<T>,
        eq: AtomEq<'_, T>,
        out: &mut Vec<DiffElement<T>>,
    ) {
        match weave(added1, added2, eq) {
            Ok(added) => out.extend(make_added(added)),
            Err((added1, added2)) => out.extend(make_conflict(added1, added2, false)),
        }
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
                true
            }
            Piece::Run(_, atoms) if atoms.len() > target => {
                atoms.drain(..target);
                alignment.depth[side] += target;
                false
            }
            Piece::Run(_, atoms) => {
                alignment.depth[side] += mem::take(atoms).len();
                true
            }
            Piece::Edit { removed, added } => {
                alignment.added[side].append(added);
                alignment.depth[side] += removed.len();
                if removed.len() > target {
                    alignment.removed.extend(removed.drain(target..));
                }
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
            removed,
            added: [added1, added2],
            ..
        } = alignment;

        let resolved = if added1.is_empty() {
            make_edit(removed, added2)
        } else if added2.is_empty() {
            make_edit(removed, added1)
        } else {
            match weave(added1, added2, eq) {
                Ok(added) => make_edit(removed, added),
                Err((added1, added2)) => make_conflict(added1, added2, false),
            }
        };
        out.extend(resolved);
    }
}
