//! Three-way merge algorithms
//!
//! Both algorithms diff each copy against the original independently and
//! then walk the two diffs side by side:
//!
//! - Two single-kind chunks at the fronts are resolved directly (same kind:
//!   take what both agree on; different kinds: reduce by a fixed table).
//! - An edit at either front starts *depth alignment*: the edit's removed
//!   atom count is a depth the other diff must reach by consuming its own
//!   chunks. Whatever was added on either side along the way is then
//!   resolved into an edit, an addition or a conflict.
//!
//! The algorithms differ in how two additions at the same spot combine:
//!
//! | Algorithm | Same-spot additions |
//! |-----------|---------------------|
//! | [`ThreeWayMerge`] | Common prefix kept, remainders conflict |
//! | [`WeaveMerge`] | Longer kept if one is a subsequence of the other, else conflict |
//!
//! Output is not coalesced; [`Differ3`](crate::diff3::Differ3) does that.

mod three_way;
mod weave;

use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use three_way::ThreeWayMerge;
pub use weave::WeaveMerge;

use crate::chunk::processor::{make_added, make_removed, make_unchanged};
use crate::chunk::{Diff, DiffChunk, DiffElement};
use crate::compare::AtomEq;
use crate::differ::Differ;
use crate::error::DiffError;

// =============================================================================
// MergeAlgorithm
// =============================================================================

/// Closed set of three-way merge algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MergeAlgorithm {
    /// Depth-aligned merge, see [`ThreeWayMerge`]
    ThreeWay,
    /// Subsequence-aware merge, see [`WeaveMerge`]
    #[default]
    Weave,
}

impl MergeAlgorithm {
    /// Canonical name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::ThreeWay => "three-way",
            Self::Weave => "weave",
        }
    }

    /// Merge `copy1` and `copy2`, both derived from `original`, diffing with
    /// `differ`.
    pub fn merge<T: PartialEq + Clone>(
        self,
        differ: &Differ<T>,
        original: &[T],
        copy1: &[T],
        copy2: &[T],
    ) -> Diff<T> {
        match self {
            Self::ThreeWay => ThreeWayMerge.merge(differ, original, copy1, copy2),
            Self::Weave => WeaveMerge.merge(differ, original, copy1, copy2),
        }
    }
}

impl fmt::Display for MergeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MergeAlgorithm {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "three-way" | "threeway" | "three-way-merge" | "3way" | "3-way" => Ok(Self::ThreeWay),
            "weave" | "weave-merge" => Ok(Self::Weave),
            _ => Err(DiffError::unknown_merge(s)),
        }
    }
}

// =============================================================================
// Diff streams
// =============================================================================

/// Kind of a single-sided chunk inside a diff stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunKind {
    Unchanged,
    Added,
    Removed,
}

impl RunKind {
    fn make<T>(self, atoms: Vec<T>) -> Option<DiffElement<T>> {
        match self {
            Self::Unchanged => make_unchanged(atoms),
            Self::Added => make_added(atoms),
            Self::Removed => make_removed(atoms),
        }
    }
}

/// One entry of a diff stream.
#[derive(Debug)]
pub(crate) enum Piece<T> {
    Run(RunKind, Vec<T>),
    Edit { removed: Vec<T>, added: Vec<T> },
}

impl<T> Piece<T> {
    fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    fn into_element(self) -> Option<DiffElement<T>> {
        match self {
            Self::Run(kind, atoms) => kind.make(atoms),
            Self::Edit { removed, added } => Some(DiffElement::edit(removed, added)),
        }
    }
}

impl<T> From<DiffElement<T>> for Piece<T> {
    fn from(element: DiffElement<T>) -> Self {
        match element {
            DiffElement::Chunk(DiffChunk::Unchanged(atoms)) => Self::Run(RunKind::Unchanged, atoms),
            DiffElement::Chunk(DiffChunk::Added(atoms)) => Self::Run(RunKind::Added, atoms),
            DiffElement::Chunk(DiffChunk::Removed(atoms)) => Self::Run(RunKind::Removed, atoms),
            // A conflict replaces side1 with side2, same as an edit
            DiffElement::Chunk(DiffChunk::Conflict { side1, side2 }) => Self::Edit {
                removed: side1,
                added: side2,
            },
            DiffElement::Edit(edit) => Self::Edit {
                removed: edit.removed,
                added: edit.added,
            },
        }
    }
}

/// Consuming cursor over one two-way diff.
#[derive(Debug)]
pub(crate) struct Branch<T> {
    pieces: VecDeque<Piece<T>>,
}

impl<T> Branch<T> {
    fn new(diff: Diff<T>) -> Self {
        Self {
            pieces: diff.into_iter().map(Piece::from).collect(),
        }
    }

    fn front_mut(&mut self) -> Option<&mut Piece<T>> {
        self.pieces.front_mut()
    }

    fn pop_front(&mut self) -> Option<Piece<T>> {
        self.pieces.pop_front()
    }

    /// Drop the front piece if it is a run with nothing left in it.
    fn pop_exhausted(&mut self) {
        if matches!(self.pieces.front(), Some(Piece::Run(_, atoms)) if atoms.is_empty()) {
            self.pieces.pop_front();
        }
    }

    fn into_elements(self) -> impl Iterator<Item = DiffElement<T>> {
        self.pieces.into_iter().filter_map(Piece::into_element)
    }
}

// =============================================================================
// Depth alignment
// =============================================================================

/// State of one depth alignment, indexed by branch (0 = copy1, 1 = copy2).
#[derive(Debug)]
pub(crate) struct Alignment<T> {
    /// Branch whose edit started the alignment
    pub driver: usize,
    /// Original atoms replaced by the aligned region
    pub removed: Vec<T>,
    /// Atoms each branch contributes to the aligned region
    pub added: [Vec<T>; 2],
    /// Original atoms consumed per branch
    pub depth: [usize; 2],
    pub conflict: bool,
}

impl<T> Alignment<T> {
    fn new(driver: usize, removed: Vec<T>, added: Vec<T>) -> Self {
        let mut depth = [0, 0];
        depth[driver] = removed.len();
        let mut added_by = [Vec::new(), Vec::new()];
        added_by[driver] = added;
        Self {
            driver,
            removed,
            added: added_by,
            depth,
            conflict: false,
        }
    }
}

/// What distinguishes one merge algorithm from the other.
pub(crate) trait MergeRules<T: PartialEq + Clone> {
    /// Combine additions found at the same spot in both diffs.
    fn resolve_added(
        &self,
        added1: Vec<T>,
        added2: Vec<T>,
        eq: AtomEq<'_, T>,
        out: &mut Vec<DiffElement<T>>,
    );

    /// Consume (part of) `piece` from the lagging `side`, which is `target`
    /// original atoms behind. Returns whether the piece is used up.
    fn absorb(
        &self,
        piece: &mut Piece<T>,
        side: usize,
        target: usize,
        alignment: &mut Alignment<T>,
    ) -> bool;

    /// Emit the aligned region.
    fn resolve_alignment(
        &self,
        alignment: Alignment<T>,
        eq: AtomEq<'_, T>,
        out: &mut Vec<DiffElement<T>>,
    );
}

/// Diff both copies and walk the two diffs with `rules`.
pub(crate) fn merge_with<T, R>(
    rules: &R,
    differ: &Differ<T>,
    original: &[T],
    copy1: &[T],
    copy2: &[T],
) -> Diff<T>
where
    T: PartialEq + Clone,
    R: MergeRules<T>,
{
    let eq = differ.atom_eq();
    let mut branches = [
        Branch::new(differ.diff(original, copy1)),
        Branch::new(differ.diff(original, copy2)),
    ];
    let mut out = Vec::new();

    loop {
        let [first, second] = &mut branches;
        match (first.front_mut(), second.front_mut()) {
            (Some(Piece::Run(kind1, atoms1)), Some(Piece::Run(kind2, atoms2))) => {
                if kind1 != kind2 {
                    resolve_mixed((*kind1, atoms1), (*kind2, atoms2), eq, &mut out);
                } else if *kind1 == RunKind::Added {
                    rules.resolve_added(mem::take(atoms1), mem::take(atoms2), eq, &mut out);
                } else {
                    out.extend(kind1.make(take_aligned_run(eq, atoms1, atoms2)));
                }
            }
            (Some(_), Some(_)) => {
                align(rules, eq, &mut branches, &mut out);
                continue;
            }
            _ => break,
        }

        for branch in &mut branches {
            branch.pop_exhausted();
        }
    }

    let [first, second] = branches;
    out.extend(first.into_elements());
    out.extend(second.into_elements());
    Diff::new(out)
}

/// Align the edit at the front of one branch against the other branch.
fn align<T, R>(
    rules: &R,
    eq: AtomEq<'_, T>,
    branches: &mut [Branch<T>; 2],
    out: &mut Vec<DiffElement<T>>,
) where
    T: PartialEq + Clone,
    R: MergeRules<T>,
{
    let driver = if branches[0].front_mut().is_some_and(|piece| piece.is_edit()) {
        0
    } else {
        1
    };
    let Some(Piece::Edit { removed, added }) = branches[driver].pop_front() else {
        return;
    };

    let mut alignment = Alignment::new(driver, removed, added);
    while alignment.depth[0] != alignment.depth[1] {
        let lag = if alignment.depth[0] < alignment.depth[1] { 0 } else { 1 };
        let target = alignment.depth[1 - lag] - alignment.depth[lag];
        let Some(piece) = branches[lag].front_mut() else {
            tracing::warn!(
                branch = lag,
                missing = target,
                "diff stream ended before reaching the aligned depth"
            );
            break;
        };
        if rules.absorb(piece, lag, target, &mut alignment) {
            branches[lag].pop_front();
        }
    }

    rules.resolve_alignment(alignment, eq, out);
}

// =============================================================================
// Shared reductions
// =============================================================================

/// Remove the common leading run of `a` and `b` from both, returning `a`'s atoms.
pub(crate) fn take_common_run<T: PartialEq>(
    eq: AtomEq<'_, T>,
    a: &mut Vec<T>,
    b: &mut Vec<T>,
) -> Vec<T> {
    let len = eq.common_prefix_len(a, b);
    take_front(a, b, len)
}

/// Like [`take_common_run`] for two runs covering the same original atoms.
/// If the fronts do not match at all, the shorter run's length is taken
/// positionally so the walk always advances.
pub(crate) fn take_aligned_run<T: PartialEq>(
    eq: AtomEq<'_, T>,
    a: &mut Vec<T>,
    b: &mut Vec<T>,
) -> Vec<T> {
    let len = match eq.common_prefix_len(a, b) {
        0 => a.len().min(b.len()),
        len => len,
    };
    take_front(a, b, len)
}

fn take_front<T>(a: &mut Vec<T>, b: &mut Vec<T>, len: usize) -> Vec<T> {
    b.drain(..len);
    a.drain(..len).collect()
}

/// Two different run kinds at the fronts.
///
/// `Unchanged` defers to the other kind. `Removed` against `Unchanged`
/// removes their common run. `Added` is emitted whole; the other run stays
/// for a later step.
fn resolve_mixed<T: PartialEq>(
    first: (RunKind, &mut Vec<T>),
    second: (RunKind, &mut Vec<T>),
    eq: AtomEq<'_, T>,
    out: &mut Vec<DiffElement<T>>,
) {
    let (first, second) = match (first.0, second.0) {
        (RunKind::Unchanged, _) | (RunKind::Removed, RunKind::Added) => (second, first),
        _ => (first, second),
    };

    match first {
        (RunKind::Removed, removed) => {
            out.extend(make_removed(take_aligned_run(eq, removed, second.1)));
        }
        (_, added) => out.extend(make_added(mem::take(added))),
    }
}
