//! Two-way differ
//!
//! Turns an original and a modified atom sequence into an ordered list of
//! [`DiffElement`]s:
//!
//! ```text
//! [Unchanged lead] (edit? Unchanged)* edit? [Unchanged tail]
//! ```
//!
//! # Algorithm
//!
//! 1. Strip the common leading and trailing runs (comparator-aware).
//! 2. Compute the LCS of the remaining modified and original atoms.
//! 3. For each LCS atom, everything before it on the original side is
//!    removed and everything before it on the modified side is added. The
//!    run of atoms matching consecutive LCS atoms on both sides is unchanged.
//! 4. Whatever is left after the last LCS atom forms the final edit.
//!
//! Unchanged chunks always carry the *modified* sequence's atoms.

use std::fmt;
use std::sync::Arc;

use crate::chunk::processor::{make_edit, make_unchanged};
use crate::chunk::{Diff, DiffElement};
use crate::compare::{AtomEq, Comparator};
use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};
use crate::lcs::{LcsAlgorithm, LcsSelection, LcsStrategy, LongestCommonSubsequence};
use crate::sequence::Sequencer;

/// Two-way differ over atoms of type `T`.
///
/// ```
/// use atomdiff::prelude::*;
///
/// let differ = Differ::<char>::new();
/// let diff = differ.diff(&['a', 'b', 'c'], &['a', 'x', 'c']);
///
/// assert_eq!(
///     diff.elements(),
///     &[
///         DiffElement::unchanged(vec!['a']),
///         DiffElement::edit(vec!['b'], vec!['x']),
///         DiffElement::unchanged(vec!['c']),
///     ]
/// );
/// ```
pub struct Differ<T> {
    comparator: Option<Arc<dyn Comparator<T>>>,
    lcs: LcsSelection<T>,
    sequencer: Option<Arc<dyn Sequencer<T>>>,
}

impl<T> Differ<T> {
    /// Differ with exact equality and the default LCS engine.
    pub fn new() -> Self {
        Self {
            comparator: None,
            lcs: LcsSelection::default(),
            sequencer: None,
        }
    }

    /// Differ using the LCS engine named by `config`.
    pub fn from_config(config: &DiffConfig) -> Self {
        Self::new().with_lcs(config.lcs)
    }

    /// Use `comparator` instead of `PartialEq` for every atom comparison.
    pub fn with_comparator(mut self, comparator: impl Comparator<T> + 'static) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    /// Run `algorithm` for every diff. Clears any LCS strategy.
    pub fn with_lcs(mut self, algorithm: LcsAlgorithm) -> Self {
        self.lcs = LcsSelection::Fixed(algorithm);
        self
    }

    /// Let `strategy` pick the LCS engine per diff. Replaces any fixed engine.
    pub fn with_lcs_strategy(mut self, strategy: impl LcsStrategy<T> + 'static) -> Self {
        self.lcs = LcsSelection::Strategy(Arc::new(strategy));
        self
    }

    /// Sequencer used by [`Differ::diff_text`].
    pub fn with_sequencer(mut self, sequencer: impl Sequencer<T> + 'static) -> Self {
        self.sequencer = Some(Arc::new(sequencer));
        self
    }

    /// Configured comparator, `None` for exact equality.
    pub fn comparator(&self) -> Option<&dyn Comparator<T>> {
        match &self.comparator {
            Some(comparator) => Some(comparator.as_ref()),
            None => None,
        }
    }

    /// Fixed engine or selection strategy.
    pub fn lcs_selection(&self) -> &LcsSelection<T> {
        &self.lcs
    }

    /// Configured sequencer, if any.
    pub fn sequencer(&self) -> Option<&dyn Sequencer<T>> {
        match &self.sequencer {
            Some(sequencer) => Some(sequencer.as_ref()),
            None => None,
        }
    }

    /// Equality in effect for this differ.
    pub fn atom_eq(&self) -> AtomEq<'_, T> {
        AtomEq::from_option(self.comparator())
    }

    /// Run the configured sequencer over raw input.
    pub fn sequence(&self, raw: &str) -> DiffResult<Vec<T>> {
        let sequencer = self.sequencer().ok_or(DiffError::MissingSequencer)?;
        Ok(sequencer.to_sequence(raw))
    }
}

impl<T: PartialEq + Clone> Differ<T> {
    /// Diff `original` against `modified`.
    pub fn diff(&self, original: &[T], modified: &[T]) -> Diff<T> {
        let eq = self.atom_eq();

        let lead = eq.common_prefix_len(original, modified);
        let tail = eq.common_suffix_len(&original[lead..], &modified[lead..]);
        let original_mid = &original[lead..original.len() - tail];
        let modified_mid = &modified[lead..modified.len() - tail];

        let algorithm = self.lcs.resolve(original_mid, modified_mid);
        let lcs = algorithm.lcs_indices(modified_mid, original_mid, eq);

        let mut elements = Vec::with_capacity(2 * lcs.len() + 3);
        elements.extend(make_unchanged(modified[..lead].to_vec()));
        walk_lcs(original_mid, modified_mid, &lcs, eq, &mut elements);
        elements.extend(make_unchanged(modified[modified.len() - tail..].to_vec()));

        tracing::trace!(
            original_len = original.len(),
            modified_len = modified.len(),
            lead,
            tail,
            %algorithm,
            lcs_len = lcs.len(),
            elements = elements.len(),
            "two-way diff"
        );

        Diff::new(elements)
    }

    /// Sequence both raw inputs with the configured sequencer, then diff them.
    pub fn diff_text(&self, original: &str, modified: &str) -> DiffResult<Diff<T>> {
        let original = self.sequence(original)?;
        let modified = self.sequence(modified)?;
        Ok(self.diff(&original, &modified))
    }
}

/// Emit edits and unchanged runs between `original` and `modified` along
/// `lcs` (ascending indices into `modified`).
fn walk_lcs<T: PartialEq + Clone>(
    original: &[T],
    modified: &[T],
    lcs: &[usize],
    eq: AtomEq<'_, T>,
    out: &mut Vec<DiffElement<T>>,
) {
    let (mut o, mut m, mut k) = (0, 0, 0);

    while k < lcs.len() {
        let next = &modified[lcs[k]];
        let added_end = m + run_until(&modified[m..], next, eq);
        let removed_end = o + run_until(&original[o..], next, eq);
        out.extend(make_edit(
            original[o..removed_end].to_vec(),
            modified[m..added_end].to_vec(),
        ));
        o = removed_end;
        m = added_end;

        if o == original.len() || m == modified.len() {
            break;
        }

        let start = m;
        loop {
            o += 1;
            m += 1;
            k += 1;

            let in_step = k < lcs.len()
                && o < original.len()
                && m < modified.len()
                && eq.matches(&modified[lcs[k]], &original[o])
                && eq.matches(&modified[lcs[k]], &modified[m]);
            if !in_step {
                break;
            }
        }
        out.extend(make_unchanged(modified[start..m].to_vec()));
    }

    out.extend(make_edit(original[o..].to_vec(), modified[m..].to_vec()));
}

/// Number of leading atoms of `atoms` that do not match `next`.
fn run_until<T: PartialEq>(atoms: &[T], next: &T, eq: AtomEq<'_, T>) -> usize {
    atoms
        .iter()
        .position(|atom| eq.matches(next, atom))
        .unwrap_or(atoms.len())
}

impl<T> Default for Differ<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Differ<T> {
    fn clone(&self) -> Self {
        Self {
            comparator: self.comparator.clone(),
            lcs: self.lcs.clone(),
            sequencer: self.sequencer.clone(),
        }
    }
}

impl<T> fmt::Debug for Differ<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Differ")
            .field("comparator", &self.comparator.is_some())
            .field("lcs", &self.lcs)
            .field("sequencer", &self.sequencer.is_some())
            .finish()
    }
}
