//! Three-way diff
//!
//! [`Differ3`] merges two copies of a common original into a single
//! conflict-annotated [`Diff`]:
//!
//! 1. Strip the leading and trailing runs on which all three sequences agree.
//! 2. Merge the remainders with the configured [`MergeAlgorithm`].
//! 3. Put the stripped runs back around the merge result.
//! 4. [`coalesce`] the result.
//!
//! ```
//! use atomdiff::prelude::*;
//!
//! let differ = Differ3::<char>::new();
//! let merged = differ.diff(&['a', 'z'], &['a', 'b', 'b', 'z'], &['a', 'c', 'c', 'z', 's']);
//!
//! assert_eq!(
//!     merged.elements(),
//!     &[
//!         DiffElement::unchanged(vec!['a']),
//!         DiffElement::conflict(vec!['b', 'b'], vec!['c', 'c']),
//!         DiffElement::unchanged(vec!['z']),
//!         DiffElement::added(vec!['s']),
//!     ]
//! );
//! ```

use std::mem;

use crate::chunk::processor::make_unchanged;
use crate::chunk::{Diff, DiffChunk, DiffElement};
use crate::compare::Comparator;
use crate::config::DiffConfig;
use crate::differ::Differ;
use crate::error::DiffResult;
use crate::lcs::{LcsAlgorithm, LcsStrategy};
use crate::merge::MergeAlgorithm;
use crate::sequence::Sequencer;

/// Three-way differ over atoms of type `T`.
#[derive(Debug, Clone)]
pub struct Differ3<T> {
    differ: Differ<T>,
    algorithm: MergeAlgorithm,
}

impl<T> Differ3<T> {
    /// Weave merge, exact equality, default LCS engine.
    pub fn new() -> Self {
        Self {
            differ: Differ::new(),
            algorithm: MergeAlgorithm::default(),
        }
    }

    /// Engine and merge algorithm named by `config`.
    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            differ: Differ::from_config(config),
            algorithm: config.merge,
        }
    }

    /// Use `comparator` for every comparison, including trimming.
    pub fn with_comparator(mut self, comparator: impl Comparator<T> + 'static) -> Self {
        self.differ = self.differ.with_comparator(comparator);
        self
    }

    /// Run `algorithm` for both two-way diffs. Clears any LCS strategy.
    pub fn with_lcs(mut self, algorithm: LcsAlgorithm) -> Self {
        self.differ = self.differ.with_lcs(algorithm);
        self
    }

    /// Let `strategy` pick the LCS engine per two-way diff.
    pub fn with_lcs_strategy(mut self, strategy: impl LcsStrategy<T> + 'static) -> Self {
        self.differ = self.differ.with_lcs_strategy(strategy);
        self
    }

    /// Sequencer used by [`Differ3::diff_text`].
    pub fn with_sequencer(mut self, sequencer: impl Sequencer<T> + 'static) -> Self {
        self.differ = self.differ.with_sequencer(sequencer);
        self
    }

    /// Merge algorithm combining the two diffs.
    pub fn with_algorithm(mut self, algorithm: MergeAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Two-way differ used for both copies.
    pub fn differ(&self) -> &Differ<T> {
        &self.differ
    }

    /// Merge algorithm in use.
    pub fn algorithm(&self) -> MergeAlgorithm {
        self.algorithm
    }
}

impl<T> Default for Differ3<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq + Clone> Differ3<T> {
    /// Merge `copy1` and `copy2`, both derived from `original`.
    ///
    /// Conflict chunks list `copy1`'s side first.
    pub fn diff(&self, original: &[T], copy1: &[T], copy2: &[T]) -> Diff<T> {
        let eq = self.differ.atom_eq();
        let agree = |o: &T, a: &T, b: &T| eq.matches(o, a) && eq.matches(o, b);

        let lead = original
            .iter()
            .zip(copy1)
            .zip(copy2)
            .take_while(|((o, a), b)| agree(o, a, b))
            .count();
        let tail = original[lead..]
            .iter()
            .rev()
            .zip(copy1[lead..].iter().rev())
            .zip(copy2[lead..].iter().rev())
            .take_while(|((o, a), b)| agree(o, a, b))
            .count();

        let merged = self.algorithm.merge(
            &self.differ,
            &original[lead..original.len() - tail],
            &copy1[lead..copy1.len() - tail],
            &copy2[lead..copy2.len() - tail],
        );
        let merged_len = merged.len();

        let mut elements = Vec::with_capacity(merged_len + 2);
        elements.extend(make_unchanged(original[..lead].to_vec()));
        elements.extend(merged);
        elements.extend(make_unchanged(original[original.len() - tail..].to_vec()));

        let diff = Diff::new(coalesce(elements));

        tracing::debug!(
            algorithm = %self.algorithm,
            original_len = original.len(),
            lead,
            tail,
            merged = merged_len,
            coalesced = diff.len(),
            conflicts = diff.stats().conflicts,
            "three-way diff"
        );

        diff
    }

    /// Sequence all three raw inputs with the configured sequencer, then merge.
    pub fn diff_text(&self, original: &str, copy1: &str, copy2: &str) -> DiffResult<Diff<T>> {
        let original = self.differ.sequence(original)?;
        let copy1 = self.differ.sequence(copy1)?;
        let copy2 = self.differ.sequence(copy2)?;
        Ok(self.diff(&original, &copy1, &copy2))
    }
}

// =============================================================================
// Coalescing
// =============================================================================

/// Merge adjacent elements until nothing changes.
///
/// - Neighbouring `Unchanged`, `Added` or `Removed` chunks of the same kind
///   are concatenated.
/// - `Removed` next to `Added` (either order) becomes an edit pair.
/// - `Added`/`Removed` following an edit pair extends that pair.
/// - Conflicts and consecutive edit pairs are never merged.
pub fn coalesce<T>(mut elements: Vec<DiffElement<T>>) -> Vec<DiffElement<T>> {
    let mut pass = 0usize;
    loop {
        pass += 1;
        let before = elements.len();
        let mut changed = false;
        let mut out: Vec<DiffElement<T>> = Vec::with_capacity(before);

        for element in elements {
            let rest = match out.last_mut() {
                Some(last) => fold_into(last, element),
                None => Some(element),
            };
            match rest {
                Some(element) => out.push(element),
                None => changed = true,
            }
        }

        tracing::trace!(pass, before, after = out.len(), changed, "coalesce pass");

        elements = out;
        if !changed {
            return elements;
        }
    }
}

/// Fold `next` into `last`, or hand it back when the two do not combine.
fn fold_into<T>(last: &mut DiffElement<T>, next: DiffElement<T>) -> Option<DiffElement<T>> {
    use DiffChunk::{Added, Removed, Unchanged};

    match (&mut *last, next) {
        (DiffElement::Chunk(Unchanged(atoms)), DiffElement::Chunk(Unchanged(mut more)))
        | (DiffElement::Chunk(Added(atoms)), DiffElement::Chunk(Added(mut more)))
        | (DiffElement::Chunk(Removed(atoms)), DiffElement::Chunk(Removed(mut more))) => {
            atoms.append(&mut more);
            None
        }
        (DiffElement::Edit(edit), DiffElement::Chunk(Added(mut more))) => {
            edit.added.append(&mut more);
            None
        }
        (DiffElement::Edit(edit), DiffElement::Chunk(Removed(mut more))) => {
            edit.removed.append(&mut more);
            None
        }
        (DiffElement::Chunk(Removed(removed)), DiffElement::Chunk(Added(added))) => {
            let removed = mem::take(removed);
            *last = DiffElement::edit(removed, added);
            None
        }
        (DiffElement::Chunk(Added(added)), DiffElement::Chunk(Removed(removed))) => {
            let added = mem::take(added);
            *last = DiffElement::edit(removed, added);
            None
        }
        (_, next) => Some(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;
    use crate::sequence::LineSequencer;

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

    #[test]
    fn test_default_is_weave() {
        let differ = Differ3::<char>::new();
        assert_eq!(differ.algorithm(), MergeAlgorithm::Weave);

        let merged = differ.diff(&chars("az"), &chars("abbz"), &chars("acczs"));
        assert_eq!(merged.into_elements(), vec![u("a"), c("bb", "cc"), u("z"), a("s")]);
    }

    #[test]
    fn test_three_way_example() {
        let differ = Differ3::from_config(&DiffConfig::exact());
        assert_eq!(differ.algorithm(), MergeAlgorithm::ThreeWay);

        let merged = differ.diff(&chars("abcdef"), &chars("abwxye"), &chars("aqrsbf"));
        assert_eq!(
            merged.into_elements(),
            vec![u("a"), a("qrs"), u("b"), e("cdef", "wxy")]
        );
    }

    #[test]
    fn test_identical_copies() {
        for algorithm in [MergeAlgorithm::ThreeWay, MergeAlgorithm::Weave] {
            let differ = Differ3::new().with_algorithm(algorithm);
            let merged = differ.diff(&chars("abc"), &chars("abc"), &chars("abc"));
            assert_eq!(merged.into_elements(), vec![u("abc")]);
            assert!(differ.diff(&[], &[], &[]).is_empty());
        }
    }

    #[test]
    fn test_one_copy_unchanged() {
        for algorithm in [MergeAlgorithm::ThreeWay, MergeAlgorithm::Weave] {
            let differ = Differ3::new().with_algorithm(algorithm);
            let merged = differ.diff(&chars("abcd"), &chars("abcd"), &chars("axcd"));
            assert!(!merged.has_conflicts());
            assert_eq!(merged.into_elements(), vec![u("a"), e("b", "x"), u("cd")]);
        }
    }

    #[test]
    fn test_trimming_records_original_atoms() {
        let differ =
            Differ3::new().with_comparator(|a: &String, b: &String| a.trim() == b.trim());
        let original = vec!["a".to_string(), "b".to_string()];
        let copy1 = vec![" a".to_string(), "b ".to_string()];
        let copy2 = vec!["a ".to_string(), " b".to_string()];

        let merged = differ.diff(&original, &copy1, &copy2);
        assert_eq!(merged.into_elements(), vec![DiffElement::unchanged(original)]);
    }

    #[test]
    fn test_diff_text() {
        let differ = Differ3::new().with_sequencer(LineSequencer);
        let merged = differ.diff_text("a\nb\nc\n", "a\nB\nc\n", "a\nb\nc\nd\n").unwrap();
        let lines = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            merged.into_elements(),
            vec![
                DiffElement::unchanged(lines(&["a"])),
                DiffElement::edit(lines(&["b"]), lines(&["B"])),
                DiffElement::unchanged(lines(&["c"])),
                DiffElement::added(lines(&["d"])),
            ]
        );

        let unsequenced = Differ3::<String>::new();
        assert_eq!(
            unsequenced.diff_text("a", "b", "c"),
            Err(DiffError::MissingSequencer)
        );
    }

    #[test]
    fn test_coalesce_merges_neighbours() {
        let elements = vec![
            u("a"),
            r("a"),
            r("b"),
            u("c"),
            e("ff", "eg"),
            r("d"),
            a("h"),
        ];
        assert_eq!(
            coalesce(elements),
            vec![u("a"), r("ab"), u("c"), e("ffd", "egh")]
        );
    }

    #[test]
    fn test_coalesce_promotes_edit_pairs() {
        let elements = vec![u("ab"), r("ffd"), a("egh"), u("ab"), a("egh"), r("ffd")];
        assert_eq!(
            coalesce(elements),
            vec![u("ab"), e("ffd", "egh"), u("ab"), e("ffd", "egh")]
        );
    }

    #[test]
    fn test_coalesce_leaves_conflicts_alone() {
        let elements = vec![u("a"), c("b", "c"), u("d")];
        assert_eq!(coalesce(elements.clone()), elements);

        let elements = vec![c("a", "b"), c("c", "d"), a("x")];
        assert_eq!(coalesce(elements.clone()), elements);

        let elements = vec![e("a", "b"), e("c", "d")];
        assert_eq!(coalesce(elements.clone()), elements);
    }

    #[test]
    fn test_coalesce_is_a_fixed_point() {
        let once = coalesce(vec![a("x"), r("y"), a("z"), u("k"), u("l")]);
        assert_eq!(once, vec![e("y", "xz"), u("kl")]);
        assert_eq!(coalesce(once.clone()), once);
    }
}
