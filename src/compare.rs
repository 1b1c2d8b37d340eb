//! Atom equality
//!
//! Every algorithm in this crate asks one question about atoms: are these two
//! the same? By default the answer is `PartialEq`. A [`Comparator`] replaces it
//! for a whole run, e.g. to ignore surrounding whitespace on lines.
//!
//! [`AtomEq`] resolves that choice once and is passed by value into the
//! engines, so no call site has to branch on "comparator or not".

use std::fmt;

// =============================================================================
// Comparator contract
// =============================================================================

/// Pluggable equality predicate over two atoms.
///
/// Must be an equivalence relation (reflexive, symmetric, transitive) for the
/// LCS engines and the chunk alignment to produce meaningful output.
///
/// Any `Fn(&T, &T) -> bool + Send + Sync` closure is a comparator:
///
/// ```
/// use atomdiff::compare::Comparator;
///
/// let trimmed = |a: &String, b: &String| a.trim() == b.trim();
/// assert!(trimmed.compare(&" x ".to_string(), &"x".to_string()));
/// ```
pub trait Comparator<T: ?Sized>: Send + Sync {
    /// Returns `true` when the two atoms are considered equal.
    fn compare(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool + Send + Sync,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

// =============================================================================
// AtomEq
// =============================================================================

/// Resolved equality for one diff run: exact `PartialEq`, or a comparator.
///
/// Whichever is configured is authoritative for the entire run, including
/// membership tests and tie checks inside the LCS engines.
pub struct AtomEq<'c, T> {
    comparator: Option<&'c dyn Comparator<T>>,
}

impl<T> Clone for AtomEq<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AtomEq<'_, T> {}

impl<T> fmt::Debug for AtomEq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.comparator {
            Some(_) => f.write_str("AtomEq::Comparator"),
            None => f.write_str("AtomEq::Exact"),
        }
    }
}

impl<T> Default for AtomEq<'_, T> {
    fn default() -> Self {
        Self::exact()
    }
}

impl<'c, T> AtomEq<'c, T> {
    /// Exact `PartialEq` equality.
    pub const fn exact() -> Self {
        Self { comparator: None }
    }

    /// Equality delegated to `comparator`.
    pub fn with(comparator: &'c dyn Comparator<T>) -> Self {
        Self {
            comparator: Some(comparator),
        }
    }

    /// Comparator when present, exact equality otherwise.
    pub fn from_option(comparator: Option<&'c dyn Comparator<T>>) -> Self {
        Self { comparator }
    }

    /// Whether exact `PartialEq` equality is in effect.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.comparator.is_none()
    }
}

impl<T: PartialEq> AtomEq<'_, T> {
    /// Compare two atoms.
    #[inline]
    pub fn matches(&self, a: &T, b: &T) -> bool {
        match self.comparator {
            Some(comparator) => comparator.compare(a, b),
            None => a == b,
        }
    }

    /// Whether `needle` matches any atom of `haystack`.
    pub fn contains(&self, needle: &T, haystack: &[T]) -> bool {
        haystack.iter().any(|atom| self.matches(needle, atom))
    }

    /// Length of the longest run at the front of both slices that matches pairwise.
    pub fn common_prefix_len(&self, a: &[T], b: &[T]) -> usize {
        a.iter()
            .zip(b)
            .take_while(|(x, y)| self.matches(x, y))
            .count()
    }

    /// Length of the longest run at the back of both slices that matches pairwise.
    pub fn common_suffix_len(&self, a: &[T], b: &[T]) -> usize {
        a.iter()
            .rev()
            .zip(b.iter().rev())
            .take_while(|(x, y)| self.matches(x, y))
            .count()
    }

    /// Whether the shorter slice is an ordered (not necessarily contiguous)
    /// subsequence of the longer one. Equal lengths compare `a` against `b`.
    pub fn is_subsequence(&self, a: &[T], b: &[T]) -> bool {
        let (longer, shorter) = if a.len() < b.len() { (b, a) } else { (a, b) };

        let mut matched = 0;
        for atom in longer {
            if matched == shorter.len() {
                return true;
            }
            if self.matches(atom, &shorter[matched]) {
                matched += 1;
            }
        }

        matched == shorter.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trimmed(a: &&str, b: &&str) -> bool {
        a.trim() == b.trim()
    }

    #[test]
    fn test_exact_equality() {
        let eq = AtomEq::<&str>::exact();
        assert!(eq.is_exact());
        assert!(eq.matches(&"a", &"a"));
        assert!(!eq.matches(&"a", &" a"));
    }

    #[test]
    fn test_comparator_is_authoritative() {
        let eq = AtomEq::<&str>::with(&trimmed);
        assert!(!eq.is_exact());
        assert!(eq.matches(&" a ", &"a"));
        assert!(eq.contains(&"b", &["a", "  b"]));
        assert!(!AtomEq::exact().contains(&"b", &["a", "  b"]));
    }

    #[test]
    fn test_common_prefix_and_suffix() {
        let eq = AtomEq::exact();
        assert_eq!(eq.common_prefix_len(&[1, 2, 3], &[1, 2, 4]), 2);
        assert_eq!(eq.common_prefix_len(&[1, 2], &[1, 2, 3]), 2);
        assert_eq!(AtomEq::<i32>::exact().common_prefix_len(&[], &[1]), 0);
        assert_eq!(eq.common_suffix_len(&[0, 2, 3], &[1, 2, 3]), 2);
        assert_eq!(eq.common_suffix_len(&[3], &[1, 2, 3]), 1);
    }

    #[test]
    fn test_is_subsequence() {
        let eq = AtomEq::exact();
        assert!(eq.is_subsequence(&['e', 'e'], &['e', 'g', 'g', 'e']));
        assert!(eq.is_subsequence(&['e', 'g', 'g', 'e'], &['e', 'e']));
        assert!(eq.is_subsequence(&[], &['x']));
        assert!(!eq.is_subsequence(&['s', 's'], &['e', 'g', 'g', 'e']));
        assert!(!eq.is_subsequence(&['b', 'a'], &['a', 'b']));
        assert!(eq.is_subsequence(&['a', 'b'], &['a', 'b']));
    }

    #[test]
    fn test_is_subsequence_with_comparator() {
        let trimmed = |a: &&str, b: &&str| a.trim() == b.trim();
        let eq = AtomEq::<&str>::with(&trimmed);
        assert!(eq.is_subsequence(&["x ", " z"], &["x", "y", "z"]));
        assert!(eq.is_subsequence(&["x", "y", "z"], &[" x", "z  "]));
        assert!(!eq.is_subsequence(&["z", "x"], &["x", "y", "z"]));
        assert!(!AtomEq::exact().is_subsequence(&["x ", " z"], &["x", "y", "z"]));
    }

    #[test]
    fn test_closure_comparator() {
        let always = |_: &char, _: &char| true;
        let eq = AtomEq::<char>::with(&always);
        assert_eq!(eq.common_prefix_len(&['g', 'f'], &['a', 'b', 'c']), 2);
    }
}
