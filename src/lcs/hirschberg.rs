//! Hirschberg's linear-space LCS
//!
//! Splits `a` in half, scores the left half forwards and the right half
//! backwards against `b`, and cuts `b` where the two score rows sum to the
//! maximum. Each half is then solved against its share of `b`.
//!
//! # Split rule
//!
//! The cut is the *first* index `k` (scanning `0..=|b|`) that maximises
//! `forward[k] + backward[|b| - k]`. Later indices with an equal sum are
//! ignored.
//!
//! # Work stack
//!
//! Segments are processed from an explicit stack instead of recursion, right
//! half pushed before left, so leaves are reached in left-to-right order and
//! their matches can be appended directly. Stack depth is logarithmic in
//! `|a|`.

use smallvec::SmallVec;

use super::LongestCommonSubsequence;
use crate::compare::AtomEq;

/// Linear-space divide-and-conquer engine: O(n*m) time, O(m) auxiliary space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hirschberg;

/// Half-open ranges of `a` and `b` still to be solved.
#[derive(Debug, Clone, Copy)]
struct Segment {
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

impl LongestCommonSubsequence for Hirschberg {
    fn lcs_indices<T: PartialEq>(&self, a: &[T], b: &[T], eq: AtomEq<'_, T>) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut stack: SmallVec<[Segment; 32]> = SmallVec::new();
        let mut processed = 0usize;

        stack.push(Segment {
            a_start: 0,
            a_end: a.len(),
            b_start: 0,
            b_end: b.len(),
        });

        while let Some(segment) = stack.pop() {
            processed += 1;
            let left = &a[segment.a_start..segment.a_end];
            let right = &b[segment.b_start..segment.b_end];

            if left.is_empty() || right.is_empty() {
                continue;
            }

            if left.len() == 1 {
                if eq.contains(&left[0], right) {
                    indices.push(segment.a_start);
                }
                continue;
            }

            let mid = left.len() / 2;
            let forward = score_row(left[..mid].iter(), right.iter(), eq);
            let backward = score_row(left[mid..].iter().rev(), right.iter().rev(), eq);
            let cut = best_cut(&forward, &backward);

            stack.push(Segment {
                a_start: segment.a_start + mid,
                a_end: segment.a_end,
                b_start: segment.b_start + cut,
                b_end: segment.b_end,
            });
            stack.push(Segment {
                a_start: segment.a_start,
                a_end: segment.a_start + mid,
                b_start: segment.b_start,
                b_end: segment.b_start + cut,
            });
        }

        tracing::trace!(
            a_len = a.len(),
            b_len = b.len(),
            segments = processed,
            lcs_len = indices.len(),
            "hirschberg lcs"
        );

        indices
    }
}

/// Last row of the Needleman-Wunsch LCS score table of `a` against `b`.
fn score_row<'t, T, A, B>(a: A, b: B, eq: AtomEq<'_, T>) -> Vec<usize>
where
    T: PartialEq + 't,
    A: Iterator<Item = &'t T>,
    B: Iterator<Item = &'t T> + ExactSizeIterator + Clone,
{
    let mut row = vec![0; b.len() + 1];
    for atom in a {
        let mut diagonal = 0;
        for (j, other) in b.clone().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if eq.matches(atom, other) {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row
}

/// First `k` maximising `forward[k] + backward[len - k]`.
fn best_cut(forward: &[usize], backward: &[usize]) -> usize {
    let len = forward.len() - 1;
    let mut best = 0;
    let mut best_score = 0;
    for k in 0..=len {
        let score = forward[k] + backward[len - k];
        if score > best_score {
            best_score = score;
            best = k;
        }
    }
    best
}
