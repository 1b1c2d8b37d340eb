//! Full-matrix dynamic programming LCS
//!
//! Fills an `(n+1) x (m+1)` score table where `M[i][j]` is the LCS length of
//! `a[..i]` and `b[..j]`, then walks back from `M[n][m]`.
//!
//! # Backtrace order
//!
//! On a match both indices step back diagonally. Otherwise the walk moves
//! along `b` only when `M[i-1][j] < M[i][j-1]` and along `a` in every other
//! case, ties included. This fixes which of several equally long LCSs is
//! returned.

use super::LongestCommonSubsequence;
use crate::compare::AtomEq;

/// Full-matrix engine: O(n*m) time and space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynamicProgramming;

impl LongestCommonSubsequence for DynamicProgramming {
    fn lcs_indices<T: PartialEq>(&self, a: &[T], b: &[T], eq: AtomEq<'_, T>) -> Vec<usize> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }

        let table = ScoreTable::build(a, b, eq);

        let mut indices = Vec::with_capacity(table.get(a.len(), b.len()));
        let (mut i, mut j) = (a.len(), b.len());
        while i > 0 && j > 0 {
            if eq.matches(&a[i - 1], &b[j - 1]) {
                indices.push(i - 1);
                i -= 1;
                j -= 1;
            } else if table.get(i - 1, j) < table.get(i, j - 1) {
                j -= 1;
            } else {
                i -= 1;
            }
        }

        indices.reverse();
        indices
    }
}

/// Row-major LCS length table.
struct ScoreTable {
    width: usize,
    cells: Vec<usize>,
}

impl ScoreTable {
    fn build<T: PartialEq>(a: &[T], b: &[T], eq: AtomEq<'_, T>) -> Self {
        let width = b.len() + 1;
        let mut cells = vec![0; (a.len() + 1) * width];

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let here = i * width + j;
                cells[here] = if eq.matches(&a[i - 1], &b[j - 1]) {
                    cells[here - width - 1] + 1
                } else {
                    cells[here - width].max(cells[here - 1])
                };
            }
        }

        Self { width, cells }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }
}

/// LCS length of `a` and `b`, computed with a single rolling row.
#[cfg(test)]
pub(crate) fn lcs_len<T: PartialEq>(a: &[T], b: &[T], eq: AtomEq<'_, T>) -> usize {
    let mut row = vec![0; b.len() + 1];
    for atom in a {
        let mut diagonal = 0;
        for (j, other) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if eq.matches(atom, other) {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
