//! Diff chunk model
//!
//! The output of every differ in this crate is an ordered list of
//! [`DiffElement`]s. An element is either a single typed [`DiffChunk`] or an
//! [`EditPair`] grouping a removal with the addition that replaces it.
//!
//! # Sides
//!
//! Every element has an *original side* and a *modified side*:
//!
//! | Element           | original side | modified side |
//! |-------------------|---------------|---------------|
//! | `Unchanged(xs)`   | `xs`          | `xs`          |
//! | `Removed(xs)`     | `xs`          | -             |
//! | `Added(xs)`       | -             | `xs`          |
//! | `Edit { r, a }`   | `r`           | `a`           |
//! | `Conflict{s1,s2}` | `s1`          | `s2`          |
//!
//! Concatenating the sides of a two-way diff reconstructs its inputs exactly.
//! See [`Diff::original_side`] and [`Diff::modified_side`].

pub mod processor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Chunks
// =============================================================================

/// Kind of a [`DiffChunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChunkKind {
    /// Present in both sequences
    Unchanged,
    /// Only in the modified sequence
    Added,
    /// Only in the original sequence
    Removed,
    /// Two copies disagree
    Conflict,
}

/// A typed, contiguous region of diff output.
///
/// Chunks produced by this crate never carry empty content; the
/// [`processor`] constructors return `None` instead. A `Conflict` may have
/// one empty side, never two.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffChunk<T> {
    /// Atoms present on both sides
    Unchanged(Vec<T>),
    /// Atoms only present in the modified sequence
    Added(Vec<T>),
    /// Atoms only present in the original sequence
    Removed(Vec<T>),
    /// Two disagreeing modifications of the same region; `side1` belongs to
    /// the first copy in argument order
    Conflict { side1: Vec<T>, side2: Vec<T> },
}

impl<T> DiffChunk<T> {
    /// The chunk's kind.
    pub fn kind(&self) -> ChunkKind {
        match self {
            Self::Unchanged(_) => ChunkKind::Unchanged,
            Self::Added(_) => ChunkKind::Added,
            Self::Removed(_) => ChunkKind::Removed,
            Self::Conflict { .. } => ChunkKind::Conflict,
        }
    }

    /// Content of a single-sided chunk. `None` for conflicts.
    pub fn content(&self) -> Option<&[T]> {
        match self {
            Self::Unchanged(atoms) | Self::Added(atoms) | Self::Removed(atoms) => Some(atoms),
            Self::Conflict { .. } => None,
        }
    }

    /// Mutable content of a single-sided chunk. `None` for conflicts.
    pub fn content_mut(&mut self) -> Option<&mut Vec<T>> {
        match self {
            Self::Unchanged(atoms) | Self::Added(atoms) | Self::Removed(atoms) => Some(atoms),
            Self::Conflict { .. } => None,
        }
    }

    /// Total number of atoms held (both sides for conflicts).
    pub fn len(&self) -> usize {
        match self {
            Self::Unchanged(atoms) | Self::Added(atoms) | Self::Removed(atoms) => atoms.len(),
            Self::Conflict { side1, side2 } => side1.len() + side2.len(),
        }
    }

    /// Whether the chunk holds no atoms at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A removal immediately replaced by an addition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditPair<T> {
    /// Original atoms being replaced
    pub removed: Vec<T>,
    /// Atoms replacing them
    pub added: Vec<T>,
}

impl<T> EditPair<T> {
    /// Create an edit pair from both sides.
    pub fn new(removed: Vec<T>, added: Vec<T>) -> Self {
        Self { removed, added }
    }
}

/// One entry of a diff: a single chunk or an edit pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffElement<T> {
    /// A single typed chunk
    Chunk(DiffChunk<T>),
    /// A removal and its replacement
    Edit(EditPair<T>),
}

impl<T> DiffElement<T> {
    /// Unchanged chunk element
    pub fn unchanged(atoms: Vec<T>) -> Self {
        Self::Chunk(DiffChunk::Unchanged(atoms))
    }

    /// Added chunk element
    pub fn added(atoms: Vec<T>) -> Self {
        Self::Chunk(DiffChunk::Added(atoms))
    }

    /// Removed chunk element
    pub fn removed(atoms: Vec<T>) -> Self {
        Self::Chunk(DiffChunk::Removed(atoms))
    }

    /// Conflict element, `side1` from the first copy
    pub fn conflict(side1: Vec<T>, side2: Vec<T>) -> Self {
        Self::Chunk(DiffChunk::Conflict { side1, side2 })
    }

    /// Edit pair element
    pub fn edit(removed: Vec<T>, added: Vec<T>) -> Self {
        Self::Edit(EditPair::new(removed, added))
    }

    /// Check if this is an edit pair
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    /// Check if this is a conflict chunk
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Chunk(DiffChunk::Conflict { .. }))
    }

    /// Kind of the wrapped chunk; `None` for edit pairs.
    pub fn chunk_kind(&self) -> Option<ChunkKind> {
        match self {
            Self::Chunk(chunk) => Some(chunk.kind()),
            Self::Edit(_) => None,
        }
    }

    /// Atoms this element contributes to the original sequence.
    pub fn original_side(&self) -> &[T] {
        match self {
            Self::Chunk(DiffChunk::Unchanged(atoms) | DiffChunk::Removed(atoms)) => atoms,
            Self::Chunk(DiffChunk::Added(_)) => &[],
            Self::Chunk(DiffChunk::Conflict { side1, .. }) => side1,
            Self::Edit(edit) => &edit.removed,
        }
    }

    /// Atoms this element contributes to the modified sequence.
    pub fn modified_side(&self) -> &[T] {
        match self {
            Self::Chunk(DiffChunk::Unchanged(atoms) | DiffChunk::Added(atoms)) => atoms,
            Self::Chunk(DiffChunk::Removed(_)) => &[],
            Self::Chunk(DiffChunk::Conflict { side2, .. }) => side2,
            Self::Edit(edit) => &edit.added,
        }
    }
}

impl<T> From<DiffChunk<T>> for DiffElement<T> {
    fn from(chunk: DiffChunk<T>) -> Self {
        Self::Chunk(chunk)
    }
}

impl<T> From<EditPair<T>> for DiffElement<T> {
    fn from(edit: EditPair<T>) -> Self {
        Self::Edit(edit)
    }
}

// =============================================================================
// Diff
// =============================================================================

/// Ordered result of a two-way or three-way diff.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Diff<T> {
    elements: Vec<DiffElement<T>>,
}

impl<T> Default for Diff<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T> Diff<T> {
    /// Wrap an ordered element list.
    pub fn new(elements: Vec<DiffElement<T>>) -> Self {
        Self { elements }
    }

    /// Elements in order
    pub fn elements(&self) -> &[DiffElement<T>] {
        &self.elements
    }

    /// Consume into the element list
    pub fn into_elements(self) -> Vec<DiffElement<T>> {
        self.elements
    }

    /// Iterate over elements
    pub fn iter(&self) -> std::slice::Iter<'_, DiffElement<T>> {
        self.elements.iter()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Check if anything other than unchanged chunks is present
    pub fn has_changes(&self) -> bool {
        self.elements
            .iter()
            .any(|element| element.chunk_kind() != Some(ChunkKind::Unchanged))
    }

    /// Check if any conflict chunk is present
    pub fn has_conflicts(&self) -> bool {
        self.elements.iter().any(DiffElement::is_conflict)
    }

    /// Count atoms per kind. Edit pairs count towards `added` and `removed`.
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for element in &self.elements {
            match element {
                DiffElement::Chunk(DiffChunk::Unchanged(atoms)) => stats.unchanged += atoms.len(),
                DiffElement::Chunk(DiffChunk::Added(atoms)) => stats.added += atoms.len(),
                DiffElement::Chunk(DiffChunk::Removed(atoms)) => stats.removed += atoms.len(),
                DiffElement::Chunk(DiffChunk::Conflict { .. }) => stats.conflicts += 1,
                DiffElement::Edit(edit) => {
                    stats.removed += edit.removed.len();
                    stats.added += edit.added.len();
                    stats.edits += 1;
                }
            }
        }
        stats
    }
}

impl<T: Clone> Diff<T> {
    /// Concatenated original-side content. For a two-way diff this is the
    /// original input.
    pub fn original_side(&self) -> Vec<T> {
        self.elements
            .iter()
            .flat_map(|element| element.original_side().iter().cloned())
            .collect()
    }

    /// Concatenated modified-side content. For a two-way diff this is the
    /// modified input.
    pub fn modified_side(&self) -> Vec<T> {
        self.elements
            .iter()
            .flat_map(|element| element.modified_side().iter().cloned())
            .collect()
    }
}

impl<T> From<Vec<DiffElement<T>>> for Diff<T> {
    fn from(elements: Vec<DiffElement<T>>) -> Self {
        Self::new(elements)
    }
}

impl<T> FromIterator<DiffElement<T>> for Diff<T> {
    fn from_iter<I: IntoIterator<Item = DiffElement<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Diff<T> {
    type Item = DiffElement<T>;
    type IntoIter = std::vec::IntoIter<DiffElement<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Diff<T> {
    type Item = &'a DiffElement<T>;
    type IntoIter = std::slice::Iter<'a, DiffElement<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Atom counts of a [`Diff`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffStats {
    /// Atoms in unchanged chunks
    pub unchanged: usize,
    /// Atoms in added chunks and edit additions
    pub added: usize,
    /// Atoms in removed chunks and edit removals
    pub removed: usize,
    /// Number of edit pairs
    pub edits: usize,
    /// Number of conflict chunks
    pub conflicts: usize,
}

impl DiffStats {
    /// Atoms that differ between the two sides (conflicts not included)
    pub fn changed(&self) -> usize {
        self.added + self.removed
    }
}
