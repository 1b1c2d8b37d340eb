//! Chunk construction and extraction
//!
//! Stateless helpers shared by the two-way differ and both merge algorithms.
//! Constructors never produce empty chunks: empty input yields `None`.

use super::{DiffChunk, DiffElement};

/// Content an element takes from the original sequence, as seen by the
/// merge algorithms: `Unchanged`/`Removed` content and the removed side of an
/// edit. `Added` and `Conflict` contribute nothing.
pub fn original_content<T>(element: &DiffElement<T>) -> &[T] {
    match element {
        DiffElement::Chunk(DiffChunk::Unchanged(atoms) | DiffChunk::Removed(atoms)) => atoms,
        DiffElement::Chunk(DiffChunk::Added(_) | DiffChunk::Conflict { .. }) => &[],
        DiffElement::Edit(edit) => &edit.removed,
    }
}

/// Content an element introduces: `Added` content and the added side of an
/// edit. `Unchanged`, `Removed` and `Conflict` contribute nothing.
pub fn new_content<T>(element: &DiffElement<T>) -> &[T] {
    match element {
        DiffElement::Chunk(DiffChunk::Added(atoms)) => atoms,
        DiffElement::Chunk(
            DiffChunk::Unchanged(_) | DiffChunk::Removed(_) | DiffChunk::Conflict { .. },
        ) => &[],
        DiffElement::Edit(edit) => &edit.added,
    }
}

/// `Removed` chunk, or `None` when `atoms` is empty.
pub fn make_removed<T>(atoms: Vec<T>) -> Option<DiffElement<T>> {
    (!atoms.is_empty()).then(|| DiffElement::removed(atoms))
}

/// `Added` chunk, or `None` when `atoms` is empty.
pub fn make_added<T>(atoms: Vec<T>) -> Option<DiffElement<T>> {
    (!atoms.is_empty()).then(|| DiffElement::added(atoms))
}

/// `Unchanged` chunk, or `None` when `atoms` is empty.
pub fn make_unchanged<T>(atoms: Vec<T>) -> Option<DiffElement<T>> {
    (!atoms.is_empty()).then(|| DiffElement::unchanged(atoms))
}

/// Edit pair when both sides are non-empty, the single non-empty side as a
/// plain chunk, `None` when both are empty.
pub fn make_edit<T>(removed: Vec<T>, added: Vec<T>) -> Option<DiffElement<T>> {
    match (removed.is_empty(), added.is_empty()) {
        (false, false) => Some(DiffElement::edit(removed, added)),
        (false, true) => make_removed(removed),
        (true, false) => make_added(added),
        (true, true) => None,
    }
}

/// Conflict between `side1` and `side2`, swapped when `flip` is set.
/// One side may be empty; `None` only when both are.
pub fn make_conflict<T>(side1: Vec<T>, side2: Vec<T>, flip: bool) -> Option<DiffElement<T>> {
    if side1.is_empty() && side2.is_empty() {
        return None;
    }

    Some(if flip {
        DiffElement::conflict(side2, side1)
    } else {
        DiffElement::conflict(side1, side2)
    })
}
