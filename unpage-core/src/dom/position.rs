//! Document-order comparison between nodes.
//!
//! Order is defined by the pre-order walk from the root: a node precedes another when its
//! path of child indices is lexicographically smaller, and an ancestor precedes its
//! descendants. This never looks at ids or creation order, so nodes moved around by page
//! extraction compare by where they sit now.

use super::nodes::{Document, NodeId};
use std::cmp::Ordering;

/// Child-index path from the root to `id`, or `None` when `id` is not attached.
pub fn path(doc: &Document, id: NodeId) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    let mut current = id;
    while current != doc.root() {
        indices.push(doc.index_in_parent(current)?);
        current = doc.parent(current)?;
    }
    indices.reverse();
    Some(indices)
}

/// Compare two nodes by document position.
///
/// Returns `None` when either node is detached, since it has no position to compare.
pub fn compare(doc: &Document, a: NodeId, b: NodeId) -> Option<Ordering> {
    if a == b {
        return Some(Ordering::Equal);
    }
    let path_a = path(doc, a)?;
    let path_b = path(doc, b)?;
    Some(path_a.cmp(&path_b))
}
