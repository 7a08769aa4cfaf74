//! Fragment reconstruction
//!
//! Merges each fragment group back into one element:
//!
//!     1. Order the members by their current position in the tree. Split markers say nothing
//!        about order, only the tree does.
//!     2. Take the children of every member, in that order, as one combined sequence.
//!     3. The first member survives: it receives the combined children and loses its split
//!        attributes. Its other attributes, reference id included, stay as they are.
//!     4. Every other member is detached.
//!
//! Attributes that differ on later fragments (a `style` set only on the second half, say) are
//! discarded with the fragment. The layout engine copies the source attributes onto every
//! fragment, so the first one already carries them.
//!
//! Groups are collected once, up front, and merged in the order their first member appears.
//! Node ids survive the moves, so a group nested inside another group's fragments is merged
//! correctly after its parent: by then its members sit side by side under the survivor.

use super::fragments::{collect, FragmentGroup, FragmentMarkers};
use crate::context::ExportContext;
use crate::dom::{position, Document, NodeId};
use crate::error::Warning;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Merge one group in place. Returns the surviving element, or `None` if the group was
/// skipped (fewer than two members could be placed).
pub fn merge_group(
    doc: &mut Document,
    group: &FragmentGroup,
    markers: &FragmentMarkers,
    ctx: &mut ExportContext,
) -> Option<NodeId> {
    let context = format!("fragment group '{}'", group.reference);

    // Identical positions only happen for the same node listed twice.
    let mut seen = HashSet::new();
    let mut members: Vec<NodeId> = Vec::with_capacity(group.members.len());
    for id in &group.members {
        if !seen.insert(*id) {
            continue;
        }
        if doc.is_attached(*id) {
            members.push(*id);
        } else {
            ctx.warn(Warning::invariant(
                &context,
                "a fragment is no longer attached to the document",
            ));
        }
    }

    let member_set: HashSet<NodeId> = members.iter().copied().collect();
    members.retain(|id| {
        let nested = has_ancestor_in(doc, *id, &member_set);
        if nested {
            ctx.warn(Warning::invariant(
                &context,
                "a fragment is nested inside another fragment of the same group",
            ));
        }
        !nested
    });

    if members.len() < 2 {
        if group.members.len() > 1 {
            ctx.warn(Warning::invariant(
                &context,
                "fewer than two fragments have a document position",
            ));
        }
        return None;
    }

    members.sort_by(|a, b| position::compare(doc, *a, *b).unwrap_or(Ordering::Equal));

    let survivor = members[0];
    let mut combined = Vec::new();
    for id in &members {
        combined.extend(doc.take_children(*id));
    }
    doc.set_children(survivor, combined);

    if let Some(element) = doc.element_mut(survivor) {
        element
            .attrs
            .retain(|name, _| !markers.is_split_attribute(name));
    }

    for id in &members[1..] {
        doc.detach(*id);
    }

    log::debug!(
        "reconstruct: merged {} fragments of '{}'",
        members.len(),
        group.reference
    );
    Some(survivor)
}

fn has_ancestor_in(doc: &Document, id: NodeId, set: &HashSet<NodeId>) -> bool {
    let mut current = doc.parent(id);
    while let Some(ancestor) = current {
        if set.contains(&ancestor) {
            return true;
        }
        current = doc.parent(ancestor);
    }
    false
}

/// Collect every fragment group under the root and merge the fragmented ones.
///
/// Returns the number of groups merged.
pub fn reconstruct_all(
    doc: &mut Document,
    markers: &FragmentMarkers,
    ctx: &mut ExportContext,
) -> usize {
    let groups = collect(doc, doc.root(), markers);
    let mut merged = 0;
    for group in groups.iter().filter(|g| g.is_fragmented()) {
        if merge_group(doc, group, markers, ctx).is_some() {
            merged += 1;
        }
    }
    merged
}
