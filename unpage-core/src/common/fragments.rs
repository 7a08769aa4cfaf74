//! Fragment collection
//!
//! The layout engine stamps every fragment of a split element with the same reference id
//! (`data-ref` by default) and adds split bookkeeping attributes (`data-split-from`,
//! `data-split-to`, ...) sharing one prefix. Collection is one pre-order walk that groups
//! elements by reference id. Groups keep the order in which their first member was met,
//! and members keep document order.

use crate::dom::{Document, NodeId};
use std::collections::HashMap;

pub const DEFAULT_REFERENCE_ATTR: &str = "data-ref";
pub const DEFAULT_SPLIT_PREFIX: &str = "data-split";

/// Attribute names the layout engine uses to mark fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentMarkers {
    pub reference: String,
    pub split_prefix: String,
}

impl FragmentMarkers {
    pub fn new(reference: impl Into<String>, split_prefix: impl Into<String>) -> Self {
        FragmentMarkers {
            reference: reference.into(),
            split_prefix: split_prefix.into(),
        }
    }

    /// Whether an attribute only describes how the element was split.
    pub fn is_split_attribute(&self, name: &str) -> bool {
        !self.split_prefix.is_empty() && name.starts_with(&self.split_prefix)
    }

    pub fn reference_of<'a>(&self, doc: &'a Document, id: NodeId) -> Option<&'a str> {
        doc.element(id)?.attr(&self.reference)
    }
}

impl Default for FragmentMarkers {
    fn default() -> Self {
        FragmentMarkers::new(DEFAULT_REFERENCE_ATTR, DEFAULT_SPLIT_PREFIX)
    }
}

/// Every element carrying one reference id, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentGroup {
    pub reference: String,
    pub members: Vec<NodeId>,
}

impl FragmentGroup {
    /// A single-member group is an element that was never split.
    pub fn is_fragmented(&self) -> bool {
        self.members.len() > 1
    }
}

/// Group the elements under `root` by reference id.
pub fn collect(doc: &Document, root: NodeId, markers: &FragmentMarkers) -> Vec<FragmentGroup> {
    let mut groups: Vec<FragmentGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for id in doc.descendants(root) {
        let Some(reference) = markers.reference_of(doc, id) else {
            continue;
        };
        match index.get(reference) {
            Some(position) => groups[*position].members.push(id),
            None => {
                index.insert(reference, groups.len());
                groups.push(FragmentGroup {
                    reference: reference.to_string(),
                    members: vec![id],
                });
            }
        }
    }

    groups
}
