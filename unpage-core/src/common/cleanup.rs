//! Layout scaffolding removal
//!
//! A paginated document wraps its content in several layers the export has no use for:
//! sheets, page boxes, bleed and crop marks, running margins. Cleanup reduces the tree to
//! the children of the page content containers, in document order, under a fresh root.
//!
//! The steps, in order:
//!
//!     1. Find every content container (pre-order). Containers nested inside another one are
//!        unwrapped in place, the outermost ones are the shells to discard.
//!     2. Lift the children of each outermost container, in order.
//!     3. Reset the root and append the lifted children to it.
//!     4. Remove every scaffold match left under the root.
//!
//! When no content container exists (the tree was already cleaned, or was never paginated)
//! only step 4 runs. Both paths leave a tree with no container and no scaffold, so a second
//! run changes nothing.

use super::compile_selectors;
use crate::dom::{Document, Element, NodeId, Selector};
use crate::error::Warning;

pub const DEFAULT_CONTENT_SELECTOR: &str = ".pagedjs_page_content";

pub const DEFAULT_SCAFFOLD_SELECTORS: &[&str] = &[
    ".pagedjs_bleed",
    ".pagedjs_marks-crop",
    ".pagedjs_marks-middle",
    ".pagedjs_margin",
    ".pagedjs_margin-top",
    ".pagedjs_margin-bottom",
    ".pagedjs_margin-left",
    ".pagedjs_margin-right",
    ".pagedjs_sheet",
    ".pagedjs_pagebox",
    ".pagedjs_area",
];

#[derive(Debug, Clone)]
pub struct Cleanup {
    content: Option<Selector>,
    scaffold: Vec<Selector>,
    root_tag: String,
}

impl Cleanup {
    pub fn new(content: Option<Selector>, scaffold: Vec<Selector>) -> Self {
        Cleanup {
            content,
            scaffold,
            root_tag: "body".to_string(),
        }
    }

    /// Build from selector strings. Malformed selectors are dropped with a warning.
    pub fn from_selectors<S: AsRef<str>>(content: &str, scaffold: &[S]) -> (Self, Vec<Warning>) {
        let (mut content, mut warnings) = compile_selectors(&[content]);
        let (scaffold, scaffold_warnings) = compile_selectors(scaffold);
        warnings.extend(scaffold_warnings);
        (Cleanup::new(content.pop(), scaffold), warnings)
    }

    pub fn with_root_tag(mut self, tag: impl Into<String>) -> Self {
        self.root_tag = tag.into();
        self
    }

    fn is_content(&self, doc: &Document, id: NodeId) -> bool {
        self.content
            .as_ref()
            .is_some_and(|selector| selector.matches_node(doc, id))
    }

    fn is_scaffold(&self, doc: &Document, id: NodeId) -> bool {
        self.scaffold.iter().any(|s| s.matches_node(doc, id))
    }

    /// Run cleanup over the whole document, in place.
    pub fn apply(&self, doc: &mut Document) {
        let root = doc.root();
        let containers: Vec<NodeId> = doc
            .descendants(root)
            .filter(|id| *id != root && self.is_content(doc, *id))
            .collect();

        if !containers.is_empty() {
            let (outer, nested): (Vec<NodeId>, Vec<NodeId>) = containers
                .iter()
                .partition(|id| !self.has_content_ancestor(doc, **id));
            for id in nested {
                doc.unwrap(id);
            }

            let mut lifted = Vec::new();
            for id in &outer {
                lifted.extend(doc.take_children(*id));
            }
            log::debug!(
                "cleanup: lifted {} nodes out of {} content containers",
                lifted.len(),
                outer.len()
            );

            doc.take_children(root);
            if let Some(element) = doc.element_mut(root) {
                *element = Element::new(self.root_tag.as_str());
            }
            doc.set_children(root, lifted);
        }

        self.remove_scaffold(doc);
    }

    fn has_content_ancestor(&self, doc: &Document, id: NodeId) -> bool {
        let mut current = doc.parent(id);
        while let Some(ancestor) = current {
            if self.is_content(doc, ancestor) {
                return true;
            }
            current = doc.parent(ancestor);
        }
        false
    }

    fn remove_scaffold(&self, doc: &mut Document) {
        let root = doc.root();
        let mut removed = 0;
        let mut stack: Vec<NodeId> = doc.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.is_scaffold(doc, id) {
                doc.detach(id);
                removed += 1;
                continue;
            }
            stack.extend(doc.children(id).iter().rev().copied());
        }
        if removed > 0 {
            log::debug!("cleanup: removed {removed} scaffold nodes");
        }
    }
}

impl Default for Cleanup {
    fn default() -> Self {
        Cleanup::from_selectors(DEFAULT_CONTENT_SELECTOR, DEFAULT_SCAFFOLD_SELECTORS).0
    }
}
