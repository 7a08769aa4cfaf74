//! Core data structures for the working document tree.
//!
//! The tree is an arena: nodes live in a `Vec` and refer to each other by [`NodeId`].
//! Ids stay valid while the tree is rearranged, which is what lets fragment groups be
//! collected once and then merged one by one. Detached nodes stay in the arena but are no
//! longer reachable from the root; a working copy is short lived so they are never reclaimed.

use super::style;
use std::collections::HashMap;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Either an element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element(Element),
    Text(String),
}

/// An element with its tag and attributes. Children live in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attributes,
}

/// Ordered attribute map with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
struct NodeEntry {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// A single-rooted tree of elements and text.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeEntry>,
    root: NodeId,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Set an attribute, replacing the value in place if the name already exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.entries.retain(|(key, value)| keep(key, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Value of one declaration in the inline `style` attribute.
    pub fn style_declaration(&self, property: &str) -> Option<String> {
        style::declaration(self.attrs.get("style")?, property)
    }
}

impl Document {
    /// Create a document holding only an empty root element.
    pub fn new(root_tag: &str) -> Self {
        Document {
            nodes: vec![NodeEntry {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element(Element::new(root_tag)),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push(NodeData::Element(element))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            NodeData::Element(_) => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].data, NodeData::Element(_))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element children only, in order.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.is_element(*child))
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` right before `reference` under the same parent.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.detach(child);
        let index = self.index_in_parent(reference).unwrap_or(0);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, child);
    }

    /// Remove a node from its parent. The node keeps its own subtree.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    /// Detach and return every child of `id`.
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// Replace the children of `parent` with `children`, re-parenting each one.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        self.take_children(parent);
        for child in children {
            self.append(parent, child);
        }
    }

    /// Replace an element by its children, in place.
    pub fn unwrap(&mut self, id: NodeId) {
        if self.parent(id).is_none() {
            return;
        }
        for child in self.take_children(id) {
            self.insert_before(id, child);
        }
        self.detach(id);
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    /// Pre-order traversal of the subtree rooted at `id`, `id` included.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Whether `id` can be reached from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Concatenated text of every text node under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let NodeData::Text(text) = self.data(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// First attached element carrying the given `id` attribute.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|node| self.element(*node).and_then(Element::id) == Some(id))
    }

    /// Map of every `id` attribute under the root to its element.
    pub fn id_index(&self) -> HashMap<String, NodeId> {
        let mut index = HashMap::new();
        for node in self.descendants(self.root) {
            if let Some(id) = self.element(node).and_then(Element::id) {
                index.entry(id.to_string()).or_insert(node);
            }
        }
        index
    }

    /// Deep-copy the subtree at `id` into a new document whose root is the copy.
    pub fn clone_subtree(&self, id: NodeId) -> Document {
        let root_data = self.data(id).clone();
        let mut doc = Document {
            nodes: vec![NodeEntry {
                parent: None,
                children: Vec::new(),
                data: root_data,
            }],
            root: NodeId(0),
        };
        let root = doc.root;
        for child in self.children(id) {
            doc.import(root, self, *child);
        }
        doc
    }

    /// Deep-copy the subtree at `source_id` from `source` and append it under `parent`.
    pub fn import(&mut self, parent: NodeId, source: &Document, source_id: NodeId) -> NodeId {
        let copy = self.push(source.data(source_id).clone());
        self.append(parent, copy);
        let mut pending = vec![(source_id, copy)];
        while let Some((from, to)) = pending.pop() {
            for child in source.children(from) {
                let child_copy = self.push(source.data(*child).clone());
                self.append(to, child_copy);
                pending.push((*child, child_copy));
            }
        }
        copy
    }

    /// Read-only structural view of an element.
    pub fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.element(id).map(|element| ElementRef {
            doc: self,
            id,
            element,
        })
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

/// The structural view rules match against: tag, attributes, classes and position.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: NodeId,
    element: &'a Element,
}

impl<'a> ElementRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn tag(&self) -> &'a str {
        &self.element.tag
    }

    pub fn is(&self, tag: &str) -> bool {
        self.element.tag == tag
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.attrs.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.element.attrs.contains(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.element.has_class(class)
    }

    pub fn style_declaration(&self, property: &str) -> Option<String> {
        self.element.style_declaration(property)
    }

    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.doc.element_ref(self.doc.parent(self.id)?)
    }

    pub fn children(&self) -> &'a [NodeId] {
        self.doc.children(self.id)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let doc = self.doc;
        doc.children(self.id)
            .iter()
            .filter_map(move |child| doc.element_ref(*child))
    }

    /// First descendant element with the given tag.
    pub fn find(&self, tag: &str) -> Option<ElementRef<'a>> {
        let doc = self.doc;
        doc.descendants(self.id)
            .skip(1)
            .filter_map(|node| doc.element_ref(node))
            .find(|el| el.is(tag))
    }

    /// Zero-based position among element siblings sharing this element's tag.
    pub fn sibling_index(&self) -> usize {
        let Some(parent) = self.doc.parent(self.id) else {
            return 0;
        };
        self.doc
            .child_elements(parent)
            .take_while(|sibling| *sibling != self.id)
            .filter(|sibling| {
                self.doc.element(*sibling).map(|e| e.tag.as_str()) == Some(self.tag())
            })
            .count()
    }

    /// Whether this is the last element child of its parent.
    pub fn is_last_element(&self) -> bool {
        match self.doc.parent(self.id) {
            Some(parent) => self.doc.child_elements(parent).last() == Some(self.id),
            None => true,
        }
    }

    pub fn text_content(&self) -> String {
        self.doc.text_content(self.id)
    }
}
