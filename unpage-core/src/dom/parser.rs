//! HTML input (rendered pages → working tree)
//!
//! The pagination engine's output is parsed with `html5ever` into an `RcDom`, then the
//! `<body>` subtree is copied into a [`Document`] arena. Only elements and text survive the
//! copy: comments, doctypes and processing instructions carry nothing the export needs.
//!
//! Whitespace is normalized the way a browser would render it, so rules never see the
//! indentation the engine wrote between blocks: runs of whitespace collapse to one space
//! (except inside `pre`/`textarea`), and whitespace-only text next to a block-level sibling
//! is dropped. Whitespace at the edge of inline content is kept, since a fragment boundary
//! can fall right after a word.

use super::nodes::{Document, Element, NodeData, NodeId};
use crate::error::ExportError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Elements that start a new block in rendered output.
pub const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

const PREFORMATTED_TAGS: &[&str] = &["pre", "textarea", "listing", "plaintext"];

pub fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Parse an HTML document and return its `<body>` as a working tree.
pub fn parse_html(source: &str) -> Result<Document, ExportError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(source);

    let body = find_element(&dom.document, "body").ok_or_else(|| {
        ExportError::ParseError("document has no <body> element".to_string())
    })?;

    let mut doc = Document::new("body");
    if let Some(root) = doc.element_mut(doc.root()) {
        *root = convert_element(&body).unwrap_or_else(|| Element::new("body"));
    }
    let root = doc.root();
    for child in body.children.borrow().iter() {
        copy_node(child, &mut doc, root);
    }

    normalize_whitespace(&mut doc);
    Ok(doc)
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let RcNodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn convert_element(handle: &Handle) -> Option<Element> {
    match &handle.data {
        RcNodeData::Element { name, attrs, .. } => {
            let mut element = Element::new(name.local.to_string());
            for attr in attrs.borrow().iter() {
                element
                    .attrs
                    .set(attr.name.local.to_string(), attr.value.to_string());
            }
            Some(element)
        }
        _ => None,
    }
}

fn copy_node(handle: &Handle, doc: &mut Document, parent: NodeId) {
    match &handle.data {
        RcNodeData::Element { .. } => {
            let Some(element) = convert_element(handle) else {
                return;
            };
            let id = doc.create_element(element);
            doc.append(parent, id);
            for child in handle.children.borrow().iter() {
                copy_node(child, doc, id);
            }
        }
        RcNodeData::Text { contents } => {
            let id = doc.create_text(contents.borrow().to_string());
            doc.append(parent, id);
        }
        // Comments, doctypes and processing instructions are not content
        _ => {}
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn is_block_node(doc: &Document, id: NodeId) -> bool {
    doc.element(id).map(|e| is_block(&e.tag)).unwrap_or(false)
}

/// Collapse whitespace runs and drop whitespace-only text between blocks.
pub fn normalize_whitespace(doc: &mut Document) {
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        let preformatted = doc
            .element(id)
            .map(|e| PREFORMATTED_TAGS.contains(&e.tag.as_str()))
            .unwrap_or(false);
        if preformatted {
            continue;
        }

        let children = doc.children(id).to_vec();
        let mut kept = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            let collapsed = match doc.data(*child) {
                NodeData::Text(text) => Some(collapse_whitespace(text)),
                NodeData::Element(_) => None,
            };
            let Some(collapsed) = collapsed else {
                kept.push(*child);
                stack.push(*child);
                continue;
            };

            if collapsed.trim().is_empty() {
                let before = index.checked_sub(1).map(|i| children[i]);
                let after = children.get(index + 1).copied();
                let touches_block = before.map(|n| is_block_node(doc, n)).unwrap_or(false)
                    || after.map(|n| is_block_node(doc, n)).unwrap_or(false);
                let alone = before.is_none() && after.is_none();
                if collapsed.is_empty() || touches_block || alone && is_block_node(doc, id) {
                    continue;
                }
            }

            let text_id = doc.create_text(collapsed);
            kept.push(text_id);
        }
        doc.set_children(id, kept);
    }
}
