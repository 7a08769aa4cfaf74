//! Rule engine
//!
//! `serialize(node)` is a pure function of the node and the rule set:
//!
//!     - Text: escaped through the escape table, or passed through verbatim when an opaque
//!       element encloses it.
//!     - Element: children are serialized first and concatenated as they are. The highest
//!       priority matching rule then renders the element from that content. Without a rule an
//!       opaque element is kept as its raw HTML and any other element yields its content.
//!
//! Per-call state (opaque nesting depth, the id index, footnote resolution stack, warnings)
//! lives in a [`RenderContext`] created for one serialization and dropped after it.

use super::RuleSet;
use crate::context::ExportContext;
use crate::dom::{html, Document, NodeData, NodeId};
use crate::error::Warning;
use std::collections::HashMap;
use std::sync::Arc;

/// Serializes working trees with one fixed rule set.
///
/// Cheap to clone: the rule set is shared.
#[derive(Debug, Clone)]
pub struct Serializer {
    rules: Arc<RuleSet>,
}

impl Serializer {
    pub fn new(rules: RuleSet) -> Self {
        Serializer {
            rules: Arc::new(rules),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Serialize one node, without post-processing.
    pub fn serialize(&self, doc: &Document, id: NodeId, ctx: &mut ExportContext) -> String {
        let mut render = RenderContext::new(doc, &self.rules);
        let out = render.serialize(id);
        ctx.extend(render.warnings);
        out
    }

    /// Serialize a whole document and normalize the blank lines between blocks.
    pub fn serialize_document(&self, doc: &Document, ctx: &mut ExportContext) -> String {
        postprocess(&self.serialize(doc, doc.root(), ctx))
    }
}

/// State of one serialization call, handed to every render function.
pub struct RenderContext<'a> {
    doc: &'a Document,
    rules: &'a RuleSet,
    opaque_depth: usize,
    ids: Option<HashMap<String, NodeId>>,
    resolving: Vec<NodeId>,
    warnings: Vec<Warning>,
}

impl<'a> RenderContext<'a> {
    pub fn new(doc: &'a Document, rules: &'a RuleSet) -> Self {
        RenderContext {
            doc,
            rules,
            opaque_depth: 0,
            ids: None,
            resolving: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Whether text is currently escaped (no opaque ancestor).
    pub fn is_escaping(&self) -> bool {
        self.opaque_depth == 0
    }

    pub fn serialize(&mut self, id: NodeId) -> String {
        let doc = self.doc;
        let rules = self.rules;
        match doc.data(id) {
            NodeData::Text(text) if self.is_escaping() => rules.escapes().escape(text),
            NodeData::Text(text) => text.clone(),
            NodeData::Element(_) => {
                let Some(element) = doc.element_ref(id) else {
                    return String::new();
                };
                let opaque = rules.is_opaque(&element);
                if opaque {
                    self.opaque_depth += 1;
                }
                let content = self.serialize_children(id);
                let out = match rules.find_rule(&element) {
                    Some(rule) => rule.render(&content, element, self),
                    None if opaque => self.outer_html(id),
                    None => content,
                };
                if opaque {
                    self.opaque_depth -= 1;
                }
                out
            }
        }
    }

    pub fn serialize_children(&mut self, id: NodeId) -> String {
        let doc = self.doc;
        doc.children(id)
            .iter()
            .map(|child| self.serialize(*child))
            .collect()
    }

    /// Element carrying the given `id` attribute, through an index built on first use.
    pub fn find_by_id(&mut self, id: &str) -> Option<NodeId> {
        let doc = self.doc;
        self.ids
            .get_or_insert_with(|| doc.id_index())
            .get(id)
            .copied()
    }

    /// Serialize the children of an out-of-flow element (a footnote definition, say) as if
    /// they stood on their own: escaping applies regardless of where the reference sits.
    ///
    /// Returns `None`, with a warning, when `id` is already being resolved further up.
    pub fn resolve_content(&mut self, id: NodeId) -> Option<String> {
        if self.resolving.contains(&id) {
            let what = self
                .doc
                .element(id)
                .and_then(|e| e.id())
                .unwrap_or("element")
                .to_string();
            self.warn(Warning::invariant(
                format!("reference to '{what}'"),
                "it refers back to itself",
            ));
            return None;
        }

        self.resolving.push(id);
        let depth = std::mem::replace(&mut self.opaque_depth, 0);
        let content = self.serialize_children(id);
        self.opaque_depth = depth;
        self.resolving.pop();
        Some(content)
    }

    /// Raw markup of an element. Falls back to its text if the markup cannot be produced.
    pub fn outer_html(&mut self, id: NodeId) -> String {
        match html::outer_html(self.doc, id) {
            Ok(markup) => markup,
            Err(err) => {
                self.warn(Warning::invariant("raw HTML output", err.to_string()));
                self.doc.text_content(id)
            }
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}

/// Opening fence of a fenced code block: the fence character and its run length.
fn fence_open(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let run = trimmed.chars().take_while(|c| *c == marker).count();
    let info = &trimmed[run..];
    if run < 3 || (marker == '`' && info.contains('`')) {
        return None;
    }
    Some((marker, run))
}

fn closes_fence(line: &str, (marker, run): (char, usize)) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= run && trimmed.chars().all(|c| c == marker)
}

/// Normalize the blank lines of a serialized document.
///
/// Whitespace-only lines become empty, runs of blank lines shrink to one, the ends are
/// trimmed and a single trailing newline is added. Lines inside fenced code blocks are
/// kept as they are.
pub fn postprocess(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    let mut fence: Option<(char, usize)> = None;
    for line in text.split('\n') {
        if let Some(open) = fence {
            if closes_fence(line, open) {
                fence = None;
            }
            out.push_str(line);
            out.push('\n');
            continue;
        }
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            out.push('\n');
        } else {
            blank_run = 0;
            fence = fence_open(line);
            out.push_str(line);
            out.push('\n');
        }
    }

    let trimmed = out.trim_matches('\n');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}
