//! HTML output (working tree → markup)
//!
//! Opaque elements without a rule, and passthrough packs, need the markup of a subtree.
//! The subtree is rebuilt as `RcDom` nodes and written with `html5ever`'s serializer, so
//! escaping and void elements follow the HTML serialization algorithm.

use super::nodes::{Document, NodeData as TreeData, NodeId};
use crate::error::ExportError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Markup of `id` including the node itself.
pub fn outer_html(doc: &Document, id: NodeId) -> Result<String, ExportError> {
    let handle = build_handle(doc, id);
    serialize_handles(std::slice::from_ref(&handle))
}

/// Markup of the children of `id`.
pub fn inner_html(doc: &Document, id: NodeId) -> Result<String, ExportError> {
    let handles: Vec<Handle> = doc
        .children(id)
        .iter()
        .map(|child| build_handle(doc, *child))
        .collect();
    serialize_handles(&handles)
}

fn build_handle(doc: &Document, id: NodeId) -> Handle {
    let handle = match doc.data(id) {
        TreeData::Text(text) => return create_text(text),
        TreeData::Element(element) => create_element(
            &element.tag,
            element.attrs.iter().collect::<Vec<(&str, &str)>>(),
        ),
    };
    for child in doc.children(id) {
        let child_handle = build_handle(doc, *child);
        child_handle.parent.set(Some(Rc::downgrade(&handle)));
        handle.children.borrow_mut().push(child_handle);
    }
    handle
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn serialize_handles(handles: &[Handle]) -> Result<String, ExportError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for handle in handles {
        let serializable = SerializableHandle::from(handle.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            ExportError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| ExportError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
