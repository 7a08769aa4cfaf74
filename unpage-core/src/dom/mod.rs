//! Working document tree
//!
//! An arena tree of elements and text with the structural queries the pipeline needs:
//! parsing from HTML, markup output, document-order comparison, inline style lookups and
//! CSS selectors.

pub mod html;
pub mod nodes;
pub mod parser;
pub mod position;
pub mod selector;
pub mod style;

pub use nodes::{Attributes, Document, Element, ElementRef, NodeData, NodeId};
pub use parser::{is_block, parse_html};
pub use selector::{Selector, SelectorError};
