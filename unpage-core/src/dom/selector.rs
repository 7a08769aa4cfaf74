//! CSS selectors for locating layout scaffolding, page containers and opaque elements.
//!
//! Parsing and matching are done by the `selectors` crate; this module supplies the
//! selector implementation types and the [`selectors::Element`] view over the arena.
//! Pseudo-classes and pseudo-elements are not supported and fail to parse.

use super::nodes::{Document, ElementRef, NodeData, NodeId};
use cssparser::{BasicParseErrorKind, ParseErrorKind, Parser as CssParser, ParserInput, ToCss};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::{MatchingContext, SelectorCaches};
use selectors::matching::ElementSelectorFlags;
use selectors::parser::{ParseRelative, SelectorList, SelectorParseErrorKind};
use selectors::{OpaqueElement, SelectorImpl};
use std::fmt;
use std::str::FromStr;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.selector, self.reason)
    }
}

impl std::error::Error for SelectorError {}

/// Selector implementation over the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSelectors;

/// Identifier, attribute value, local name and namespace string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct CssIdent(pub String);

impl precomputed_hash::PrecomputedHash for CssIdent {
    fn precomputed_hash(&self) -> u32 {
        let mut h: u32 = 0;
        for byte in self.0.bytes() {
            h = h.wrapping_mul(31).wrapping_add(byte as u32);
        }
        h
    }
}

impl cssparser::ToCss for CssIdent {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

impl AsRef<str> for CssIdent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CssIdent {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'a> From<&'a str> for CssIdent {
    fn from(s: &'a str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl cssparser::ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = DomSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        false
    }

    fn valid_after_slotted(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoClass {}

impl selectors::parser::NonTSPseudoClass for PseudoClass {
    type Impl = DomSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl cssparser::ToCss for PseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl SelectorImpl for DomSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = CssIdent;
    type Identifier = CssIdent;
    type LocalName = CssIdent;
    type NamespaceUrl = CssIdent;
    type NamespacePrefix = CssIdent;
    type BorrowedLocalName = CssIdent;
    type BorrowedNamespaceUrl = CssIdent;
    type NonTSPseudoClass = PseudoClass;
    type PseudoElement = PseudoElement;
}

impl<'i> selectors::parser::Parser<'i> for DomSelectors {
    type Impl = DomSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// A parsed selector list. Matches when any of its selectors matches.
#[derive(Clone)]
pub struct Selector {
    source: String,
    selectors: Vec<selectors::parser::Selector<DomSelectors>>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Selector, SelectorError> {
        let fail = |reason: String| SelectorError {
            selector: source.to_string(),
            reason,
        };

        let mut input = ParserInput::new(source);
        let mut parser = CssParser::new(&mut input);
        let list = SelectorList::parse(&DomSelectors, &mut parser, ParseRelative::No)
            .map_err(|err| fail(describe(&err.kind)))?;
        parser
            .expect_exhausted()
            .map_err(|err| fail(describe_basic(&err.kind)))?;

        Ok(Selector {
            source: source.trim().to_string(),
            selectors: list.slice().to_vec(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            selectors::matching::MatchingMode::Normal,
            None,
            &mut caches,
            selectors::context::QuirksMode::NoQuirks,
            selectors::matching::NeedsSelectorFlags::No,
            selectors::matching::MatchingForInvalidation::No,
        );
        self.selectors.iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, element, &mut context)
        })
    }

    /// Whether the node `id` of `doc` is an element this selector matches.
    pub fn matches_node(&self, doc: &Document, id: NodeId) -> bool {
        doc.element_ref(id).is_some_and(|element| self.matches(&element))
    }
}

fn describe(kind: &ParseErrorKind<'_, SelectorParseErrorKind<'_>>) -> String {
    match kind {
        ParseErrorKind::Basic(basic) => describe_basic(basic),
        ParseErrorKind::Custom(SelectorParseErrorKind::EmptySelector) => {
            "empty selector".to_string()
        }
        ParseErrorKind::Custom(SelectorParseErrorKind::DanglingCombinator) => {
            "dangling combinator".to_string()
        }
        ParseErrorKind::Custom(other) => format!("{other:?}"),
    }
}

fn describe_basic(kind: &BasicParseErrorKind<'_>) -> String {
    match kind {
        BasicParseErrorKind::UnexpectedToken(token) => {
            format!("unexpected '{}'", token.to_css_string())
        }
        BasicParseErrorKind::EndOfInput => "unexpected end of input".to_string(),
        other => format!("{other:?}"),
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selector").field(&self.source).finish()
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Selector {}

fn sibling_element<'a>(element: &ElementRef<'a>, forward: bool) -> Option<ElementRef<'a>> {
    let doc = element.document();
    let siblings = doc.children(doc.parent(element.id())?);
    let index = siblings.iter().position(|id| *id == element.id())?;
    if forward {
        siblings[index + 1..]
            .iter()
            .find_map(|id| doc.element_ref(*id))
    } else {
        siblings[..index]
            .iter()
            .rev()
            .find_map(|id| doc.element_ref(*id))
    }
}

impl<'a> selectors::Element for ElementRef<'a> {
    type Impl = DomSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.element())
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent()
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        sibling_element(self, false)
    }

    fn next_sibling_element(&self) -> Option<Self> {
        sibling_element(self, true)
    }

    fn first_element_child(&self) -> Option<Self> {
        self.child_elements().next()
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, name: &CssIdent) -> bool {
        self.tag() == name.0
    }

    fn has_namespace(&self, ns: &CssIdent) -> bool {
        ns.0.is_empty() || ns.0 == HTML_NAMESPACE
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssIdent>,
        local_name: &CssIdent,
        operation: &AttrSelectorOperation<&CssIdent>,
    ) -> bool {
        if let NamespaceConstraint::Specific(ns) = ns {
            if !ns.0.is_empty() {
                return false;
            }
        }
        self.attr(&local_name.0)
            .is_some_and(|value| operation.eval_str(value))
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &PseudoClass,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<'_, Self::Impl>,
    ) -> bool {
        match *pe {}
    }

    fn is_link(&self) -> bool {
        self.is("a") && self.has_attr("href")
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssIdent, case_sensitivity: CaseSensitivity) -> bool {
        self.element()
            .id()
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &CssIdent, case_sensitivity: CaseSensitivity) -> bool {
        self.element()
            .classes()
            .any(|class| case_sensitivity.eq(class.as_bytes(), name.0.as_bytes()))
    }

    fn imported_part(&self, _name: &CssIdent) -> Option<CssIdent> {
        None
    }

    fn is_part(&self, _name: &CssIdent) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        let doc = self.document();
        self.children().iter().all(|child| match doc.data(*child) {
            NodeData::Element(_) => false,
            NodeData::Text(text) => text.is_empty(),
        })
    }

    fn is_root(&self) -> bool {
        self.document().parent(self.id()).is_none()
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn add_element_unique_hashes(&self, _filter: &mut selectors::bloom::BloomFilter) -> bool {
        false
    }

    fn has_custom_state(&self, _name: &CssIdent) -> bool {
        false
    }
}
