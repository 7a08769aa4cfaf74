//! Node-to-text rules
//!
//!     A rule pairs a filter over the structural view of an element ([`ElementRef`]) with a
//!     render function. The serializer renders an element's children first, then hands the
//!     concatenated child text to the render function of the matching rule.
//!
//!     Filters are plain data: a tag list, a class, an attribute, an inline style property.
//!     `Predicate` covers what the data variants cannot express, and `Any` composes them.
//!
//!     A [`RuleSet`] is what the serializer runs with. Rules are tried from the last
//!     registered to the first, and the first match wins, so a pack registered later can
//!     override what an earlier one does. The set also carries the protection policy and the
//!     escape table. It is built once and never changes afterwards.

pub mod engine;
pub mod escape;
pub mod protect;

use crate::dom::{ElementRef, Selector};
use std::fmt;
use std::sync::Arc;

pub use engine::{RenderContext, Serializer};
pub use escape::{default_escapes, EscapeTable};
pub use protect::ProtectionPolicy;

type PredicateFn = dyn Fn(&ElementRef<'_>) -> bool + Send + Sync;
type RenderFn = dyn Fn(&str, ElementRef<'_>, &mut RenderContext<'_>) -> String + Send + Sync;

/// Which elements a rule (or an opaque marker) applies to.
#[derive(Clone)]
pub enum Filter {
    /// Any of these tag names.
    Tags(Vec<String>),
    /// Carries this class.
    Class(String),
    /// One of these tags and carries the class.
    TagWithClass { tags: Vec<String>, class: String },
    /// Has the attribute, whatever its value.
    Attribute(String),
    /// Attribute equal to the value.
    AttributeValue { name: String, value: String },
    /// Inline `style` declares the property.
    Style(String),
    /// Compound selector, for filters that come from configuration.
    Selector(Selector),
    Predicate(Arc<PredicateFn>),
    Any(Vec<Filter>),
}

impl Filter {
    pub fn tag(tag: &str) -> Self {
        Filter::Tags(vec![tag.to_string()])
    }

    pub fn tags(tags: &[&str]) -> Self {
        Filter::Tags(tags.iter().map(|t| t.to_string()).collect())
    }

    pub fn class(class: &str) -> Self {
        Filter::Class(class.to_string())
    }

    pub fn tag_with_class(tags: &[&str], class: &str) -> Self {
        Filter::TagWithClass {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            class: class.to_string(),
        }
    }

    pub fn attribute(name: &str) -> Self {
        Filter::Attribute(name.to_string())
    }

    pub fn attribute_value(name: &str, value: &str) -> Self {
        Filter::AttributeValue {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn style(property: &str) -> Self {
        Filter::Style(property.to_string())
    }

    pub fn predicate(f: impl Fn(&ElementRef<'_>) -> bool + Send + Sync + 'static) -> Self {
        Filter::Predicate(Arc::new(f))
    }

    pub fn any(filters: Vec<Filter>) -> Self {
        Filter::Any(filters)
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        match self {
            Filter::Tags(tags) => tags.iter().any(|t| element.is(t)),
            Filter::Class(class) => element.has_class(class),
            Filter::TagWithClass { tags, class } => {
                tags.iter().any(|t| element.is(t)) && element.has_class(class)
            }
            Filter::Attribute(name) => element.has_attr(name),
            Filter::AttributeValue { name, value } => element.attr(name) == Some(value.as_str()),
            Filter::Style(property) => element.style_declaration(property).is_some(),
            Filter::Selector(selector) => selector.matches(element),
            Filter::Predicate(f) => (**f)(element),
            Filter::Any(filters) => filters.iter().any(|f| f.matches(element)),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Tags(tags) => f.debug_tuple("Tags").field(tags).finish(),
            Filter::Class(class) => f.debug_tuple("Class").field(class).finish(),
            Filter::TagWithClass { tags, class } => f
                .debug_struct("TagWithClass")
                .field("tags", tags)
                .field("class", class)
                .finish(),
            Filter::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            Filter::AttributeValue { name, value } => f
                .debug_struct("AttributeValue")
                .field("name", name)
                .field("value", value)
                .finish(),
            Filter::Style(property) => f.debug_tuple("Style").field(property).finish(),
            Filter::Selector(selector) => f.debug_tuple("Selector").field(&selector.as_str()).finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
            Filter::Any(filters) => f.debug_tuple("Any").field(filters).finish(),
        }
    }
}

/// A named filter + render pair.
#[derive(Clone)]
pub struct Rule {
    pub name: String,
    pub filter: Filter,
    render: Arc<RenderFn>,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        filter: Filter,
        render: impl Fn(&str, ElementRef<'_>, &mut RenderContext<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        Rule {
            name: name.into(),
            filter,
            render: Arc::new(render),
        }
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        self.filter.matches(element)
    }

    pub fn render(&self, content: &str, element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        (*self.render)(content, element, ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Rules, protection policy and escape table for one session.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    protection: ProtectionPolicy,
    escapes: EscapeTable,
}

impl RuleSet {
    pub fn new(escapes: EscapeTable) -> Self {
        RuleSet {
            rules: Vec::new(),
            protection: ProtectionPolicy::new(),
            escapes,
        }
    }

    /// Register a rule. It takes precedence over every rule registered before it.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.rules.extend(rules);
    }

    pub fn protect(&mut self, filter: Filter) {
        self.protection.add(filter);
    }

    /// The highest-priority rule matching the element.
    pub fn find_rule(&self, element: &ElementRef<'_>) -> Option<&Rule> {
        self.rules.iter().rev().find(|rule| rule.matches(element))
    }

    pub fn is_opaque(&self, element: &ElementRef<'_>) -> bool {
        self.protection.is_opaque(element)
    }

    pub fn escapes(&self) -> &EscapeTable {
        &self.escapes
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn protection(&self) -> &ProtectionPolicy {
        &self.protection
    }
}
