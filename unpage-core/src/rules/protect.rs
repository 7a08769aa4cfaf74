//! Protection policy
//!
//! An opaque element is a syntactic carrier of the target dialect: a break marker, a
//! letter-spaced span, a superscript. Text under it is emitted without escaping, and when no
//! rule renders it the element is kept as raw HTML instead of being decomposed.
//!
//! Packs contribute filters; an element is opaque when any of them matches.

use super::Filter;
use crate::dom::ElementRef;

#[derive(Debug, Clone, Default)]
pub struct ProtectionPolicy {
    filters: Vec<Filter>,
}

impl ProtectionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn extend(&mut self, filters: impl IntoIterator<Item = Filter>) {
        self.filters.extend(filters);
    }

    pub fn is_opaque(&self, element: &ElementRef<'_>) -> bool {
        self.filters.iter().any(|f| f.matches(element))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
