//! Page range extraction
//!
//! Builds a synthetic document from a subset of pages: the content container of each
//! selected page is deep-copied, in the requested order, under one temporary root. The
//! result goes through the same cleanup and reconstruction as a whole document.
//!
//! A fragment whose siblings live on pages outside the selection ends up alone in its group
//! and is exported as is, so a range can produce a partial paragraph.

use super::compile_selectors;
use crate::context::ExportContext;
use crate::dom::{Document, NodeId, Selector};
use crate::error::{ExportError, Warning};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SELECTOR: &str = ".pagedjs_page";
pub const DEFAULT_PAGE_NUMBER_ATTR: &str = "data-page-number";

/// Pages to export, by the number the layout engine gave them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// Inclusive range, `start <= end`.
    Range { start: u32, end: u32 },
    /// Pages and spans of pages in the order given. A page picked by an earlier entry is
    /// not picked again.
    List(Vec<PageSpan>),
}

/// One entry of a page list: a single page or an inclusive span. A span written high to
/// low is walked backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSpan {
    pub first: u32,
    pub last: u32,
}

impl PageSpan {
    pub fn new(first: u32, last: u32) -> Self {
        PageSpan { first, last }
    }

    pub fn single(page: u32) -> Self {
        PageSpan::new(page, page)
    }

    pub fn contains(&self, page: u32) -> bool {
        (self.first.min(self.last)..=self.first.max(self.last)).contains(&page)
    }

    fn is_descending(&self) -> bool {
        self.first > self.last
    }
}

impl fmt::Display for PageSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}

impl PageSelection {
    /// Inclusive range; bounds given in reverse are swapped.
    pub fn range(start: u32, end: u32) -> Self {
        PageSelection::Range {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Explicit list of single pages; later duplicates are dropped.
    pub fn list(pages: impl IntoIterator<Item = u32>) -> Self {
        PageSelection::spans(pages.into_iter().map(PageSpan::single))
    }

    /// Explicit list of spans; later duplicates are dropped.
    pub fn spans(spans: impl IntoIterator<Item = PageSpan>) -> Self {
        let mut seen = HashSet::new();
        PageSelection::List(spans.into_iter().filter(|span| seen.insert(*span)).collect())
    }

    pub fn contains(&self, page: u32) -> bool {
        match self {
            PageSelection::Range { start, end } => (*start..=*end).contains(&page),
            PageSelection::List(spans) => spans.iter().any(|span| span.contains(page)),
        }
    }
}

impl FromStr for PageSelection {
    type Err = ExportError;

    /// Accepts `"2"`, `"2-4"` and comma lists such as `"1,3,5"` or `"1-2,5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExportError::InvalidSelection(s.to_string());
        let parse_page = |part: &str| part.trim().parse::<u32>().map_err(|_| invalid());
        let parse_item = |item: &str| -> Result<PageSpan, ExportError> {
            match item.split_once('-') {
                Some((a, b)) => Ok(PageSpan::new(parse_page(a)?, parse_page(b)?)),
                None => Ok(PageSpan::single(parse_page(item)?)),
            }
        };

        if s.trim().is_empty() {
            return Err(invalid());
        }

        if !s.contains(',') {
            let span = parse_item(s)?;
            return Ok(PageSelection::range(span.first, span.last));
        }

        let spans = s
            .split(',')
            .map(parse_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PageSelection::spans(spans))
    }
}

impl fmt::Display for PageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSelection::Range { start, end } if start == end => write!(f, "{start}"),
            PageSelection::Range { start, end } => write!(f, "{start}-{end}"),
            PageSelection::List(spans) => {
                let parts: Vec<String> = spans.iter().map(|span| span.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

/// How pages and their content containers are recognised.
#[derive(Debug, Clone)]
pub struct PageLayout {
    page: Option<Selector>,
    content: Option<Selector>,
    number_attr: String,
}

impl PageLayout {
    pub fn new(page: Option<Selector>, content: Option<Selector>, number_attr: impl Into<String>) -> Self {
        PageLayout {
            page,
            content,
            number_attr: number_attr.into(),
        }
    }

    /// Build from selector strings. Malformed selectors are dropped with a warning.
    pub fn from_selectors(page: &str, content: &str, number_attr: &str) -> (Self, Vec<Warning>) {
        let (mut page, mut warnings) = compile_selectors(&[page]);
        let (mut content, content_warnings) = compile_selectors(&[content]);
        warnings.extend(content_warnings);
        (PageLayout::new(page.pop(), content.pop(), number_attr), warnings)
    }

    /// Every numbered page in document order.
    pub fn pages(&self, doc: &Document) -> Vec<(u32, NodeId)> {
        let Some(selector) = &self.page else {
            return Vec::new();
        };
        doc.descendants(doc.root())
            .filter_map(|id| {
                if !selector.matches_node(doc, id) {
                    return None;
                }
                let element = doc.element(id)?;
                let number = element.attr(&self.number_attr)?.trim().parse().ok()?;
                Some((number, id))
            })
            .collect()
    }

    fn content_of(&self, doc: &Document, page: NodeId) -> Option<NodeId> {
        let selector = self.content.as_ref()?;
        doc.descendants(page)
            .find(|id| selector.matches_node(doc, *id))
    }

    /// Page numbers present in `doc` that `selection` picks, in export order.
    pub fn resolve(&self, doc: &Document, selection: &PageSelection) -> Vec<(u32, NodeId)> {
        let pages = self.pages(doc);
        match selection {
            PageSelection::Range { .. } => pages
                .into_iter()
                .filter(|(number, _)| selection.contains(*number))
                .collect(),
            PageSelection::List(spans) => {
                let mut picked = HashSet::new();
                let mut resolved = Vec::new();
                for span in spans {
                    let mut in_span: Vec<(u32, NodeId)> = pages
                        .iter()
                        .filter(|(number, _)| span.contains(*number))
                        .copied()
                        .collect();
                    in_span.sort_by_key(|(number, _)| *number);
                    if span.is_descending() {
                        in_span.reverse();
                    }
                    resolved.extend(in_span.into_iter().filter(|(number, _)| picked.insert(*number)));
                }
                resolved
            }
        }
    }

    /// Assemble the selected pages' content containers under a fresh root.
    ///
    /// Returns `None` when no selected page has content; the caller must not emit anything.
    pub fn extract(
        &self,
        doc: &Document,
        selection: &PageSelection,
        ctx: &mut ExportContext,
    ) -> Option<Document> {
        if let PageSelection::List(spans) = selection {
            let present = self.pages(doc);
            for span in spans {
                if present.iter().any(|(number, _)| span.contains(*number)) {
                    continue;
                }
                let what = if span.first == span.last { "page" } else { "pages" };
                ctx.warn(Warning::missing_target(what, span.to_string()));
            }
        }

        let mut synthetic = Document::new("body");
        let root = synthetic.root();
        let mut copied = 0;
        for (number, page) in self.resolve(doc, selection) {
            match self.content_of(doc, page) {
                Some(content) => {
                    synthetic.import(root, doc, content);
                    copied += 1;
                }
                None => ctx.warn(Warning::missing_target(
                    "content container on page",
                    number.to_string(),
                )),
            }
        }

        if copied == 0 {
            ctx.warn(Warning::missing_target("pages", selection.to_string()));
            return None;
        }
        log::debug!("extract: assembled {copied} pages for selection {selection}");
        Some(synthetic)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout::from_selectors(
            DEFAULT_PAGE_SELECTOR,
            super::cleanup::DEFAULT_CONTENT_SELECTOR,
            DEFAULT_PAGE_NUMBER_ATTR,
        )
        .0
    }
}
