//! Footnotes
//!
//! A footnote is a call in the text plus a definition the layout engine moved out of flow
//! (to the page footer). The call renders the definition inline, the definition itself
//! renders to nothing:
//!
//!     <a class="footnote-ref" href="#fn1">1</a> … <aside class="footnote" id="fn1">A note.</aside>
//!     → ^[A note.] …
//!
//! Calls are recognised by `data-footnote-call="ID"` or as `a.footnote-ref` with
//! `href="#ID"`. Definitions are `.footnote` or `[role=doc-footnote]` elements.
//!
//! A call whose definition is missing keeps its own content and reports the missing target.
//! A definition that contains a call to itself is reported and rendered empty at the point
//! of recursion.

use super::collapse_whitespace;
use crate::dom::ElementRef;
use crate::error::Warning;
use crate::pack::RulePack;
use crate::rules::{Filter, RenderContext, Rule};

pub const CALL_ATTR: &str = "data-footnote-call";

pub struct FootnotesPack;

fn call_filter() -> Filter {
    Filter::any(vec![
        Filter::attribute(CALL_ATTR),
        Filter::tag_with_class(&["a"], "footnote-ref"),
    ])
}

fn definition_filter() -> Filter {
    Filter::any(vec![
        Filter::class("footnote"),
        Filter::attribute_value("role", "doc-footnote"),
    ])
}

/// Id of the definition a call points at.
fn target_id<'a>(el: &ElementRef<'a>) -> Option<&'a str> {
    el.attr(CALL_ATTR)
        .or_else(|| el.attr("href").and_then(|href| href.strip_prefix('#')))
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

fn render_call(content: &str, el: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
    let Some(target) = target_id(&el) else {
        ctx.warn(Warning::missing_target("footnote reference", el.tag()));
        return content.to_string();
    };
    let Some(definition) = ctx.find_by_id(target) else {
        ctx.warn(Warning::missing_target("footnote definition", target));
        return content.to_string();
    };
    match ctx.resolve_content(definition) {
        Some(note) => format!("^[{}]", collapse_whitespace(&note)),
        None => String::new(),
    }
}

impl RulePack for FootnotesPack {
    fn name(&self) -> &str {
        "footnotes"
    }

    fn description(&self) -> &str {
        "Footnote calls as inline ^[notes], definitions removed"
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new("footnote-definition", definition_filter(), |_, _, _| {
                String::new()
            }),
            Rule::new("footnote-call", call_filter(), render_call),
        ]
    }

    fn opaque(&self) -> Vec<Filter> {
        vec![call_filter()]
    }
}
