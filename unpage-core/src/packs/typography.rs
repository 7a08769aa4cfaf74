//! Typographic spans
//!
//! Styling the authoring tools apply by hand survives the export as inline tags:
//!
//!     <span class="small-caps">abc</span>                → <sc>abc</sc>
//!     <span style="letter-spacing: 0.1em">abc</span>     → <span style="letter-spacing: 0.1em">abc</span>
//!     <sup>2</sup>                                       → <sup>2</sup>
//!
//! All three are opaque: their text is emitted as is.

use crate::dom::ElementRef;
use crate::pack::RulePack;
use crate::rules::{Filter, RenderContext, Rule};

pub struct TypographyPack;

fn small_caps() -> Filter {
    Filter::any(vec![
        Filter::class("small-caps"),
        Filter::predicate(|el| {
            el.style_declaration("font-variant")
                .map(|v| v.to_ascii_lowercase().contains("small-caps"))
                .unwrap_or(false)
        }),
    ])
}

fn letter_spacing() -> Filter {
    Filter::predicate(|el| el.is("span") && el.style_declaration("letter-spacing").is_some())
}

fn render_letter_spacing(content: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    match el.style_declaration("letter-spacing") {
        Some(spacing) => format!("<span style=\"letter-spacing: {spacing}\">{content}</span>"),
        None => content.to_string(),
    }
}

impl RulePack for TypographyPack {
    fn name(&self) -> &str {
        "typography"
    }

    fn description(&self) -> &str {
        "Small caps, letter-spacing spans and superscripts"
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new("small-caps", small_caps(), |content, _, _| {
                format!("<sc>{content}</sc>")
            }),
            Rule::new("letter-spacing", letter_spacing(), render_letter_spacing),
            Rule::new("superscript", Filter::tag("sup"), |content, _, _| {
                format!("<sup>{content}</sup>")
            }),
        ]
    }

    fn opaque(&self) -> Vec<Filter> {
        vec![small_caps(), letter_spacing(), Filter::tag("sup")]
    }
}
