//! Shortcode output for the site generator
//!
//! Figures become a `figure` shortcode whose attributes come from the element itself:
//!
//!     <figure id="fig-1" style="float: right; width: 40%; page: wide">
//!       <img src="a.png" alt="A"><figcaption>Caption</figcaption>
//!     </figure>
//!     → {% figure id="fig-1" src="a.png" alt="A" caption="Caption" float="right" width="40%" page="wide" %}
//!
//! Attributes without a value are left out. Elements with the `shortcode` class hold
//! shortcode source written by hand and are passed through verbatim.

use super::{block, collapse_whitespace, quote};
use crate::dom::ElementRef;
use crate::error::Warning;
use crate::pack::RulePack;
use crate::rules::{Filter, RenderContext, Rule};

pub struct ShortcodesPack;

fn render_figure(content: &str, el: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
    let Some(image) = el.find("img") else {
        ctx.warn(Warning::missing_target(
            "figure image",
            el.attr("id").unwrap_or("figure"),
        ));
        return block(content.trim());
    };

    let caption = el
        .find("figcaption")
        .map(|caption| collapse_whitespace(&caption.text_content()));
    let fields = [
        ("id", el.attr("id").map(str::to_string)),
        ("src", image.attr("src").map(str::to_string)),
        ("alt", image.attr("alt").map(str::to_string)),
        ("caption", caption),
        ("float", el.style_declaration("float")),
        ("width", el.style_declaration("width")),
        ("page", el.style_declaration("page")),
    ];

    let mut shortcode = String::from("{% figure");
    for (name, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            shortcode.push_str(&format!(" {name}={}", quote(&value)));
        }
    }
    shortcode.push_str(" %}");
    block(&shortcode)
}

impl RulePack for ShortcodesPack {
    fn name(&self) -> &str {
        "shortcodes"
    }

    fn description(&self) -> &str {
        "Figures as {% figure %} shortcodes, .shortcode passthrough"
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new("figure", Filter::tag("figure"), render_figure),
            Rule::new("shortcode", Filter::class("shortcode"), |_, el, _| {
                el.text_content()
            }),
        ]
    }

    fn opaque(&self) -> Vec<Filter> {
        vec![Filter::class("shortcode")]
    }
}
