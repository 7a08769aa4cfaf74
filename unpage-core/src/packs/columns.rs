//! Multi-column containers
//!
//! A container laid out in columns becomes a `<columns>` block carrying its configuration,
//! read from the inline style with defaults when absent:
//!
//!     <div class="columns" style="column-count: 3; column-gap: 2em">…</div>
//!     → <columns count="3" gutter="2em">…</columns>

use super::{block, quote};
use crate::dom::ElementRef;
use crate::pack::RulePack;
use crate::rules::{Filter, RenderContext, Rule};

pub const DEFAULT_COLUMN_COUNT: &str = "2";
pub const DEFAULT_COLUMN_GUTTER: &str = "1em";

pub struct ColumnsPack;

fn render_columns(content: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    let count = el
        .style_declaration("column-count")
        .filter(|v| v != "auto")
        .unwrap_or_else(|| DEFAULT_COLUMN_COUNT.to_string());
    let gutter = el
        .style_declaration("column-gap")
        .filter(|v| v != "normal")
        .unwrap_or_else(|| DEFAULT_COLUMN_GUTTER.to_string());
    format!(
        "\n\n<columns count={} gutter={}>{}</columns>\n\n",
        quote(&count),
        quote(&gutter),
        block(content.trim())
    )
}

impl RulePack for ColumnsPack {
    fn name(&self) -> &str {
        "columns"
    }

    fn description(&self) -> &str {
        "Multi-column containers as <columns> blocks"
    }

    fn rules(&self) -> Vec<Rule> {
        vec![Rule::new(
            "columns",
            Filter::any(vec![Filter::class("columns"), Filter::style("column-count")]),
            render_columns,
        )]
    }
}
