//! Manual page and column breaks
//!
//! A break reaches the tree in several shapes depending on how it was inserted. All shapes
//! of one kind produce the same sentinel:
//!
//!     <div data-break="page"></div>  |  <br class="page-break">  |  <hr class="page-break">
//!         → {% pagebreak %}
//!     <div data-break="column"></div>  |  <br class="column-break">  |  <hr class="column-break">
//!         → {% columnbreak %}

use super::block;
use crate::pack::RulePack;
use crate::rules::{Filter, Rule};

pub const PAGE_BREAK: &str = "{% pagebreak %}";
pub const COLUMN_BREAK: &str = "{% columnbreak %}";

pub struct BreaksPack;

fn break_filter(kind: &str) -> Filter {
    Filter::any(vec![
        Filter::attribute_value("data-break", kind),
        Filter::tag_with_class(&["br", "hr"], &format!("{kind}-break")),
    ])
}

impl RulePack for BreaksPack {
    fn name(&self) -> &str {
        "breaks"
    }

    fn description(&self) -> &str {
        "Page and column breaks as {% pagebreak %} / {% columnbreak %}"
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new("page-break", break_filter("page"), |_, _, _| block(PAGE_BREAK)),
            Rule::new("column-break", break_filter("column"), |_, _, _| {
                block(COLUMN_BREAK)
            }),
        ]
    }

    fn opaque(&self) -> Vec<Filter> {
        vec![break_filter("page"), break_filter("column")]
    }
}
