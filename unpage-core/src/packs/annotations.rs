//! Inline annotations: highlight, insertion and deletion marks.

use super::wrap_inline;
use crate::pack::RulePack;
use crate::rules::{Filter, Rule};

pub struct AnnotationsPack;

impl RulePack for AnnotationsPack {
    fn name(&self) -> &str {
        "annotations"
    }

    fn description(&self) -> &str {
        "Highlight ==x==, insertion ++x++ and deletion ~~x~~"
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "highlight",
                Filter::any(vec![Filter::tag("mark"), Filter::class("highlight")]),
                |content, _, _| wrap_inline(content, "==", "=="),
            ),
            Rule::new("insertion", Filter::tag("ins"), |content, _, _| {
                wrap_inline(content, "++", "++")
            }),
            Rule::new(
                "deletion",
                Filter::tags(&["del", "s", "strike"]),
                |content, _, _| wrap_inline(content, "~~", "~~"),
            ),
        ]
    }
}
