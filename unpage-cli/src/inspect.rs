//! Inspection views
//!
//! Each view shows one intermediate stage of an export, for debugging a layout that does
//! not come back as expected:
//!
//! ```text
//! tree       cleaned and merged tree, as HTML (what the serializer sees)
//! fragments  reference ids found in the rendered document and how many pieces each has
//! pages      page numbers the page selector finds, in document order
//! rules      installed rules, highest priority first
//! ```
//!
//! Every view has a plain text and a JSON rendering.

use serde_json::json;
use unpage_core::common::fragments::collect;
use unpage_core::dom::html::inner_html;
use unpage_core::{Document, Exporter, Warning};

/// All available inspection views
pub const AVAILABLE_VIEWS: &[&str] = &["tree", "fragments", "pages", "rules"];

pub const DEFAULT_VIEW: &str = "tree";

/// Rendered view plus the warnings produced while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOutput {
    pub text: String,
    pub warnings: Vec<Warning>,
}

impl ViewOutput {
    fn plain(text: String) -> Self {
        ViewOutput {
            text,
            warnings: Vec::new(),
        }
    }
}

/// Execute a named view over a parsed document.
pub fn execute_view(
    doc: &Document,
    exporter: &Exporter,
    view: &str,
    as_json: bool,
) -> Result<ViewOutput, String> {
    match view {
        "tree" => tree_view(doc, exporter, as_json),
        "fragments" => Ok(ViewOutput::plain(fragments_view(doc, exporter, as_json))),
        "pages" => Ok(ViewOutput::plain(pages_view(doc, exporter, as_json))),
        "rules" => Ok(ViewOutput::plain(rules_view(exporter, as_json))),
        other => Err(format!(
            "Unknown view '{other}'. Available views: {}",
            AVAILABLE_VIEWS.join(", ")
        )),
    }
}

fn tree_view(doc: &Document, exporter: &Exporter, as_json: bool) -> Result<ViewOutput, String> {
    let (tree, warnings) = exporter.reconstruct(doc);
    let html = inner_html(&tree, tree.root()).map_err(|e| e.to_string())?;
    let text = if as_json {
        pretty(&json!({ "html": html, "warnings": warnings }))
    } else {
        format!("{html}\n")
    };
    Ok(ViewOutput { text, warnings })
}

fn fragments_view(doc: &Document, exporter: &Exporter, as_json: bool) -> String {
    let groups = collect(doc, doc.root(), exporter.markers());
    if as_json {
        let entries: Vec<_> = groups
            .iter()
            .map(|group| json!({ "reference": group.reference, "fragments": group.members.len() }))
            .collect();
        return pretty(&json!(entries));
    }

    let width = groups
        .iter()
        .map(|group| group.reference.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for group in &groups {
        let marker = if group.is_fragmented() { "split" } else { "whole" };
        out.push_str(&format!(
            "{:<width$}  {}  {marker}\n",
            group.reference,
            group.members.len()
        ));
    }
    out
}

fn pages_view(doc: &Document, exporter: &Exporter, as_json: bool) -> String {
    let numbers: Vec<u32> = exporter
        .layout()
        .pages(doc)
        .into_iter()
        .map(|(number, _)| number)
        .collect();
    if as_json {
        return pretty(&json!(numbers));
    }
    numbers.iter().map(|n| format!("page {n}\n")).collect()
}

fn rules_view(exporter: &Exporter, as_json: bool) -> String {
    let names: Vec<&str> = exporter
        .serializer()
        .rules()
        .rules()
        .iter()
        .rev()
        .map(|rule| rule.name.as_str())
        .collect();
    if as_json {
        return pretty(&json!(names));
    }
    names.iter().map(|name| format!("{name}\n")).collect()
}

fn pretty(value: &serde_json::Value) -> String {
    // A Value always serializes.
    format!("{}\n", serde_json::to_string_pretty(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use unpage_core::parse_html;

    const HTML: &str = r#"<body>
      <div class="pagedjs_page" data-page-number="1"><div class="pagedjs_page_content">
        <p data-ref="a" data-split-to="a">one </p><p data-ref="b">solo</p>
      </div></div>
      <div class="pagedjs_page" data-page-number="2"><div class="pagedjs_page_content">
        <p data-ref="a" data-split-from="a">two</p>
      </div></div>
    </body>"#;

    fn run(view: &str, as_json: bool) -> ViewOutput {
        let doc = parse_html(HTML).unwrap();
        execute_view(&doc, &Exporter::default(), view, as_json).unwrap()
    }

    #[test]
    fn test_tree_view_shows_merged_tree() {
        let output = run("tree", false);
        assert_eq!(
            output.text,
            "<p data-ref=\"a\">one two</p><p data-ref=\"b\">solo</p>\n"
        );
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_fragments_view() {
        assert_eq!(run("fragments", false).text, "a  2  split\nb  1  whole\n");

        let value: serde_json::Value = serde_json::from_str(&run("fragments", true).text).unwrap();
        assert_eq!(value[0]["reference"], "a");
        assert_eq!(value[0]["fragments"], 2);
    }

    #[test]
    fn test_pages_view() {
        assert_eq!(run("pages", false).text, "page 1\npage 2\n");
        let value: serde_json::Value = serde_json::from_str(&run("pages", true).text).unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_rules_view_lists_highest_priority_first() {
        let text = run("rules", false).text;
        assert!(text.starts_with("footnote-call\nfootnote-definition\n"));
        assert!(text.ends_with("\ncontainer\n"));
    }

    #[test]
    fn test_unknown_view() {
        let doc = parse_html(HTML).unwrap();
        let err = execute_view(&doc, &Exporter::default(), "nope", false).unwrap_err();
        assert!(err.contains("Available views"));
    }
}
