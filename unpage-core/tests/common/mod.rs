//! Shared helpers for the integration tests: fixture loading, paged document builders and
//! markdown re-parsing.

#![allow(dead_code)]

use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use unpage_core::{parse_html, Document, ExportOutput, Exporter};

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {path} should exist: {e}"))
}

pub fn fixture_doc(name: &str) -> Document {
    parse_html(&fixture(name)).expect("fixture should parse")
}

/// Wrap each page body in the scaffolding a pagination engine produces.
pub fn paged(pages: &[&str]) -> String {
    let mut html = String::from("<html><body><div class=\"pagedjs_pages\">");
    for (index, content) in pages.iter().enumerate() {
        let number = index + 1;
        html.push_str(&format!(
            concat!(
                "<div class=\"pagedjs_page\" data-page-number=\"{number}\">",
                "<div class=\"pagedjs_sheet\"><div class=\"pagedjs_pagebox\">",
                "<div class=\"pagedjs_margin-top\"><div class=\"pagedjs_margin\">Header {number}</div></div>",
                "<div class=\"pagedjs_area\"><div class=\"pagedjs_page_content\">{content}</div></div>",
                "<div class=\"pagedjs_margin-bottom\"><div class=\"pagedjs_margin\">{number}</div></div>",
                "</div></div></div>"
            ),
            number = number,
            content = content
        ));
    }
    html.push_str("</div></body></html>");
    html
}

/// Export a body fragment with the default packs.
pub fn export_body(body: &str) -> ExportOutput {
    Exporter::default()
        .export_html(&format!("<html><body>{body}</body></html>"))
        .expect("html should parse")
}

pub fn markdown(body: &str) -> String {
    export_body(body).text
}

/// Kinds of markdown nodes and the literal text found when a markdown reader parses `md`.
pub struct Reparsed {
    pub kinds: Vec<String>,
    pub text: String,
}

pub fn reparse(md: &str) -> Reparsed {
    reparse_with(md, ComrakOptions::default())
}

/// Like [`reparse`], with the strikethrough extension switched on.
pub fn reparse_gfm(md: &str) -> Reparsed {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    reparse_with(md, options)
}

fn reparse_with(md: &str, options: ComrakOptions) -> Reparsed {
    let arena = Arena::new();
    let root = parse_document(&arena, md, &options);
    let mut reparsed = Reparsed {
        kinds: Vec::new(),
        text: String::new(),
    };
    collect(root, &mut reparsed);
    reparsed
}

fn collect<'a>(node: &'a AstNode<'a>, out: &mut Reparsed) {
    let value = &node.data.borrow().value;
    let kind = match value {
        NodeValue::Document => "Document",
        NodeValue::Paragraph => "Paragraph",
        NodeValue::Heading(_) => "Heading",
        NodeValue::List(_) => "List",
        NodeValue::Item(_) => "Item",
        NodeValue::CodeBlock(_) => "CodeBlock",
        NodeValue::BlockQuote => "BlockQuote",
        NodeValue::ThematicBreak => "ThematicBreak",
        NodeValue::Strong => "Strong",
        NodeValue::Emph => "Emph",
        NodeValue::Code(_) => "Code",
        NodeValue::Link(_) => "Link",
        NodeValue::Strikethrough => "Strikethrough",
        NodeValue::Text(text) => {
            out.text.push_str(text);
            "Text"
        }
        _ => "Other",
    };
    out.kinds.push(kind.to_string());

    for child in node.children() {
        collect(child, out);
    }
}
