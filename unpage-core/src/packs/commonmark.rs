//! CommonMark rules
//!
//! The generic HTML → markdown mapping every other pack builds on: paragraphs, headings,
//! quotes, lists, emphasis, code, links and images. Block rules surround their output with
//! blank lines and leave it to post-processing to collapse the runs.
//!
//! `code` and `pre` are opaque so their text is never escaped. `table` is opaque too and
//! kept as HTML, which every markdown reader accepts.

use super::{block, wrap_inline};
use crate::dom::ElementRef;
use crate::pack::RulePack;
use crate::rules::engine::postprocess;
use crate::rules::{Filter, RenderContext, Rule};

pub struct CommonMarkPack;

const CONTAINER_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "nav",
    "section",
];

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const DROPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head", "title"];

/// Longest run of `c` in `content`.
fn longest_run(content: &str, c: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;
    for ch in content.chars() {
        if ch == c {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }
    max_run
}

/// Smallest fence (at least three characters) that no run inside the code can close.
pub fn fence_length(content: &str, fence_char: char) -> usize {
    longest_run(content, fence_char).max(2) + 1
}

/// Smallest backtick run that does not occur inside inline code.
pub fn inline_code_ticks(content: &str) -> usize {
    longest_run(content, '`') + 1
}

fn render_heading(content: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    let level = el.tag()[1..].parse::<usize>().unwrap_or(1);
    let text = content.trim().replace('\n', " ");
    if text.is_empty() {
        return String::new();
    }
    block(&format!("{} {}", "#".repeat(level), text))
}

fn render_blockquote(content: &str, _: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    let quoted: Vec<String> = postprocess(content)
        .trim()
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect();
    block(&quoted.join("\n"))
}

fn render_list(content: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    let in_item = el.parent().map(|p| p.is("li")).unwrap_or(false);
    if in_item && el.is_last_element() {
        format!("\n{}", content.trim_end())
    } else {
        block(content.trim_end())
    }
}

/// Markdown ordered list markers have at most nine digits and no sign.
const MAX_LIST_NUMBER: i64 = 999_999_999;

fn render_list_item(content: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    let prefix = match el.parent() {
        Some(list) if list.is("ol") => {
            let start = list
                .attr("start")
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(1)
                .clamp(0, MAX_LIST_NUMBER);
            let number = start
                .saturating_add(el.sibling_index() as i64)
                .min(MAX_LIST_NUMBER);
            format!("{number}. ")
        }
        _ => "- ".to_string(),
    };
    let indent = " ".repeat(prefix.len());
    let body = postprocess(content)
        .trim()
        .replace('\n', &format!("\n{indent}"));
    let separator = if el.is_last_element() { "" } else { "\n" };
    format!("{prefix}{body}{separator}")
}

fn render_inline_code(content: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    if el.parent().map(|p| p.is("pre")).unwrap_or(false) {
        return content.to_string();
    }
    if content.is_empty() {
        return String::new();
    }
    let ticks = "`".repeat(inline_code_ticks(content));
    let pad = if content.starts_with('`') || content.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{ticks}{pad}{content}{pad}{ticks}")
}

fn code_language(el: &ElementRef<'_>) -> String {
    let candidates = std::iter::once(*el).chain(el.find("code"));
    for candidate in candidates {
        let language = candidate.element().classes().find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
        });
        if let Some(language) = language {
            return language.to_string();
        }
    }
    String::new()
}

fn render_code_block(_: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    let code = el.text_content();
    let code = code.trim_end_matches('\n');
    let fence = "`".repeat(fence_length(code, '`'));
    block(&format!("{fence}{}\n{code}\n{fence}", code_language(&el)))
}

fn render_link(content: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    let Some(href) = el.attr("href").filter(|href| !href.trim().is_empty()) else {
        return content.to_string();
    };
    let href = href.trim().replace(' ', "%20");
    match el.attr("title").filter(|t| !t.is_empty()) {
        Some(title) => format!("[{content}]({href} \"{}\")", title.replace('"', "\\\"")),
        None => format!("[{content}]({href})"),
    }
}

fn render_image(_: &str, el: ElementRef<'_>, _: &mut RenderContext<'_>) -> String {
    let Some(src) = el.attr("src").filter(|src| !src.trim().is_empty()) else {
        return String::new();
    };
    let alt = el.attr("alt").unwrap_or("").replace(']', "\\]");
    let src = src.trim().replace(' ', "%20");
    match el.attr("title").filter(|t| !t.is_empty()) {
        Some(title) => format!("![{alt}]({src} \"{}\")", title.replace('"', "\\\"")),
        None => format!("![{alt}]({src})"),
    }
}

impl RulePack for CommonMarkPack {
    fn name(&self) -> &str {
        "commonmark"
    }

    fn description(&self) -> &str {
        "Paragraphs, headings, lists, emphasis, code, links and images"
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new("container", Filter::tags(CONTAINER_TAGS), |content, _, _| {
                block(content.trim())
            }),
            Rule::new("paragraph", Filter::tag("p"), |content, _, _| {
                block(content.trim())
            }),
            Rule::new("heading", Filter::tags(HEADING_TAGS), render_heading),
            Rule::new("blockquote", Filter::tag("blockquote"), render_blockquote),
            Rule::new("list", Filter::tags(&["ul", "ol"]), render_list),
            Rule::new("list-item", Filter::tag("li"), render_list_item),
            Rule::new("rule", Filter::tag("hr"), |_, _, _| block("---")),
            Rule::new("line-break", Filter::tag("br"), |_, _, _| "  \n".to_string()),
            Rule::new("emphasis", Filter::tags(&["em", "i"]), |content, _, _| {
                wrap_inline(content, "*", "*")
            }),
            Rule::new("strong", Filter::tags(&["strong", "b"]), |content, _, _| {
                wrap_inline(content, "**", "**")
            }),
            Rule::new("code", Filter::tag("code"), render_inline_code),
            Rule::new("code-block", Filter::tag("pre"), render_code_block),
            Rule::new("link", Filter::tag("a"), render_link),
            Rule::new("image", Filter::tag("img"), render_image),
            Rule::new("table", Filter::tag("table"), |_, el, ctx| {
                block(&ctx.outer_html(el.id()))
            }),
            Rule::new("dropped", Filter::tags(DROPPED_TAGS), |_, _, _| String::new()),
        ]
    }

    fn opaque(&self) -> Vec<Filter> {
        vec![Filter::tags(&["code", "pre", "table"])]
    }
}
