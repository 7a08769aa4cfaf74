use crate::common::{markdown, reparse};

#[test]
fn test_nested_and_numbered_lists() {
    let md = markdown(
        r#"<ul><li>one</li><li>two<ul><li>inner</li></ul></li></ul><ol start="3"><li>c</li><li>d</li></ol>"#,
    );
    assert_eq!(md, "- one\n- two\n  - inner\n\n3. c\n4. d\n");

    let items = reparse(&md).kinds.iter().filter(|k| *k == "Item").count();
    assert_eq!(items, 5);
}

#[test]
fn test_out_of_range_list_start_still_numbers_items() {
    let md = markdown(r#"<ol start="9223372036854775807"><li>a</li><li>b</li></ol>"#);
    assert_eq!(md, "999999999. a\n999999999. b\n");
    let items = reparse(&md).kinds.iter().filter(|k| *k == "Item").count();
    assert_eq!(items, 2);

    let md = markdown(r#"<ol start="-4"><li>a</li><li>b</li></ol>"#);
    assert_eq!(md, "0. a\n1. b\n");
}

#[test]
fn test_code_is_never_escaped() {
    let md = markdown(concat!(
        "<p>Use <code>a*b</code> and <code>x`y</code></p>",
        "<pre><code class=\"language-rust\">fn main() {\n    let a = 1;\n}\n</code></pre>",
    ));
    assert_eq!(
        md,
        "Use `a*b` and ``x`y``\n\n```rust\nfn main() {\n    let a = 1;\n}\n```\n"
    );

    let kinds = reparse(&md).kinds;
    assert_eq!(kinds.iter().filter(|k| *k == "Code").count(), 2);
    assert_eq!(kinds.iter().filter(|k| *k == "CodeBlock").count(), 1);
}

#[test]
fn test_blank_lines_inside_code_blocks_survive() {
    let md = markdown("<p>a</p><pre><code>x\n\n\n\ny</code></pre><p>b</p>");
    assert_eq!(md, "a\n\n```\nx\n\n\n\ny\n```\n\nb\n");
    assert_eq!(reparse(&md).kinds.iter().filter(|k| *k == "CodeBlock").count(), 1);
}

#[test]
fn test_headings_links_and_images() {
    let md = markdown(concat!(
        "<h2>Title <em>here</em></h2>",
        "<p><a href=\"https://example.org/a b\">link</a> and <strong>bold</strong></p>",
        "<p><img src=\"cat.png\" alt=\"A cat\"></p>",
    ));
    assert_eq!(
        md,
        "## Title *here*\n\n[link](https://example.org/a%20b) and **bold**\n\n![A cat](cat.png)\n"
    );
}

#[test]
fn test_line_break_and_rule() {
    assert_eq!(markdown("<p>line<br>next</p><hr>"), "line  \nnext\n\n---\n");
}

#[test]
fn test_blockquote_prefixes_every_line() {
    assert_eq!(
        markdown("<blockquote><p>one</p><p>two</p></blockquote>"),
        "> one\n>\n> two\n"
    );
}

#[test]
fn test_tables_are_kept_as_html() {
    assert_eq!(
        markdown("<table><tr><td>1_2</td></tr></table>"),
        "<table><tbody><tr><td>1_2</td></tr></tbody></table>\n"
    );
}

#[test]
fn test_scripts_are_dropped() {
    assert_eq!(markdown("<p>a</p><script>var x = \"*\";</script>"), "a\n");
}
