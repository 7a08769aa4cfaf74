use crate::common::markdown;

#[test]
fn test_every_page_break_shape_gives_one_sentinel() {
    for html in [
        r#"<div data-break="page"></div>"#,
        r#"<br class="page-break">"#,
        r#"<hr class="page-break">"#,
    ] {
        assert_eq!(markdown(html), "{% pagebreak %}\n", "{html}");
    }
}

#[test]
fn test_every_column_break_shape_between_paragraphs() {
    for shape in [
        r#"<div data-break="column"></div>"#,
        r#"<br class="column-break">"#,
        r#"<hr class="column-break">"#,
    ] {
        assert_eq!(
            markdown(&format!("<p>a</p>{shape}<p>b</p>")),
            "a\n\n{% columnbreak %}\n\nb\n",
            "{shape}"
        );
    }
}

#[test]
fn test_break_inside_paragraph_splits_it() {
    assert_eq!(
        markdown(r#"<p>a<br class="page-break">b</p>"#),
        "a\n\n{% pagebreak %}\n\nb\n"
    );
}

#[test]
fn test_plain_rule_is_not_a_break() {
    assert_eq!(markdown("<p>a</p><hr><p>b</p>"), "a\n\n---\n\nb\n");
}
