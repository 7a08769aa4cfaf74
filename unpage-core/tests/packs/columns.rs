use crate::common::markdown;

#[test]
fn test_columns_block_carries_configuration() {
    let md = markdown(
        r#"<div class="columns" style="column-count: 3; column-gap: 2em"><p>a</p><p>b</p></div>"#,
    );
    assert_eq!(md, "<columns count=\"3\" gutter=\"2em\">\n\na\n\nb\n\n</columns>\n");
}

#[test]
fn test_columns_style_read_past_comments() {
    let md = markdown(
        r#"<div style="/* grid */ column-count: 3 !important; column-gap: /* wide */ 2em"><p>a</p></div>"#,
    );
    assert_eq!(md, "<columns count=\"3\" gutter=\"2em\">\n\na\n\n</columns>\n");
}

#[test]
fn test_columns_defaults() {
    assert_eq!(
        markdown(r#"<div class="columns"><p>x</p></div>"#),
        "<columns count=\"2\" gutter=\"1em\">\n\nx\n\n</columns>\n"
    );
    assert_eq!(
        markdown(r#"<section style="column-count: auto; column-gap: normal"><p>x</p></section>"#),
        "<columns count=\"2\" gutter=\"1em\">\n\nx\n\n</columns>\n"
    );
}

#[test]
fn test_single_column_container_is_plain() {
    assert_eq!(markdown("<div><p>x</p></div>"), "x\n");
}
