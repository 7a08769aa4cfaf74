use crate::common::markdown;

#[test]
fn test_typographic_spans_become_inline_tags() {
    let md = markdown(
        r#"<p>The <span class="small-caps">nasa</span> and <span style="letter-spacing: 0.2em">wide*</span> x<sup>2</sup></p>"#,
    );
    assert_eq!(
        md,
        "The <sc>nasa</sc> and <span style=\"letter-spacing: 0.2em\">wide*</span> x<sup>2</sup>\n"
    );
}

#[test]
fn test_small_caps_from_font_variant() {
    assert_eq!(
        markdown(r#"<p><span style="font-variant: small-caps">Abc</span></p>"#),
        "<sc>Abc</sc>\n"
    );
}

#[test]
fn test_plain_spans_are_transparent() {
    assert_eq!(
        markdown(r#"<p><span style="color: red">a_b</span></p>"#),
        "a\\_b\n"
    );
}
