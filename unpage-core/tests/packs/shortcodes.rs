use crate::common::{export_body, markdown};
use unpage_core::Warning;

#[test]
fn test_figure_style_with_comments_and_important() {
    let md = markdown(
        r#"<figure id="f" style="color: red; /* layout */ width: 40%; float: right !important"><img src="a.png" alt="A"><figcaption>Cap</figcaption></figure>"#,
    );
    assert_eq!(
        md,
        "{% figure id=\"f\" src=\"a.png\" alt=\"A\" caption=\"Cap\" float=\"right\" width=\"40%\" %}\n"
    );
}

#[test]
fn test_figure_becomes_shortcode() {
    let md = markdown(
        r#"<figure id="fig-1" style="float: right; width: 40%"><img src="a.png" alt="A cat"><figcaption>The  cat</figcaption></figure>"#,
    );
    assert_eq!(
        md,
        "{% figure id=\"fig-1\" src=\"a.png\" alt=\"A cat\" caption=\"The cat\" float=\"right\" width=\"40%\" %}\n"
    );
}

#[test]
fn test_empty_values_are_left_out() {
    assert_eq!(
        markdown(r#"<figure><img src="b.png" alt=""></figure>"#),
        "{% figure src=\"b.png\" %}\n"
    );
}

#[test]
fn test_figure_without_image_falls_back_to_content() {
    let output = export_body(r#"<figure id="f2"><p>Only text</p></figure>"#);
    assert_eq!(output.text, "Only text\n");
    assert_eq!(
        output.warnings,
        vec![Warning::missing_target("figure image", "f2")]
    );
}

#[test]
fn test_hand_written_shortcode_passes_through() {
    assert_eq!(
        markdown(r#"<div class="shortcode">{% include "x_y.md" %}</div>"#),
        "{% include \"x_y.md\" %}\n"
    );
}
