use crate::common::{export_body, markdown};
use unpage_core::Warning;

#[test]
fn test_call_renders_definition_inline() {
    let md = markdown(
        r##"<p>Claim<a class="footnote-ref" href="#fn1">1</a>.</p><aside class="footnote" id="fn1">A <em>real</em> source.</aside>"##,
    );
    assert_eq!(md, "Claim^[A *real* source.].\n");
}

#[test]
fn test_call_attribute_and_role() {
    let md = markdown(
        r#"<p>x<span data-footnote-call="n2">*</span></p><div role="doc-footnote" id="n2">Two</div>"#,
    );
    assert_eq!(md, "x^[Two]\n");
}

#[test]
fn test_definition_text_is_escaped() {
    let md = markdown(
        r##"<p>a<a class="footnote-ref" href="#f">1</a></p><aside class="footnote" id="f">a_b</aside>"##,
    );
    assert_eq!(md, "a^[a\\_b]\n");
}

#[test]
fn test_missing_definition_keeps_call_content() {
    let output = export_body(r#"<p>x<sup data-footnote-call="nope">1</sup></p>"#);
    assert_eq!(output.text, "x1\n");
    assert_eq!(
        output.warnings,
        vec![Warning::missing_target("footnote definition", "nope")]
    );
}

#[test]
fn test_self_referencing_definition_is_cut() {
    let output = export_body(
        r#"<p>x<a data-footnote-call="c">1</a></p><aside class="footnote" id="c">loop<a data-footnote-call="c">2</a></aside>"#,
    );
    assert_eq!(output.text, "x^[loop]\n");
    assert!(!output.warnings.is_empty());
    assert!(output
        .warnings
        .iter()
        .all(|w| matches!(w, Warning::InvariantViolation { .. })));
}
