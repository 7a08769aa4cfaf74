use crate::common::markdown;

#[test]
fn test_annotation_marks() {
    let md = markdown(
        r#"<p><mark>hi</mark> <ins>new</ins> <del>old</del> <s>gone</s> <span class="highlight">hl</span></p>"#,
    );
    assert_eq!(md, "==hi== ++new++ ~~old~~ ~~gone~~ ==hl==\n");
}

#[test]
fn test_edge_whitespace_stays_outside_marks() {
    assert_eq!(markdown("<p>a<mark> b </mark>c</p>"), "a ==b== c\n");
}

#[test]
fn test_marked_text_is_still_escaped() {
    assert_eq!(markdown("<p><del>*x*</del></p>"), "~~\\*x\\*~~\n");
}
