//! Whole-document exports of paged fixtures.

use crate::common::{fixture, fixture_doc, paged, reparse};
use insta::assert_snapshot;
use unpage_core::{Exporter, FragmentMarkers, Warning};

#[test]
fn test_split_paragraph_exports_as_one_block() {
    let output = Exporter::default().export_document(&fixture_doc("three-pages.html"));

    assert!(output.warnings.is_empty(), "{:?}", output.warnings);
    assert_eq!(
        output.text,
        "# A short document\n\nHello World, done.\n\n## Next\n\nThe end.\n"
    );
}

#[test]
fn test_split_paragraph_reparses_as_single_paragraph() {
    let output = Exporter::default().export_document(&fixture_doc("three-pages.html"));
    let paragraphs: Vec<&str> = output
        .text
        .split("\n\n")
        .filter(|block| !block.starts_with('#'))
        .collect();
    assert_eq!(paragraphs.first().copied(), Some("Hello World, done."));

    let reparsed = reparse(&output.text);
    let count = reparsed.kinds.iter().filter(|k| *k == "Paragraph").count();
    assert_eq!(count, 2);
}

#[test]
fn test_reconstructed_tree_has_one_element_per_reference() {
    let (tree, warnings) = Exporter::default().reconstruct(&fixture_doc("three-pages.html"));
    assert!(warnings.is_empty());

    let groups = unpage_core::common::fragments::collect(&tree, tree.root(), &FragmentMarkers::default());
    assert!(groups.iter().all(|group| group.members.len() == 1));

    let paragraph = tree.find_by_id("p7");
    assert!(paragraph.is_none(), "data-ref is not an id attribute");
    let p7 = groups
        .iter()
        .find(|group| group.reference == "p7")
        .map(|group| group.members[0])
        .unwrap();
    assert_eq!(tree.text_content(p7), "Hello World, done.");
    let attrs: Vec<_> = tree.element(p7).unwrap().attrs.iter().collect();
    assert_eq!(attrs, vec![("data-ref", "p7")]);
}

#[test]
fn test_layout_scaffolding_never_reaches_output() {
    let output = Exporter::default().export_document(&fixture_doc("three-pages.html"));
    assert!(!output.text.contains("Running head"));
    assert!(!output.text.contains("Three pages"));
}

#[test]
fn test_differing_attributes_on_later_fragments_are_discarded() {
    let html = paged(&[
        r#"<p data-ref="q" class="lead" style="text-align: left">first </p>"#,
        r#"<p data-ref="q" class="lead continued" style="text-align: right" data-split-from="q">second</p>"#,
    ]);
    let doc = unpage_core::parse_html(&html).unwrap();
    let (tree, _) = Exporter::default().reconstruct(&doc);

    let html = unpage_core::dom::html::inner_html(&tree, tree.root()).unwrap();
    assert_eq!(
        html,
        r#"<p data-ref="q" class="lead" style="text-align: left">first second</p>"#
    );
}

#[test]
fn test_kitchensink() {
    let output = Exporter::default()
        .export_html(&fixture("kitchensink.html"))
        .unwrap();

    assert!(output.warnings.is_empty(), "{:?}", output.warnings);
    assert_snapshot!(output.text.trim_end(), @r###"
# Field notes

The <sc>nasa</sc> report^[Published in 1969.] covers ==two== missions, not \*three\*.

<columns count="2" gutter="1.5em">

Left column text that continues here.

</columns>

{% pagebreak %}

{% figure id="fig-1" src="images/orbit.png" alt="Orbit diagram" caption="Orbit of the second mission" float="right" width="40%" %}

- Launch
- Landing ~~delayed~~ ++on time++
"###);
}

#[test]
fn test_warnings_are_returned_not_swallowed() {
    let html = paged(&[r##"<p>See<a class="footnote-ref" href="#gone">1</a></p>"##]);
    let output = Exporter::default().export_html(&html).unwrap();

    assert_eq!(output.text, "See1\n");
    assert_eq!(
        output.warnings,
        vec![Warning::missing_target("footnote definition", "gone")]
    );
}

#[test]
fn test_document_without_pages_exports_as_is() {
    let output = Exporter::default()
        .export_html("<html><body><p>Plain <em>html</em></p></body></html>")
        .unwrap();
    assert_eq!(output.text, "Plain *html*\n");
}
