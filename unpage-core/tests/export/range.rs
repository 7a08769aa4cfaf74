//! Page-range exports.

use crate::common::{fixture_doc, paged};
use unpage_core::{
    parse_html, ExportContext, Exporter, PageLayout, PageSelection, Payload, Trigger, Warning,
    MARKDOWN_MIME,
};

#[test]
fn test_single_page_keeps_only_its_fragment() {
    let doc = fixture_doc("three-pages.html");
    let selection: PageSelection = "2".parse().unwrap();

    let mut ctx = ExportContext::new();
    let synthetic = PageLayout::default()
        .extract(&doc, &selection, &mut ctx)
        .unwrap();
    assert_eq!(synthetic.text_content(synthetic.root()), "World, ");

    let output = Exporter::default().export_range(&doc, &selection).unwrap();
    assert_eq!(output.text, "World,\n");
    assert!(output.warnings.is_empty());
}

#[test]
fn test_non_contiguous_pages_merge_what_they_share() {
    let doc = fixture_doc("three-pages.html");
    let output = Exporter::default()
        .export_range(&doc, &"1,3".parse().unwrap())
        .unwrap();
    assert_eq!(
        output.text,
        "# A short document\n\nHello done.\n\n## Next\n\nThe end.\n"
    );
}

#[test]
fn test_full_range_matches_whole_document() {
    let doc = fixture_doc("three-pages.html");
    let exporter = Exporter::default();
    let whole = exporter.export_document(&doc);
    let range = exporter
        .export_range(&doc, &PageSelection::range(3, 1))
        .unwrap();
    assert_eq!(range.text, whole.text);
}

#[test]
fn test_empty_selection_yields_no_output() {
    let doc = fixture_doc("three-pages.html");
    assert!(Exporter::default()
        .export_range(&doc, &PageSelection::range(10, 12))
        .is_none());
}

#[test]
fn test_range_trigger_builds_markdown_payload() {
    let doc = parse_html(&paged(&["<p>one</p>", "<p>two</p>", "<p>three</p>"])).unwrap();
    let mut sink: Vec<Payload> = Vec::new();
    let trigger = Trigger::ExportRange {
        filename: "excerpt.md".to_string(),
        selection: "2-3".parse().unwrap(),
    };

    let warnings = Exporter::default().deliver(&doc, &trigger, &mut sink).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].content, "two\n\nthree\n");
    assert_eq!(sink[0].filename, "excerpt.md");
    assert_eq!(sink[0].mime, MARKDOWN_MIME);
}

#[test]
fn test_missing_pages_in_list_are_reported() {
    let doc = parse_html(&paged(&["<p>one</p>", "<p>two</p>"])).unwrap();
    let trigger = Trigger::ExportRange {
        filename: "x.md".to_string(),
        selection: PageSelection::list([2, 7]),
    };
    let (payload, warnings) = Exporter::default().handle(&doc, &trigger);

    assert_eq!(payload.map(|p| p.content), Some("two\n".to_string()));
    assert_eq!(warnings, vec![Warning::missing_target("page", "7")]);
}
