//! Property tests over generated paged documents.

use crate::common::paged;
use proptest::prelude::*;
use unpage_core::common::fragments::collect;
use unpage_core::dom::html::outer_html;
use unpage_core::{parse_html, Cleanup, Exporter, FragmentMarkers};

/// One paragraph split over as many pages as there are words, with markers that agree
/// with page order.
fn split_paragraph(words: &[String]) -> String {
    let last = words.len() - 1;
    let markers: Vec<(bool, bool)> = (0..words.len())
        .map(|index| (index > 0, index < last))
        .collect();
    split_paragraph_with_markers(words, &markers)
}

/// Same paragraph, with `(split-from, split-to)` markers chosen by the caller.
fn split_paragraph_with_markers(words: &[String], markers: &[(bool, bool)]) -> String {
    let last = words.len() - 1;
    let pages: Vec<String> = words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let (from, to) = markers.get(index).copied().unwrap_or_default();
            let mut attrs = String::new();
            if from {
                attrs.push_str(" data-split-from=\"p1\"");
            }
            if to {
                attrs.push_str(" data-split-to=\"p1\"");
            }
            let space = if index < last { " " } else { "" };
            format!("<p data-ref=\"p1\"{attrs}>{word}{space}</p>")
        })
        .collect();
    let refs: Vec<&str> = pages.iter().map(String::as_str).collect();
    paged(&refs)
}

proptest! {
    #[test]
    fn fragments_merge_in_page_order(words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let doc = parse_html(&split_paragraph(&words)).unwrap();
        let output = Exporter::default().export_document(&doc);

        prop_assert!(output.warnings.is_empty());
        prop_assert_eq!(output.text, format!("{}\n", words.join(" ")));
    }

    #[test]
    fn merge_order_ignores_split_markers(
        words in prop::collection::vec("[a-z]{1,8}", 2..6),
        markers in prop::collection::vec((any::<bool>(), any::<bool>()), 6),
    ) {
        let doc = parse_html(&split_paragraph_with_markers(&words, &markers)).unwrap();
        let output = Exporter::default().export_document(&doc);

        prop_assert!(output.warnings.is_empty());
        prop_assert_eq!(output.text, format!("{}\n", words.join(" ")));
    }

    #[test]
    fn reconstruction_leaves_one_element_per_reference(words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let doc = parse_html(&split_paragraph(&words)).unwrap();
        let (tree, _) = Exporter::default().reconstruct(&doc);
        let groups = collect(&tree, tree.root(), &FragmentMarkers::default());

        prop_assert_eq!(groups.len(), 1);
        prop_assert_eq!(groups[0].members.len(), 1);
    }

    #[test]
    fn cleanup_is_idempotent(bodies in prop::collection::vec("[a-z ]{0,12}", 1..5)) {
        let pages: Vec<String> = bodies
            .iter()
            .map(|body| format!("<section><p>{body}</p></section>"))
            .collect();
        let refs: Vec<&str> = pages.iter().map(String::as_str).collect();
        let mut doc = parse_html(&paged(&refs)).unwrap();

        let cleanup = Cleanup::default();
        cleanup.apply(&mut doc);
        let once = outer_html(&doc, doc.root()).unwrap();
        cleanup.apply(&mut doc);
        let twice = outer_html(&doc, doc.root()).unwrap();

        prop_assert_eq!(once, twice);
    }
}
