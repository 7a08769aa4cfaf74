//! Rule precedence, pack order and escaping through the full pipeline.

use crate::common::{markdown, reparse_gfm};
use unpage_core::rules::RenderContext;
use unpage_core::{
    default_escapes, parse_html, EscapeTable, ExportContext, Exporter, Filter, PackRegistry, Rule,
    RuleSet, Serializer,
};

#[test]
fn test_later_registered_rule_wins() {
    let doc = parse_html("<body><p>x</p></body>").unwrap();

    let mut rules = RuleSet::new(default_escapes());
    rules.add_rule(Rule::new("r1", Filter::tag("p"), |content, _, _| {
        format!("R1({content})")
    }));
    rules.add_rule(Rule::new("r2", Filter::tag("p"), |content, _, _| {
        format!("R2({content})")
    }));

    let mut ctx = ExportContext::new();
    let out = Serializer::new(rules).serialize_document(&doc, &mut ctx);
    assert_eq!(out, "R2(x)\n");
}

#[test]
fn test_pack_order_decides_overrides() {
    let body = r##"<p>Note<a class="footnote-ref" href="#n">1</a></p><aside class="footnote" id="n">Text</aside>"##;
    let registry = PackRegistry::default();

    let footnotes_last = Exporter::with_packs(&registry, &["commonmark", "footnotes"], default_escapes())
        .unwrap()
        .export_html(&format!("<body>{body}</body>"))
        .unwrap();
    assert_eq!(footnotes_last.text, "Note^[Text]\n");

    let commonmark_last = Exporter::with_packs(&registry, &["footnotes", "commonmark"], default_escapes())
        .unwrap()
        .export_html(&format!("<body>{body}</body>"))
        .unwrap();
    assert_eq!(commonmark_last.text, "Note[1](#n)\n\nText\n");
}

#[test]
fn test_render_functions_can_serialize_other_nodes() {
    let doc = parse_html(r#"<body><p>see <span data-see="t"></span></p><div id="t"><em>target</em></div></body>"#)
        .unwrap();
    let mut rules = RuleSet::new(EscapeTable::empty());
    rules.add_rule(Rule::new(
        "see",
        Filter::attribute("data-see"),
        |_, el, ctx: &mut RenderContext<'_>| {
            let target = el.attr("data-see").and_then(|id| ctx.find_by_id(id));
            match target {
                Some(id) => format!("[{}]", ctx.serialize(id)),
                None => String::new(),
            }
        },
    ));
    rules.add_rule(Rule::new("em", Filter::tag("em"), |content, _, _| {
        format!("_{content}_")
    }));

    let mut ctx = ExportContext::new();
    let out = Serializer::new(rules).serialize_document(&doc, &mut ctx);
    assert_eq!(out, "see [_target_]_target_\n");
}

#[test]
fn test_literal_markup_survives_a_markdown_reader() {
    let cases = [
        "*a*",
        "snake_case_name",
        "- not a list",
        "1. not a list",
        "# not a heading",
        "> not a quote",
        "[not](a link)",
        "`not code`",
        r"back\slash",
        "a < b",
        "{% pagebreak %}",
        "a ==b== ++c++",
        "~~c~~ and ~d~",
        "&copy; &amp;",
    ];
    for literal in cases {
        let html = literal.replace('&', "&amp;").replace('<', "&lt;");
        let md = markdown(&format!("<p>{html}</p>"));
        assert!(!md.contains("{%") && !md.contains("=="), "markdown was {md:?}");
        let reparsed = reparse_gfm(&md);
        assert_eq!(reparsed.text, literal, "markdown was {md:?}");
        assert_eq!(reparsed.kinds[..2], ["Document", "Paragraph"], "{literal}");
        assert!(
            reparsed.kinds[2..].iter().all(|kind| kind == "Text"),
            "{literal} reparsed as {:?}",
            reparsed.kinds
        );
    }
}

#[test]
fn test_text_that_looks_like_pack_markup_is_escaped() {
    assert_eq!(
        markdown("<p>{% pagebreak %}</p><p>a ==b== ~~c~~ &amp;copy;</p>"),
        "{\\% pagebreak %}\n\na =\\=b=\\= \\~\\~c\\~\\~ \\&copy;\n"
    );
}

#[test]
fn test_asterisks_are_escaped() {
    assert_eq!(markdown("<p>*a*</p>"), "\\*a\\*\n");
}
