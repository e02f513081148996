use std::fs;

use pretty_assertions::assert_eq;

use mdgen::parser::Parser;
use mdgen::{
    ColumnAlignment, Document, DocumentError, Emphasis, LinkKind, ListEntry, RenderOptions,
    TextAlign, TextBlock,
};

fn check(markdown: &str) -> mdgen::parser::Outline {
    Parser::new(markdown.to_string(), 0)
        .parse()
        .unwrap_or_else(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            panic!("outline check failed: {}", msgs.join("; "))
        })
}

fn sample_document() -> Document {
    let mut doc = Document::new("Markdown File Example");
    doc.append_table_of_contents("Contents", 2).unwrap();
    doc.append_header(1, "Overview").unwrap();
    doc.append_paragraph(
        "``create_md_file()`` is the last command that has to be called.",
        Emphasis::NONE,
        None,
    );
    doc.append_header(2, "Tables").unwrap();
    let mut cells = vec![
        "Items".to_string(),
        "Descriptions".to_string(),
        "Data".to_string(),
    ];
    for x in 0..5 {
        cells.extend([format!("Item {x}"), format!("Description Item {x}"), x.to_string()]);
    }
    doc.append_table(cells, 3, 6, ColumnAlignment::Center).unwrap();
    doc.append_header(2, "Lists").unwrap();
    doc.append_list(&[
        "Item 1".into(),
        "Item 2".into(),
        vec!["Item 2.1", "Item 2.2"].into(),
        "Item 3".into(),
    ])
    .unwrap();
    doc.append_header(1, "Overview").unwrap();
    doc.append_link("mdutils", "https://github.com/didix21/mdutils", LinkKind::Inline)
        .unwrap();
    doc.append_image(
        "snow trees",
        "./doc/source/images/photo-of-snow-covered-trees.jpg",
        LinkKind::Reference("im".to_string()),
    )
    .unwrap();
    doc
}

#[test]
fn header_line_prefix() {
    let mut doc = Document::untitled();
    doc.append_header(3, "Deep heading").unwrap();
    assert!(doc.render().lines().any(|l| l == "### Deep heading"));
}

#[test]
fn table_round_trip() {
    let mut doc = Document::untitled();
    doc.append_table(["A", "B", "C", "D", "E", "F"], 3, 2, ColumnAlignment::Center)
        .unwrap();
    let rendered = doc.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert!(lines[0].contains("A | B | C"));
    assert_eq!(lines[1].matches(":---:").count(), 3);
    assert!(lines[2].contains("D | E | F"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn table_parses_as_gfm_table() {
    use pulldown_cmark::{Event, Options, Parser as Cmark, Tag, TagEnd};

    let mut doc = Document::untitled();
    doc.append_table(["a|b", r"c\|d", "e", r"f\g"], 2, 2, ColumnAlignment::Right)
        .unwrap();
    let rendered = doc.render();

    let mut cells = Vec::new();
    let mut current = String::new();
    for event in Cmark::new_ext(&rendered, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::TableCell) => current.clear(),
            Event::Text(t) => current.push_str(&t),
            Event::End(TagEnd::TableCell) => cells.push(current.clone()),
            _ => {}
        }
    }
    assert_eq!(cells, vec!["a|b", r"c\|d", "e", r"f\g"]);
}

#[test]
fn list_item_markers_stay_text() {
    let mut doc = Document::untitled();
    doc.append_table_of_contents("", 1).unwrap();
    doc.append_header(1, "Overview").unwrap();
    doc.append_list(&["# Overview".into(), "> quoted".into(), "1. numbered".into()])
        .unwrap();
    let rendered = doc.render();

    let outline = check(&rendered);
    let anchors: Vec<(&str, &str)> = outline
        .headings
        .iter()
        .map(|h| (h.text.as_str(), h.anchor.as_str()))
        .collect();
    assert_eq!(anchors, vec![("Overview", "overview")]);
    assert!(rendered.contains("- \\# Overview\n"));
    assert!(rendered.contains("- 1\\. numbered\n"));
}

#[test]
fn wide_indent_keeps_nesting() {
    use pulldown_cmark::{Event, Parser as Cmark, Tag};

    let options = RenderOptions::new().with_indent(8);
    let mut doc = Document::with_options("", options);
    doc.append_list(&["a".into(), vec!["b"].into()]).unwrap();
    let rendered = doc.render();
    assert_eq!(rendered, "- a\n     - b\n");
    let lists = Cmark::new(&rendered)
        .filter(|e| matches!(e, Event::Start(Tag::List(_))))
        .count();
    assert_eq!(lists, 2);
}

#[test]
fn nested_list_lines_and_indentation() {
    let mut doc = Document::untitled();
    doc.append_list(&[
        "a".into(),
        ListEntry::Nested(vec!["b".into(), vec!["c"].into()]),
        "d".into(),
    ])
    .unwrap();
    assert_eq!(doc.render(), "- a\n    - b\n        - c\n- d\n");
}

#[test]
fn orphan_nested_list_is_invalid() {
    let mut doc = Document::untitled();
    let err = doc.append_list(&[vec!["x"].into()]).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidArgument(_)));
}

#[test]
fn reference_integrity() {
    let mut doc = Document::untitled();
    let tag = || LinkKind::Reference("1".to_string());
    doc.append_link("mdutils", "https://github.com/didix21/mdutils", tag())
        .unwrap();
    doc.append_link("again", "https://github.com/didix21/mdutils", tag())
        .unwrap();
    let err = doc
        .append_link("elsewhere", "https://example.com", tag())
        .unwrap_err();
    assert!(matches!(err, DocumentError::InvalidArgument(_)));

    let rendered = doc.render();
    assert_eq!(rendered.matches("[1]: ").count(), 1);
    assert!(rendered.ends_with("[1]: https://github.com/didix21/mdutils\n"));
}

#[test]
fn toc_slugs_for_duplicate_headers() {
    let rendered = sample_document().render();
    assert!(rendered.contains("- [Overview](#overview)\n"));
    assert!(rendered.contains("- [Overview](#overview-1)\n"));
    let first = rendered.find("(#overview)").unwrap();
    let second = rendered.find("(#overview-1)").unwrap();
    assert!(first < second);
}

#[test]
fn rendered_documents_check_clean() {
    let rendered = sample_document().render();
    let outline = check(&rendered);
    assert_eq!(outline.links.len(), 4);
    let anchors: Vec<&str> = outline.headings.iter().map(|h| h.anchor.as_str()).collect();
    assert_eq!(
        anchors,
        vec!["markdown-file-example", "overview", "tables", "lists", "overview-1"]
    );
}

#[test]
fn toc_anchor_matches_title_collision() {
    let mut doc = Document::new("Overview");
    doc.append_table_of_contents("", 1).unwrap();
    doc.append_header(1, "Overview").unwrap();
    let rendered = doc.render();
    assert!(rendered.contains("[Overview](#overview-1)"));
    check(&rendered);
}

#[test]
fn render_is_idempotent() {
    let doc = sample_document();
    assert_eq!(doc.render(), doc.render());
}

#[test]
fn write_twice_without_overwrite() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("example.md");
    fs::write(&path, "keep me").unwrap();

    let doc = sample_document();
    for _ in 0..2 {
        let err = doc.write(&path, false).unwrap_err();
        assert!(matches!(err, DocumentError::AlreadyExists(_)));
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
}

#[test]
fn write_then_overwrite() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("example.md");

    let doc = sample_document();
    doc.write(&path, false).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), doc.render());

    let mut other = Document::new("Replaced");
    other.append_horizontal_rule();
    other.write(&path, true).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Replaced\n========\n\n---\n");
}

#[test]
fn styled_text_blocks() {
    let mut doc = Document::untitled();
    doc.append_line(TextBlock::new("bold_italics_code").with_emphasis(Emphasis::from_flags("bic")));
    doc.append_line(TextBlock::new("Text color").with_color("green"));
    doc.append_line(TextBlock::new("Align Text to center").with_align(TextAlign::Center));
    let expected = concat!(
        "***`bold_italics_code`***  \n",
        "<font color=\"green\">Text color</font>  \n",
        "<p align=\"center\">Align Text to center</p>  \n",
    );
    assert_eq!(doc.render(), expected);
}

#[test]
fn checkbox_and_ordered_lists() {
    let mut doc = Document::untitled();
    doc.append_checkbox_list(&["write docs".into(), "ship".into()], false)
        .unwrap();
    doc.append_ordered_list(&["first".into(), vec!["inner"].into()])
        .unwrap();
    assert_eq!(
        doc.render(),
        "- [ ] write docs\n- [ ] ship\n\n<!-- -->\n\n1. first\n    1. inner\n"
    );
}
