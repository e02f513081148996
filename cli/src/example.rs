//! The worked example document written by `mdgen example`.

use mdgen::{
    ColumnAlignment, Document, Emphasis, LinkKind, ListEntry, RenderOptions, Result, TextAlign,
    TextBlock, inline_link, reference_link,
};

pub const EXAMPLE_TITLE: &str = "Markdown File Example";

const SNOW_TREES: &str = "./doc/source/images/photo-of-snow-covered-trees.jpg";
const MDUTILS_URL: &str = "https://github.com/didix21/mdutils";

pub fn build_example(options: RenderOptions) -> Result<Document> {
    let mut doc = Document::with_options(EXAMPLE_TITLE, options);

    doc.append_table_of_contents("Contents", 2)?;
    doc.append_header(1, "Overview")?;
    doc.append_paragraph(
        "This document is generated by `mdgen example` and shows every block the builder supports.",
        Emphasis::NONE,
        None,
    );

    doc.append_header(2, "Create Markdown files")?;
    add_paragraphs(&mut doc);
    add_styled_lines(&mut doc);
    add_code_section(&mut doc);

    doc.append_header(2, "Tables")?;
    doc.append_table(table_data(), 3, 6, ColumnAlignment::Center)?;

    doc.append_header(2, "Lists")?;
    doc.append_list(&list_items())?;

    doc.append_header(1, "Links and Images")?;
    add_links(&mut doc)?;
    add_images(&mut doc)?;

    doc.append_horizontal_rule();
    Ok(doc)
}

fn add_paragraphs(doc: &mut Document) {
    doc.append_paragraph(
        "``create_md_file()`` is the last command that has to be called.",
        Emphasis::NONE,
        None,
    );
    doc.append_paragraph(
        "This is an example of text in which has been added color, bold and italics text.",
        Emphasis::from_flags("bi"),
        Some("purple"),
    );
}

fn add_styled_lines(doc: &mut Document) {
    doc.append_line(TextBlock::new("bold_italics_code").with_emphasis(Emphasis::from_flags("bic")));
    doc.append_line(TextBlock::new("Text color").with_color("green"));
    doc.append_line(TextBlock::new("Align Text to center").with_align(TextAlign::Center));
}

fn add_code_section(doc: &mut Document) {
    let code = concat!(
        "use mdgen::Document;\n",
        "\n",
        "let mut doc = Document::new(\"Markdown File Example\");\n",
        "doc.write(\"example.md\", false)?;",
    );
    doc.append_code_block(code, "rust");
}

/// Items/Descriptions/Data header followed by five item rows.
fn table_data() -> Vec<String> {
    let mut cells = vec![
        "Items".to_string(),
        "Descriptions".to_string(),
        "Data".to_string(),
    ];
    for x in 0..5 {
        cells.extend([format!("Item {x}"), format!("Description Item {x}"), x.to_string()]);
    }
    cells
}

fn list_items() -> Vec<ListEntry> {
    vec![
        "Item 1".into(),
        "Item 2".into(),
        "Item 3".into(),
        "Item 4".into(),
        ListEntry::Nested(vec![
            "Item 4.1".into(),
            "Item 4.2".into(),
            vec!["Item 4.2.1", "Item 4.2.2"].into(),
            "Item 4.3".into(),
            vec!["Item 4.3.1"].into(),
        ]),
        "Item 5".into(),
    ]
}

fn add_links(doc: &mut Document) -> Result<()> {
    doc.append_paragraph(
        format!(
            "Inline link: {}. Reference link: {}.",
            inline_link("mdutils", MDUTILS_URL),
            reference_link("mdutils", "1"),
        ),
        Emphasis::NONE,
        None,
    );
    doc.define_reference("1", MDUTILS_URL)?;
    doc.append_link("Source of the original example", MDUTILS_URL, LinkKind::Reference("1".into()))
}

fn add_images(doc: &mut Document) -> Result<()> {
    doc.append_image("snow trees", SNOW_TREES, LinkKind::Inline)?;
    doc.append_image("snow trees", SNOW_TREES, LinkKind::Reference("im".into()))
}
