//! TOML manifests describing a document block by block.
//!
//! ```toml
//! title = "Release Notes"
//! output = "notes.md"
//!
//! [[block]]
//! type = "header"
//! level = 1
//! text = "Overview"
//!
//! [[block]]
//! type = "list"
//! items = ["a", ["a.1", "a.2"], "b"]
//! ```

use std::ops::Range;
use std::path::PathBuf;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use serde::Deserialize;
use thiserror::Error;
use toml::Spanned;

use mdgen::{
    ColumnAlignment, Document, DocumentError, Emphasis, LinkKind, ListEntry, RenderOptions,
    TextAlign, TextBlock,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub title: String,

    /// Output path, relative to the configured output directory.
    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default, rename = "block")]
    pub blocks: Vec<Spanned<ManifestBlock>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ManifestBlock {
    Header {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
        #[serde(default)]
        emphasis: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        align: Option<Alignment>,
    },
    /// A single line ending in a hard break.
    Line {
        text: String,
        #[serde(default)]
        emphasis: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        align: Option<Alignment>,
    },
    Code {
        code: String,
        #[serde(default)]
        language: String,
    },
    Table {
        columns: usize,
        rows: usize,
        cells: Vec<String>,
        #[serde(default)]
        align: Alignment,
    },
    List {
        items: Vec<ManifestListEntry>,
        #[serde(default)]
        style: ListKind,
        #[serde(default)]
        checked: bool,
    },
    Link {
        text: String,
        target: String,
        #[serde(default)]
        reference: Option<String>,
    },
    Image {
        alt: String,
        path: String,
        #[serde(default)]
        reference: Option<String>,
    },
    Reference {
        tag: String,
        target: String,
    },
    Toc {
        #[serde(default)]
        title: String,
        #[serde(default = "default_toc_depth")]
        depth: u8,
    },
    Rule,
}

fn default_toc_depth() -> u8 {
    2
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    #[default]
    Bullet,
    Ordered,
    Checkbox,
}

/// A list item, or an array of items nested under the previous one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ManifestListEntry {
    Item(String),
    Nested(Vec<ManifestListEntry>),
}

impl From<&ManifestListEntry> for ListEntry {
    fn from(entry: &ManifestListEntry) -> Self {
        match entry {
            ManifestListEntry::Item(text) => ListEntry::Item(text.clone()),
            ManifestListEntry::Nested(entries) => {
                ListEntry::Nested(entries.iter().map(ListEntry::from).collect())
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest: {}", source.message())]
    Parse { source: toml::de::Error },

    #[error("block {index}: {source}")]
    Block {
        index: usize,
        span: Range<usize>,
        source: DocumentError,
    },
}

impl ManifestError {
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        match self {
            ManifestError::Parse { source } => {
                let diagnostic = Diagnostic::error().with_message("invalid manifest");
                match source.span() {
                    Some(span) => diagnostic.with_labels(vec![
                        Label::primary(file_id, span).with_message(source.message()),
                    ]),
                    None => diagnostic.with_notes(vec![source.message().to_string()]),
                }
            }
            ManifestError::Block { index, span, source } => Diagnostic::error()
                .with_message(format!("cannot add block {}", index))
                .with_labels(vec![
                    Label::primary(file_id, span.clone()).with_message(source.to_string()),
                ]),
        }
    }
}

impl Manifest {
    pub fn parse(source: &str) -> Result<Self, ManifestError> {
        toml::from_str(source).map_err(|source| ManifestError::Parse { source })
    }

    /// Build the document, stopping at the first block the builder rejects.
    pub fn build(&self, options: RenderOptions) -> Result<Document, ManifestError> {
        let mut doc = Document::with_options(self.title.clone(), options);
        for (index, block) in self.blocks.iter().enumerate() {
            block
                .get_ref()
                .apply(&mut doc)
                .map_err(|source| ManifestError::Block {
                    index,
                    span: block.span(),
                    source,
                })?;
        }
        log::debug!("manifest built {} blocks", doc.blocks().len());
        Ok(doc)
    }
}

impl ManifestBlock {
    fn apply(&self, doc: &mut Document) -> mdgen::Result<()> {
        match self {
            ManifestBlock::Header { level, text } => doc.append_header(*level, text.as_str()),
            ManifestBlock::Paragraph {
                text,
                emphasis,
                color,
                align,
            } => {
                doc.append_styled_paragraph(text_block(text, emphasis, color, *align));
                Ok(())
            }
            ManifestBlock::Line {
                text,
                emphasis,
                color,
                align,
            } => {
                doc.append_line(text_block(text, emphasis, color, *align));
                Ok(())
            }
            ManifestBlock::Code { code, language } => {
                doc.append_code_block(code.as_str(), language);
                Ok(())
            }
            ManifestBlock::Table {
                columns,
                rows,
                cells,
                align,
            } => doc.append_table(cells.iter().cloned(), *columns, *rows, align.column()),
            ManifestBlock::List {
                items,
                style,
                checked,
            } => {
                let entries: Vec<ListEntry> = items.iter().map(ListEntry::from).collect();
                match style {
                    ListKind::Bullet => doc.append_list(&entries),
                    ListKind::Ordered => doc.append_ordered_list(&entries),
                    ListKind::Checkbox => doc.append_checkbox_list(&entries, *checked),
                }
            }
            ManifestBlock::Link {
                text,
                target,
                reference,
            } => doc.append_link(text.as_str(), target.as_str(), link_kind(reference)),
            ManifestBlock::Image {
                alt,
                path,
                reference,
            } => doc.append_image(alt.as_str(), path.as_str(), link_kind(reference)),
            ManifestBlock::Reference { tag, target } => doc.define_reference(tag, target),
            ManifestBlock::Toc { title, depth } => {
                doc.append_table_of_contents(title.as_str(), *depth)
            }
            ManifestBlock::Rule => {
                doc.append_horizontal_rule();
                Ok(())
            }
        }
    }
}

/// `emphasis` takes any of the flags `b`, `i` and `c`.
fn text_block(
    text: &str,
    emphasis: &str,
    color: &Option<String>,
    align: Option<Alignment>,
) -> TextBlock {
    let mut block = TextBlock::new(text).with_emphasis(Emphasis::from_flags(emphasis));
    if let Some(color) = color {
        block = block.with_color(color.as_str());
    }
    match align.and_then(Alignment::text) {
        Some(align) => block.with_align(align),
        None => block,
    }
}

impl Alignment {
    fn column(self) -> ColumnAlignment {
        match self {
            Alignment::None => ColumnAlignment::None,
            Alignment::Left => ColumnAlignment::Left,
            Alignment::Center => ColumnAlignment::Center,
            Alignment::Right => ColumnAlignment::Right,
        }
    }

    fn text(self) -> Option<TextAlign> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some(TextAlign::Left),
            Alignment::Center => Some(TextAlign::Center),
            Alignment::Right => Some(TextAlign::Right),
        }
    }
}

fn link_kind(reference: &Option<String>) -> LinkKind {
    match reference {
        Some(tag) => LinkKind::Reference(tag.clone()),
        None => LinkKind::Inline,
    }
}
