use std::path::Path;

use crate::block::list::{List, ListEntry, ListStyle};
use crate::block::reference::ReferenceRegistry;
use crate::block::table::{ColumnAlignment, Table};
use crate::block::text::{Emphasis, TextBlock};
use crate::block::{Block, LinkKind};
use crate::config::RenderOptions;
use crate::error::{DocumentError, Result};
use crate::writer;

/// An ordered sequence of Markdown blocks under an optional title.
///
/// Every `append_*` call validates its arguments before touching the
/// document, so a failed call leaves the document unchanged. Rendering never
/// mutates the document and can be repeated.
///
/// ```
/// use mdgen::{ColumnAlignment, Document};
///
/// let mut doc = Document::new("Example");
/// doc.append_header(1, "Overview").unwrap();
/// doc.append_table(["A", "B", "C", "D"], 2, 2, ColumnAlignment::Center).unwrap();
/// assert!(doc.render().contains("| A | B |"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    title: Option<String>,
    options: RenderOptions,
    blocks: Vec<Block>,
    references: ReferenceRegistry,
}

impl Document {
    /// A document whose title renders as a level-1 setext heading.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_options(title, RenderOptions::default())
    }

    pub fn with_options(title: impl Into<String>, options: RenderOptions) -> Self {
        let title = title.into();
        Document {
            title: if title.trim().is_empty() { None } else { Some(title) },
            options,
            blocks: Vec::new(),
            references: ReferenceRegistry::new(),
        }
    }

    pub fn untitled() -> Self {
        Self::with_options(String::new(), RenderOptions::default())
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn references(&self) -> &ReferenceRegistry {
        &self.references
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.blocks.is_empty()
    }

    fn push(&mut self, block: Block) {
        log::debug!("append block #{}: {}", self.blocks.len(), block_kind(&block));
        self.blocks.push(block);
    }

    pub fn append_header(&mut self, level: u8, text: impl Into<String>) -> Result<()> {
        if !(1..=6).contains(&level) {
            return Err(DocumentError::invalid(format!(
                "header level must be between 1 and 6, got {}",
                level
            )));
        }
        self.push(Block::Header {
            level,
            text: text.into(),
        });
        Ok(())
    }

    /// Append a paragraph. `color` is emitted verbatim in a `<font>` tag.
    pub fn append_paragraph(
        &mut self,
        text: impl Into<String>,
        emphasis: Emphasis,
        color: Option<&str>,
    ) {
        let mut block = TextBlock::new(text).with_emphasis(emphasis);
        if let Some(color) = color {
            block = block.with_color(color);
        }
        self.push(Block::Paragraph(block));
    }

    pub fn append_styled_paragraph(&mut self, text: TextBlock) {
        self.push(Block::Paragraph(text));
    }

    /// Append a single line ending in a hard break.
    pub fn append_line(&mut self, text: TextBlock) {
        self.push(Block::Line(text));
    }

    /// Append a fenced code block. An empty `language` falls back to
    /// [`RenderOptions::default_code_language`].
    pub fn append_code_block(&mut self, code: impl Into<String>, language: &str) {
        let language = if language.trim().is_empty() {
            self.options.default_code_language.clone()
        } else {
            language.trim().to_string()
        };
        self.push(Block::CodeBlock {
            code: code.into(),
            language,
        });
    }

    /// Append a table from row-major `cells`; the first row is the header.
    pub fn append_table<I, S>(
        &mut self,
        cells: I,
        columns: usize,
        rows: usize,
        alignment: ColumnAlignment,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        let table = Table::new(cells, columns, rows, alignment)?;
        self.push(Block::Table(table));
        Ok(())
    }

    pub fn append_list(&mut self, items: &[ListEntry]) -> Result<()> {
        let list = List::from_entries(items, ListStyle::Bullet)?;
        self.push(Block::List(list));
        Ok(())
    }

    pub fn append_ordered_list(&mut self, items: &[ListEntry]) -> Result<()> {
        let list = List::from_entries(items, ListStyle::Ordered)?;
        self.push(Block::List(list));
        Ok(())
    }

    pub fn append_checkbox_list(&mut self, items: &[ListEntry], checked: bool) -> Result<()> {
        let list = List::from_entries(items, ListStyle::Checkbox { checked })?;
        self.push(Block::List(list));
        Ok(())
    }

    /// Append a link on its own line. Reference links register `[tag]:
    /// target` for the end of the document.
    pub fn append_link(
        &mut self,
        text: impl Into<String>,
        target: impl Into<String>,
        kind: LinkKind,
    ) -> Result<()> {
        let target = target.into();
        self.bind_reference(&kind, &target)?;
        self.push(Block::Link {
            text: text.into(),
            target,
            kind,
        });
        Ok(())
    }

    pub fn append_image(
        &mut self,
        alt: impl Into<String>,
        path: impl Into<String>,
        kind: LinkKind,
    ) -> Result<()> {
        let path = path.into();
        self.bind_reference(&kind, &path)?;
        self.push(Block::Image {
            alt: alt.into(),
            path,
            kind,
        });
        Ok(())
    }

    /// Register a reference definition without adding a block, for links
    /// composed into paragraph text with [`reference_link`](crate::reference_link).
    pub fn define_reference(&mut self, tag: &str, target: &str) -> Result<()> {
        self.references.bind(tag, target)
    }

    fn bind_reference(&mut self, kind: &LinkKind, target: &str) -> Result<()> {
        match kind {
            LinkKind::Inline => Ok(()),
            LinkKind::Reference(tag) => self.references.bind(tag, target),
        }
    }

    /// Append a table of contents listing every header of level `<= depth`
    /// in the final document, including headers appended later.
    pub fn append_table_of_contents(&mut self, title: impl Into<String>, depth: u8) -> Result<()> {
        if depth < 1 {
            return Err(DocumentError::invalid("table of contents depth must be at least 1"));
        }
        self.push(Block::TableOfContents {
            title: title.into(),
            depth,
        });
        Ok(())
    }

    pub fn append_horizontal_rule(&mut self) {
        self.push(Block::HorizontalRule);
    }

    /// Serialize the document to Markdown.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write the rendered document to `path`.
    ///
    /// Fails with [`DocumentError::AlreadyExists`] if `path` exists and
    /// `overwrite` is false. The file is either fully written or untouched.
    pub fn write(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
        writer::write_atomic(path.as_ref(), &self.render(), overwrite)
    }
}

fn block_kind(block: &Block) -> &'static str {
    match block {
        Block::Header { .. } => "header",
        Block::Paragraph(_) => "paragraph",
        Block::Line(_) => "line",
        Block::CodeBlock { .. } => "code block",
        Block::Table(_) => "table",
        Block::List(_) => "list",
        Block::Link { .. } => "link",
        Block::Image { .. } => "image",
        Block::TableOfContents { .. } => "table of contents",
        Block::HorizontalRule => "horizontal rule",
    }
}
