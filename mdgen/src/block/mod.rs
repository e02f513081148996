pub mod list;
pub mod reference;
pub mod table;
pub mod text;

use std::fmt;

use crate::block::list::List;
use crate::block::table::Table;
use crate::block::text::TextBlock;
use crate::render::escape::{calculate_fence_length, single_line};
use crate::render::{RenderContext, format_image, format_link, toc};

/// How a link or image points at its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// `[text](target)`
    Inline,
    /// `[text][tag]`, with `[tag]: target` emitted once at the end of the
    /// document.
    Reference(String),
}

/// One structural unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Header {
        level: u8,
        text: String,
    },
    Paragraph(TextBlock),
    /// A single line ending in a hard break. Consecutive lines render without
    /// blank lines between them.
    Line(TextBlock),
    CodeBlock {
        code: String,
        language: String,
    },
    Table(Table),
    List(List),
    Link {
        text: String,
        target: String,
        kind: LinkKind,
    },
    Image {
        alt: String,
        path: String,
        kind: LinkKind,
    },
    /// Resolved against every header in the document when rendered.
    TableOfContents {
        title: String,
        depth: u8,
    },
    HorizontalRule,
}

impl Block {
    pub(crate) fn fmt_with(&self, f: &mut fmt::Formatter<'_>, ctx: &RenderContext) -> fmt::Result {
        match self {
            Block::Header { level, text } => {
                writeln!(f, "{} {}", "#".repeat(*level as usize), header_text(text))
            }
            Block::Paragraph(text) => writeln!(f, "{}", text),
            Block::Line(text) => writeln!(f, "{}  ", text),
            Block::CodeBlock { code, language } => {
                let fence = "`".repeat(calculate_fence_length(code, '`'));
                writeln!(f, "{}{}", fence, info_string(language))?;
                write!(f, "{}", code)?;
                if !code.is_empty() && !code.ends_with('\n') {
                    writeln!(f)?;
                }
                writeln!(f, "{}", fence)
            }
            Block::Table(table) => write!(f, "{}", table),
            Block::List(list) => list.fmt_with(f, &ctx.options),
            Block::Link { text, target, kind } => {
                writeln!(f, "{}", format_link(text, target, kind))
            }
            Block::Image { alt, path, kind } => {
                writeln!(f, "{}", format_image(alt, path, kind))
            }
            Block::TableOfContents { title, depth } => {
                toc::write_toc(f, title, *depth, &ctx.headings, &ctx.options)
            }
            Block::HorizontalRule => writeln!(f, "---"),
        }
    }

    pub(crate) fn is_line(&self) -> bool {
        matches!(self, Block::Line(_))
    }

    /// Whether a following line may be written directly below this block.
    /// An aligned line opens an HTML block that only a blank line closes.
    pub(crate) fn joins_next_line(&self) -> bool {
        matches!(self, Block::Line(text) if text.align.is_none())
    }

    /// Blocks rendered as a Markdown list.
    pub(crate) fn is_list(&self) -> bool {
        matches!(self, Block::List(_) | Block::TableOfContents { .. })
    }
}

/// Header text as it appears after the `#` run.
///
/// A trailing `#` would be read as a closing sequence, so it is escaped.
pub(crate) fn header_text(text: &str) -> String {
    let line = single_line(text);
    match line.strip_suffix('#') {
        Some(rest) => format!("{}\\#", rest),
        None => line,
    }
}

fn info_string(language: &str) -> String {
    language
        .chars()
        .filter(|c| *c != '`' && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}
