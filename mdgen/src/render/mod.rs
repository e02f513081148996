//! Serialization of a [`Document`] to Markdown text.
//!
//! Rendering is a pure function of the document: blocks are emitted in
//! insertion order separated by blank lines, table-of-contents blocks are
//! resolved against every header in the document, and reference
//! definitions are appended after the last block.

pub mod escape;
pub mod slug;
pub mod toc;

use std::fmt;

use crate::block::{Block, LinkKind};
use crate::config::RenderOptions;
use crate::document::Document;
use crate::render::escape::{escape_brackets, link_destination, single_line};
use crate::render::toc::HeadingAnchor;

const LIST_SEPARATOR: &str = "<!-- -->";

/// State shared by every block during one render pass.
pub(crate) struct RenderContext {
    pub options: RenderOptions,
    pub headings: Vec<HeadingAnchor>,
}

struct BlockView<'a> {
    block: &'a Block,
    ctx: &'a RenderContext,
}

impl fmt::Display for BlockView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.block.fmt_with(f, self.ctx)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = RenderContext {
            options: self.options().clone(),
            headings: toc::collect_headings(self.title(), self.blocks()),
        };

        let mut wrote_any = false;
        if let Some(title) = self.title() {
            let title = single_line(title);
            writeln!(f, "{}", title)?;
            writeln!(f, "{}", "=".repeat(title.chars().count().max(3)))?;
            wrote_any = true;
        }

        let mut previous: Option<&Block> = None;
        for block in self.blocks() {
            let rendered = BlockView { block, ctx: &ctx }.to_string();
            let rendered = rendered.trim_end_matches('\n');
            if rendered.is_empty() {
                continue;
            }
            let joined = previous.is_some_and(|p| p.joins_next_line()) && block.is_line();
            if wrote_any && !joined {
                writeln!(f)?;
            }
            // Adjacent lists would otherwise merge into one.
            if previous.is_some_and(Block::is_list) && block.is_list() {
                writeln!(f, "{}", LIST_SEPARATOR)?;
                writeln!(f)?;
            }
            writeln!(f, "{}", rendered)?;
            previous = Some(block);
            wrote_any = true;
        }

        if !self.references().is_empty() {
            if wrote_any {
                writeln!(f)?;
            }
            for (tag, target) in self.references().iter() {
                writeln!(f, "[{}]: {}", escape_brackets(tag), link_destination(target))?;
            }
        }
        Ok(())
    }
}

/// `[text](target)`, using the target as text when `text` is empty.
pub fn inline_link(text: &str, target: &str) -> String {
    format!("[{}]({})", link_text(text, target), link_destination(target))
}

/// `[text][tag]`. The caller is responsible for defining `tag`.
pub fn reference_link(text: &str, tag: &str) -> String {
    format!("[{}][{}]", escape_brackets(&single_line(text)), escape_brackets(tag))
}

/// `![alt](path)`
pub fn inline_image(alt: &str, path: &str) -> String {
    format!("![{}]({})", escape_brackets(&single_line(alt)), link_destination(path))
}

/// `![alt][tag]`
pub fn reference_image(alt: &str, tag: &str) -> String {
    format!("![{}][{}]", escape_brackets(&single_line(alt)), escape_brackets(tag))
}

fn link_text(text: &str, target: &str) -> String {
    let text = single_line(text);
    if text.trim().is_empty() {
        escape_brackets(target)
    } else {
        escape_brackets(&text)
    }
}

pub(crate) fn format_link(text: &str, target: &str, kind: &LinkKind) -> String {
    match kind {
        LinkKind::Inline => inline_link(text, target),
        LinkKind::Reference(tag) => {
            format!("[{}][{}]", link_text(text, target), escape_brackets(tag))
        }
    }
}

pub(crate) fn format_image(alt: &str, path: &str, kind: &LinkKind) -> String {
    match kind {
        LinkKind::Inline => inline_image(alt, path),
        LinkKind::Reference(tag) => reference_image(alt, tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_link() {
        assert_eq!(
            inline_link("mdutils", "https://github.com/didix21/mdutils"),
            "[mdutils](https://github.com/didix21/mdutils)"
        );
    }

    #[test]
    fn test_inline_link_without_text_uses_target() {
        assert_eq!(inline_link("", "https://x.dev"), "[https://x.dev](https://x.dev)");
    }

    #[test]
    fn test_reference_forms() {
        assert_eq!(reference_link("docs", "1"), "[docs][1]");
        assert_eq!(reference_image("snow trees", "im"), "![snow trees][im]");
    }

    #[test]
    fn test_inline_image_with_spaces() {
        assert_eq!(
            inline_image("tree", "./images/snow trees.jpg"),
            "![tree](<./images/snow trees.jpg>)"
        );
    }

    fn list_starts(markdown: &str) -> usize {
        pulldown_cmark::Parser::new(markdown)
            .filter(|e| matches!(e, pulldown_cmark::Event::Start(pulldown_cmark::Tag::List(_))))
            .count()
    }

    #[test]
    fn test_adjacent_lists_stay_separate() {
        let mut doc = Document::untitled();
        doc.append_ordered_list(&["x".into(), "y".into()]).unwrap();
        doc.append_ordered_list(&["p".into()]).unwrap();
        let rendered = doc.render();
        assert_eq!(rendered, "1. x\n2. y\n\n<!-- -->\n\n1. p\n");
        assert_eq!(list_starts(&rendered), 2);
    }

    #[test]
    fn test_contents_followed_by_list() {
        let mut doc = Document::untitled();
        doc.append_table_of_contents("", 1).unwrap();
        doc.append_list(&["mine".into()]).unwrap();
        doc.append_header(1, "Overview").unwrap();
        assert_eq!(list_starts(&doc.render()), 2);
    }

    #[test]
    fn test_line_after_aligned_line_gets_blank_line() {
        use crate::block::text::{TextAlign, TextBlock};

        let mut doc = Document::untitled();
        doc.append_line(TextBlock::new("centered").with_align(TextAlign::Center));
        doc.append_line(TextBlock::new("*after*"));
        let rendered = doc.render();
        assert_eq!(rendered, "<p align=\"center\">centered</p>  \n\n*after*  \n");
        let emphasized = pulldown_cmark::Parser::new(&rendered)
            .filter(|e| matches!(e, pulldown_cmark::Event::Start(pulldown_cmark::Tag::Emphasis)))
            .count();
        assert_eq!(emphasized, 1);
    }

    #[test]
    fn test_reference_link_with_empty_text() {
        let kind = LinkKind::Reference("r".to_string());
        assert_eq!(format_link("", "https://x.dev", &kind), "[https://x.dev][r]");
    }
}
