//! Table-of-contents resolution.

use std::fmt;

use crate::block::Block;
use crate::config::RenderOptions;
use crate::render::escape::{escape_brackets, single_line};
use crate::render::slug::{AnchorRegistry, heading_plain_text};

/// A header block with the anchor it will receive once rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingAnchor {
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

/// Assign anchors to every heading the rendered document will contain.
///
/// The title takes the first anchor but is not returned, since it is not a
/// table-of-contents entry.
pub(crate) fn collect_headings(title: Option<&str>, blocks: &[Block]) -> Vec<HeadingAnchor> {
    let mut anchors = AnchorRegistry::new();
    if let Some(title) = title {
        anchors.assign(&heading_plain_text(&single_line(title)));
    }

    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Header { level, text } => {
                let plain = heading_plain_text(&crate::block::header_text(text));
                let anchor = anchors.assign(&plain);
                Some(HeadingAnchor {
                    level: *level,
                    text: plain,
                    anchor,
                })
            }
            _ => None,
        })
        .collect()
}

pub(crate) fn write_toc(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    depth: u8,
    headings: &[HeadingAnchor],
    options: &RenderOptions,
) -> fmt::Result {
    let title = single_line(title);
    if !title.is_empty() {
        writeln!(f, "**{}**", title)?;
        writeln!(f)?;
    }

    let mut open_levels: Vec<u8> = Vec::new();
    for heading in headings.iter().filter(|h| h.level <= depth) {
        // Nest under the nearest earlier entry with a smaller level.
        while open_levels.last().is_some_and(|&l| l >= heading.level) {
            open_levels.pop();
        }
        writeln!(
            f,
            "{}{} [{}](#{})",
            options.indent_str(open_levels.len()),
            options.bullet,
            escape_brackets(&heading.text),
            heading.anchor
        )?;
        open_levels.push(heading.level);
    }
    Ok(())
}
