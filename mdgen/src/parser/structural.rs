use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser as CmarkParser, Tag, TagEnd};

// ---------------------------------------------------------------------------
// Raw outline items
// ---------------------------------------------------------------------------

/// A heading as found in the source, before anchors are assigned.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct RawHeading {
    pub level: u8,
    pub text: String,
    pub span: Range<usize>,
}

/// A link whose destination is a `#fragment` in the same file.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct RawFragmentLink {
    pub fragment: String,
    pub span: Range<usize>,
}

// ---------------------------------------------------------------------------
// Event walk
// ---------------------------------------------------------------------------

/// Collect headings and intra-document links from Markdown source.
pub(super) fn scan(source: &str) -> (Vec<RawHeading>, Vec<RawFragmentLink>) {
    let options =
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
    let parser = CmarkParser::new_ext(source, options);

    let mut headings = Vec::new();
    let mut links = Vec::new();
    let mut current: Option<RawHeading> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(RawHeading {
                    level: heading_level_to_u8(level),
                    text: String::new(),
                    span: range,
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    headings.push(heading);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push(' ');
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(fragment) = dest_url.strip_prefix('#') {
                    links.push(RawFragmentLink {
                        fragment: fragment.to_string(),
                        span: range,
                    });
                }
            }
            _ => {}
        }
    }

    (headings, links)
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
