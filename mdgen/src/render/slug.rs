//! Heading anchors.
//!
//! Slugs follow the convention used by GitHub and most Markdown renderers:
//! lowercase, spaces become hyphens, anything that is not alphanumeric,
//! `-` or `_` is dropped. Repeats get a numeric suffix in order of
//! appearance.

use std::collections::HashMap;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Derive an anchor slug from plain heading text.
///
/// ```
/// use mdgen::render::slug::slugify;
///
/// assert_eq!(slugify("Create Markdown files"), "create-markdown-files");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c.to_lowercase().collect::<String>())
            } else if c == ' ' {
                Some("-".to_string())
            } else {
                None
            }
        })
        .collect()
}

/// The text a renderer sees in a heading written as `source`, with inline
/// markup removed.
pub fn heading_plain_text(source: &str) -> String {
    let markdown = format!("# {}", source);
    let mut text = String::new();
    let mut in_heading = false;
    for event in Parser::new(&markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_heading => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Hands out unique anchors in document order.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    occurrences: HashMap<String, usize>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor for the next heading with plain text `text`.
    pub fn assign(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();
        while self.occurrences.contains_key(&slug) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{}-{}", base, count);
        }
        self.occurrences.insert(slug.clone(), 0);
        slug
    }
}
