//! Outline checking for existing Markdown files.
//!
//! The checker assigns heading anchors with the same rules the renderer
//! uses and reports `#fragment` links that point nowhere.

pub mod issue;
mod structural;

use std::collections::HashSet;
use std::ops::Range;

pub use issue::{Issue, IssueKind};

use crate::render::slug::{AnchorRegistry, slugify};

/// A heading found in the checked source.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    /// Plain text with inline markup removed.
    pub text: String,
    pub anchor: String,
    pub span: Range<usize>,
}

/// A link to a heading in the same file.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentLink {
    pub fragment: String,
    pub span: Range<usize>,
}

/// Headings and intra-document links of a Markdown file.
#[derive(Debug, Clone)]
pub struct Outline {
    pub headings: Vec<Heading>,
    pub links: Vec<FragmentLink>,
    /// Non-fatal findings, such as skipped heading levels.
    pub warnings: Vec<Issue>,
    pub source_id: usize,
}

impl Outline {
    pub fn anchor_exists(&self, anchor: &str) -> bool {
        self.headings.iter().any(|h| h.anchor == anchor)
    }
}

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Build the outline. Fails with every diagnostic found if any link
    /// fragment does not resolve.
    pub fn parse(&self) -> Result<Outline, Vec<Issue>> {
        let (raw_headings, raw_links) = structural::scan(&self.source);

        let mut anchors = AnchorRegistry::new();
        let headings: Vec<Heading> = raw_headings
            .into_iter()
            .map(|h| Heading {
                anchor: anchors.assign(&h.text),
                level: h.level,
                text: h.text,
                span: h.span,
            })
            .collect();

        let links: Vec<FragmentLink> = raw_links
            .into_iter()
            .map(|l| FragmentLink {
                fragment: l.fragment,
                span: l.span,
            })
            .collect();

        let warnings = self.level_warnings(&headings);
        let errors = self.broken_links(&headings, &links);

        if errors.is_empty() {
            log::debug!(
                "outline: {} headings, {} fragment links",
                headings.len(),
                links.len()
            );
            Ok(Outline {
                headings,
                links,
                warnings,
                source_id: self.file_id,
            })
        } else {
            Err(errors.into_iter().chain(warnings).collect())
        }
    }

    fn level_warnings(&self, headings: &[Heading]) -> Vec<Issue> {
        headings
            .windows(2)
            .filter(|pair| pair[1].level > pair[0].level + 1)
            .map(|pair| {
                let kind = IssueKind::SkippedLevel {
                    from: pair[0].level,
                    to: pair[1].level,
                };
                Issue::new(kind, pair[1].span.clone(), self.file_id)
            })
            .collect()
    }

    fn broken_links(&self, headings: &[Heading], links: &[FragmentLink]) -> Vec<Issue> {
        let known: HashSet<&str> = headings.iter().map(|h| h.anchor.as_str()).collect();
        links
            .iter()
            .filter(|l| !l.fragment.is_empty() && !known.contains(l.fragment.as_str()))
            .map(|l| {
                let normalized = slugify(&l.fragment);
                let suggestion = known.contains(normalized.as_str()).then_some(normalized);
                let kind = IssueKind::BrokenLink {
                    fragment: l.fragment.clone(),
                    suggestion,
                };
                Issue::new(kind, l.span.clone(), self.file_id)
            })
            .collect()
    }
}
