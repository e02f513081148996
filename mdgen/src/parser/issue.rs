use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// A `#fragment` link that matches no heading anchor.
    BrokenLink {
        fragment: String,
        /// An existing anchor the fragment slugifies to, if any.
        suggestion: Option<String>,
    },
    /// A heading more than one level deeper than the heading before it.
    SkippedLevel { from: u8, to: u8 },
}

/// A problem found while checking a Markdown file, located by byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: IssueKind,
    pub span: Range<usize>,
    pub file_id: usize,
}

impl Issue {
    pub fn new(kind: IssueKind, span: Range<usize>, file_id: usize) -> Self {
        Issue {
            kind,
            span,
            file_id,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            IssueKind::BrokenLink { .. } => Severity::Error,
            IssueKind::SkippedLevel { .. } => Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() >= Severity::Error
    }

    pub fn notes(&self) -> Vec<String> {
        match &self.kind {
            IssueKind::BrokenLink {
                suggestion: Some(anchor),
                ..
            } => vec![format!("did you mean `#{}`?", anchor)],
            _ => Vec::new(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(self.severity())
            .with_message(self.to_string())
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes())
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::BrokenLink { fragment, .. } => {
                write!(f, "link target `#{}` does not match any heading", fragment)
            }
            IssueKind::SkippedLevel { from, to } => {
                write!(f, "heading level jumps from h{} to h{}", from, to)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken(suggestion: Option<&str>) -> Issue {
        Issue::new(
            IssueKind::BrokenLink {
                fragment: "Overview".to_string(),
                suggestion: suggestion.map(str::to_string),
            },
            3..7,
            2,
        )
    }

    #[test]
    fn test_severity_follows_kind() {
        assert!(broken(None).is_error());
        let skipped = Issue::new(IssueKind::SkippedLevel { from: 1, to: 3 }, 0..1, 0);
        assert!(!skipped.is_error());
        assert_eq!(skipped.to_string(), "heading level jumps from h1 to h3");
    }

    #[test]
    fn test_diagnostic_carries_suggestion() {
        let diagnostic = broken(Some("overview")).to_diagnostic();
        assert_eq!(diagnostic.message, "link target `#Overview` does not match any heading");
        assert_eq!(diagnostic.notes, vec!["did you mean `#overview`?".to_string()]);
        assert_eq!(diagnostic.labels[0].file_id, 2);
        assert_eq!(diagnostic.labels[0].range, 3..7);
    }

    #[test]
    fn test_no_note_without_suggestion() {
        assert!(broken(None).to_diagnostic().notes.is_empty());
    }
}
