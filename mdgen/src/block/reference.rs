use crate::error::{DocumentError, Result};

/// Reference-style link definitions, in order of first use.
///
/// Links and images share one tag namespace. Tags compare the way Markdown
/// matches link labels: case-insensitively, with inner whitespace collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceRegistry {
    definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Definition {
    tag: String,
    key: String,
    target: String,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `tag` to `target`.
    ///
    /// Rebinding a tag to the same target is a no-op; rebinding it to a
    /// different target fails.
    pub fn bind(&mut self, tag: &str, target: &str) -> Result<()> {
        let key = normalize_label(tag);
        if key.is_empty() {
            return Err(DocumentError::invalid("reference tag must not be empty"));
        }
        if let Some(existing) = self.definitions.iter().find(|d| d.key == key) {
            if existing.target == target {
                return Ok(());
            }
            return Err(DocumentError::invalid(format!(
                "reference tag '{}' already points to '{}', cannot rebind to '{}'",
                tag, existing.target, target
            )));
        }
        self.definitions.push(Definition {
            tag: tag.trim().to_string(),
            key,
            target: target.to_string(),
        });
        Ok(())
    }

    pub fn target(&self, tag: &str) -> Option<&str> {
        let key = normalize_label(tag);
        self.definitions
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.target.as_str())
    }

    /// `(tag, target)` pairs in order of first binding.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.definitions
            .iter()
            .map(|d| (d.tag.as_str(), d.target.as_str()))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn normalize_label(tag: &str) -> String {
    tag.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
