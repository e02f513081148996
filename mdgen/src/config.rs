//! Rendering options shared by every block renderer.

const MIN_INDENT: usize = 2;
const MAX_INDENT: usize = 5;

/// Options controlling how a [`Document`](crate::Document) is serialized.
///
/// # Examples
///
/// ```
/// use mdgen::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with_indent(2)
///     .with_default_code_language("rust")
///     .with_bullet('*');
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level in lists and tables of contents.
    pub indent: usize,
    /// Fence info string used when a code block is appended without one.
    pub default_code_language: String,
    /// Marker for bullet lists and table-of-contents entries.
    pub bullet: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            default_code_language: "text".to_string(),
            bullet: '-',
        }
    }
}

impl RenderOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indent unit, clamped to `2..=5`. A nested item must start
    /// within three columns of its parent's content, or it is read as code.
    #[inline]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.clamp(MIN_INDENT, MAX_INDENT);
        self
    }

    #[inline]
    pub fn with_default_code_language(mut self, language: impl Into<String>) -> Self {
        self.default_code_language = language.into();
        self
    }

    /// Set the bullet marker. Anything other than `-`, `*` or `+` falls back
    /// to `-`.
    #[inline]
    pub fn with_bullet(mut self, bullet: char) -> Self {
        self.bullet = match bullet {
            '-' | '*' | '+' => bullet,
            _ => '-',
        };
        self
    }

    /// The indent unit actually used, for options built by assigning
    /// `indent` directly.
    pub(crate) fn indent_unit(&self) -> usize {
        self.indent.clamp(MIN_INDENT, MAX_INDENT)
    }

    pub(crate) fn indent_str(&self, depth: usize) -> String {
        " ".repeat(self.indent_unit() * depth)
    }
}
