use std::fmt;

/// Inline emphasis applied to a whole paragraph or line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl Emphasis {
    pub const NONE: Emphasis = Emphasis {
        bold: false,
        italic: false,
        code: false,
    };

    /// Parse a compact flag string such as `"bi"` or `"bic"`.
    ///
    /// `b` selects bold, `i` italic and `c` inline code. Unknown letters are
    /// ignored.
    pub fn from_flags(flags: &str) -> Self {
        Emphasis {
            bold: flags.contains('b'),
            italic: flags.contains('i'),
            code: flags.contains('c'),
        }
    }

    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.code
    }
}

/// Horizontal alignment for a paragraph or line, emitted as an HTML wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A run of text with optional emphasis, color and alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
    pub emphasis: Emphasis,
    pub color: Option<String>,
    pub align: Option<TextAlign>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        TextBlock {
            text: text.into(),
            emphasis: Emphasis::NONE,
            color: None,
            align: None,
        }
    }

    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Color names are passed through verbatim; no palette is enforced.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.color = if color.is_empty() { None } else { Some(color) };
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = Some(align);
        self
    }
}

impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Markdown is not interpreted inside an HTML block, so aligned text
        // switches to HTML emphasis tags.
        let styled = match self.align {
            Some(_) => html_emphasis(&self.text, self.emphasis),
            None => markdown_emphasis(&self.text, self.emphasis),
        };
        let colored = match &self.color {
            Some(color) => format!("<font color=\"{}\">{}</font>", color, styled),
            None => styled,
        };
        match self.align {
            Some(align) => write!(f, "<p align=\"{}\">{}</p>", align.as_str(), colored),
            None => write!(f, "{}", colored),
        }
    }
}

fn markdown_emphasis(text: &str, emphasis: Emphasis) -> String {
    let mut out = text.to_string();
    if emphasis.code {
        let ticks = "`".repeat(crate::render::escape::calculate_inline_code_ticks(&out));
        let pad = if out.starts_with('`') || out.ends_with('`') {
            " "
        } else {
            ""
        };
        out = format!("{ticks}{pad}{out}{pad}{ticks}");
    }
    if emphasis.italic {
        out = format!("*{}*", out);
    }
    if emphasis.bold {
        out = format!("**{}**", out);
    }
    out
}

fn html_emphasis(text: &str, emphasis: Emphasis) -> String {
    let mut out = text.to_string();
    if emphasis.code {
        out = format!("<code>{}</code>", out);
    }
    if emphasis.italic {
        out = format!("<i>{}</i>", out);
    }
    if emphasis.bold {
        out = format!("<b>{}</b>", out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_from_flags() {
        assert_eq!(
            Emphasis::from_flags("bi"),
            Emphasis {
                bold: true,
                italic: true,
                code: false
            }
        );
        assert!(Emphasis::from_flags("").is_plain());
        assert!(Emphasis::from_flags("xyz").is_plain());
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(TextBlock::new("hello").to_string(), "hello");
    }

    #[test]
    fn test_bold_italic_code_nesting() {
        let block = TextBlock::new("x").with_emphasis(Emphasis::from_flags("bic"));
        assert_eq!(block.to_string(), "***`x`***");
    }

    #[test]
    fn test_code_with_backticks() {
        let block = TextBlock::new("a ` b").with_emphasis(Emphasis::from_flags("c"));
        assert_eq!(block.to_string(), "``a ` b``");
    }

    #[test]
    fn test_color() {
        let block = TextBlock::new("Text color").with_color("green");
        assert_eq!(block.to_string(), "<font color=\"green\">Text color</font>");
    }

    #[test]
    fn test_empty_color_is_ignored() {
        assert_eq!(TextBlock::new("t").with_color("").color, None);
    }

    #[test]
    fn test_aligned_uses_html_emphasis() {
        let block = TextBlock::new("Align")
            .with_emphasis(Emphasis::from_flags("b"))
            .with_align(TextAlign::Center);
        assert_eq!(block.to_string(), "<p align=\"center\"><b>Align</b></p>");
    }
}
