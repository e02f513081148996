//! Markdown escaping and fence-length helpers.

/// Escape characters that would otherwise start Markdown syntax.
///
/// # Examples
///
/// ```
/// use mdgen::escape_markdown;
///
/// assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
/// assert_eq!(escape_markdown("[link]"), "\\[link\\]");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let mut chars = text.chars().peekable();
    let mut at_line_start = true;

    while let Some(c) = chars.next() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' | '|' | '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            '#' if at_line_start => result.push_str("\\#"),
            '!' if chars.peek() == Some(&'[') => result.push_str("\\!"),
            _ => result.push(c),
        }
        at_line_start = c == '\n';
    }

    result
}

/// Escape link text and reference labels. Only brackets and backslashes
/// can break out of `[...]`.
pub(crate) fn escape_brackets(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Format a link destination, switching to the `<...>` form when the raw
/// form would end early.
pub(crate) fn link_destination(target: &str) -> String {
    let needs_brackets = target.is_empty()
        || target
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'));
    if needs_brackets {
        let escaped = target.replace('<', "\\<").replace('>', "\\>");
        format!("<{}>", escaped)
    } else {
        target.to_string()
    }
}

/// Escape a table cell: pipes would split the cell and newlines would end
/// the row. Backslashes are doubled first so one before a pipe survives.
pub(crate) fn escape_table_cell(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        result.push_str(&line.trim().replace('\\', "\\\\").replace('|', "\\|"));
        if lines.peek().is_some() {
            result.push_str("<br>");
        }
    }
    result
}

/// Escape a leading block marker so `text` stays inline content when it
/// starts a line, e.g. inside a list item.
pub(crate) fn escape_line_start(text: &str) -> String {
    let text = text.trim_start();
    match text.chars().next() {
        Some('#' | '>' | '-' | '+' | '*' | '=' | '_' | '`' | '~' | '<' | '|') => {
            format!("\\{}", text)
        }
        Some(c) if c.is_ascii_digit() => {
            let digits = text.chars().take_while(char::is_ascii_digit).count();
            let rest = &text[digits..];
            if digits <= 9 && (rest.starts_with('.') || rest.starts_with(')')) {
                format!("{}\\{}", &text[..digits], rest)
            } else {
                text.to_string()
            }
        }
        _ => text.to_string(),
    }
}

/// Collapse line breaks into single spaces.
pub(crate) fn single_line(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Smallest fence (at least 3 characters) that does not appear as a run of
/// `fence_char` in `content`.
pub(crate) fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    longest_run(content, fence_char).max(2) + 1
}

/// Smallest backtick count that does not appear as a run in `content`.
pub(crate) fn calculate_inline_code_ticks(content: &str) -> usize {
    longest_run(content, '`') + 1
}

fn longest_run(content: &str, needle: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;
    for c in content.chars() {
        if c == needle {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }
    max_run
}
