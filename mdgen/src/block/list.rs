use std::fmt;

use crate::config::RenderOptions;
use crate::error::{DocumentError, Result};
use crate::render::escape::{escape_line_start, single_line};

/// One element of a nested list as supplied by the caller.
///
/// A `Nested` sequence belongs to the `Item` immediately before it:
///
/// ```text
/// [Item("4"), Nested([Item("4.1")]), Item("5")]
/// ```
///
/// renders `4.1` as a child of `4`, and `5` back at the outer level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Item(String),
    Nested(Vec<ListEntry>),
}

impl ListEntry {
    pub fn item(text: impl Into<String>) -> Self {
        ListEntry::Item(text.into())
    }

    pub fn nested(entries: impl IntoIterator<Item = ListEntry>) -> Self {
        ListEntry::Nested(entries.into_iter().collect())
    }
}

impl From<&str> for ListEntry {
    fn from(text: &str) -> Self {
        ListEntry::Item(text.to_string())
    }
}

impl From<String> for ListEntry {
    fn from(text: String) -> Self {
        ListEntry::Item(text)
    }
}

impl<T: Into<ListEntry>> From<Vec<T>> for ListEntry {
    fn from(entries: Vec<T>) -> Self {
        ListEntry::Nested(entries.into_iter().map(Into::into).collect())
    }
}

/// A list item with its children, after parent association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub text: String,
    pub children: Vec<ListNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Uses [`RenderOptions::bullet`] as the marker.
    Bullet,
    /// `1.`, `2.`, ... restarting at every nesting level.
    Ordered,
    /// Task list items: `- [ ]` or `- [x]`.
    Checkbox { checked: bool },
}

/// A validated list tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub items: Vec<ListNode>,
    pub style: ListStyle,
}

impl List {
    /// Resolve `entries` into a tree.
    ///
    /// Fails if `entries` is empty, if any nested sequence is empty, or if a
    /// nested sequence is not directly preceded by an item at its own level.
    pub fn from_entries(entries: &[ListEntry], style: ListStyle) -> Result<Self> {
        if entries.is_empty() {
            return Err(DocumentError::invalid("list must contain at least one item"));
        }
        let items = build_nodes(entries, &mut Vec::new())?;
        Ok(List { items, style })
    }

    /// Number of items at every depth; one rendered line each.
    pub fn item_count(&self) -> usize {
        fn count(nodes: &[ListNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.items)
    }

    pub(crate) fn fmt_with(
        &self,
        f: &mut fmt::Formatter<'_>,
        options: &RenderOptions,
    ) -> fmt::Result {
        write_nodes(f, &self.items, 0, self.style, options)
    }
}

/// `path` holds the index of each enclosing entry, for error messages.
fn build_nodes(entries: &[ListEntry], path: &mut Vec<usize>) -> Result<Vec<ListNode>> {
    let mut nodes: Vec<ListNode> = Vec::new();
    let mut parent_open = false;

    for (idx, entry) in entries.iter().enumerate() {
        match entry {
            ListEntry::Item(text) => {
                nodes.push(ListNode {
                    text: text.clone(),
                    children: Vec::new(),
                });
                parent_open = true;
            }
            ListEntry::Nested(children) => {
                path.push(idx);
                let position = describe(path);
                let parent = match nodes.last_mut() {
                    Some(parent) if parent_open => parent,
                    _ => {
                        return Err(DocumentError::invalid(format!(
                            "nested list at {} has no preceding item",
                            position
                        )));
                    }
                };
                if children.is_empty() {
                    return Err(DocumentError::invalid(format!(
                        "nested list at {} is empty",
                        position
                    )));
                }
                parent.children = build_nodes(children, path)?;
                path.pop();
                parent_open = false;
            }
        }
    }

    Ok(nodes)
}

fn describe(path: &[usize]) -> String {
    let parts: Vec<String> = path.iter().map(|i| format!("[{}]", i)).collect();
    format!("items{}", parts.concat())
}

fn write_nodes(
    f: &mut fmt::Formatter<'_>,
    nodes: &[ListNode],
    indent: usize,
    style: ListStyle,
    options: &RenderOptions,
) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        let marker = match style {
            ListStyle::Bullet => options.bullet.to_string(),
            ListStyle::Ordered => format!("{}.", i + 1),
            ListStyle::Checkbox { checked } => {
                format!("{} [{}]", options.bullet, if checked { 'x' } else { ' ' })
            }
        };
        let text = escape_line_start(&single_line(&node.text));
        writeln!(f, "{}{} {}", " ".repeat(indent), marker, text)?;

        if !node.children.is_empty() {
            // Children must start at or past the parent's content column.
            let content_width = match style {
                ListStyle::Ordered => marker.len() + 1,
                _ => 2,
            };
            let step = options.indent_unit().max(content_width);
            write_nodes(f, &node.children, indent + step, style, options)?;
        }
    }
    Ok(())
}
