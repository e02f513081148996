use std::fmt;

use crate::error::{DocumentError, Result};
use crate::render::escape::escape_table_cell;

/// Column alignment, applied to every column of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl ColumnAlignment {
    /// The separator-row cell for this alignment.
    pub fn marker(&self) -> &'static str {
        match self {
            ColumnAlignment::None => "---",
            ColumnAlignment::Left => ":---",
            ColumnAlignment::Center => ":---:",
            ColumnAlignment::Right => "---:",
        }
    }
}

/// A pipe table built from a flat, row-major cell sequence.
///
/// The first `columns` cells form the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: usize,
    rows: usize,
    cells: Vec<String>,
    alignment: ColumnAlignment,
}

impl Table {
    pub fn new(
        cells: Vec<String>,
        columns: usize,
        rows: usize,
        alignment: ColumnAlignment,
    ) -> Result<Self> {
        if columns < 1 {
            return Err(DocumentError::invalid("table needs at least one column"));
        }
        if rows < 1 {
            return Err(DocumentError::invalid("table needs at least one row"));
        }
        let expected = columns.checked_mul(rows).ok_or_else(|| {
            DocumentError::invalid(format!("table of {} x {} cells is too large", columns, rows))
        })?;
        if cells.len() != expected {
            return Err(DocumentError::invalid(format!(
                "table of {} columns x {} rows needs {} cells, got {}",
                columns,
                rows,
                expected,
                cells.len()
            )));
        }
        Ok(Table {
            columns,
            rows,
            cells,
            alignment,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn alignment(&self) -> ColumnAlignment {
        self.alignment
    }

    /// Row `index` (0 is the header).
    pub fn row(&self, index: usize) -> Option<&[String]> {
        let start = index.checked_mul(self.columns)?;
        self.cells.get(start..start.checked_add(self.columns)?)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.columns).enumerate() {
            write_row(f, row.iter().map(|cell| escape_table_cell(cell)))?;
            if i == 0 {
                write_row(f, (0..self.columns).map(|_| self.alignment.marker().to_string()))?;
            }
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: impl Iterator<Item = String>) -> fmt::Result {
    write!(f, "|")?;
    for cell in cells {
        write!(f, " {} |", cell)?;
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_centered() {
        let table = Table::new(
            cells(&["A", "B", "C", "D", "E", "F"]),
            3,
            2,
            ColumnAlignment::Center,
        )
        .unwrap();
        assert_eq!(
            table.to_string(),
            "| A | B | C |\n| :---: | :---: | :---: |\n| D | E | F |\n"
        );
    }

    #[test]
    fn test_alignment_markers() {
        assert_eq!(ColumnAlignment::None.marker(), "---");
        assert_eq!(ColumnAlignment::Left.marker(), ":---");
        assert_eq!(ColumnAlignment::Right.marker(), "---:");
    }

    #[test]
    fn test_header_only_table() {
        let table = Table::new(cells(&["x", "y"]), 2, 1, ColumnAlignment::Left).unwrap();
        assert_eq!(table.to_string(), "| x | y |\n| :--- | :--- |\n");
    }

    #[test]
    fn test_pipe_in_cell_is_escaped() {
        let table = Table::new(cells(&["a|b", "c"]), 2, 1, ColumnAlignment::None).unwrap();
        assert!(table.to_string().starts_with("| a\\|b | c |\n"));
    }

    #[test]
    fn test_row_access() {
        let table =
            Table::new(cells(&["h1", "h2", "a", "b"]), 2, 2, ColumnAlignment::None).unwrap();
        assert_eq!(table.row(1), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Table::new(cells(&["a", "b", "c"]), 2, 2, ColumnAlignment::None).unwrap_err();
        assert!(err.to_string().contains("needs 4 cells, got 3"));
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(Table::new(Vec::new(), 0, 1, ColumnAlignment::None).is_err());
        assert!(Table::new(Vec::new(), 1, 0, ColumnAlignment::None).is_err());
    }
}
