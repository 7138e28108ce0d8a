//! Fixed-width text rendering

use std::io::Write;

use anyhow::Result;

use crate::model::{CellValue, Table};

use super::{TableRenderer, DEFAULT_COLUMN_WIDTH};

/// Plain text output
///
/// Every column is at least `column_width` characters wide, or as wide as
/// its header. Longer cells are cut and end in `...`; shorter ones are padded.
///
/// The layout follows the classic `print` output with one
/// difference: a cell exactly as wide as its column is printed as-is, where
/// the older output wrote `undefined` in its place. Output containing such a
/// cell is therefore not byte-identical to the older format.
pub struct TextOutput {
    column_width: usize,
}

impl TextOutput {
    pub fn new(column_width: usize) -> Self {
        Self { column_width }
    }

    /// Render to a string; a table with no columns renders as nothing
    pub fn render_string(&self, table: &Table) -> String {
        if table.column_count() == 0 {
            return String::new();
        }

        let widths: Vec<usize> = table
            .columns()
            .iter()
            .map(|c| c.header.chars().count().max(self.column_width))
            .collect();

        let mut out = String::from("\n");
        for (column, &width) in table.columns().iter().zip(&widths) {
            out.push_str(&pad(&column.header, width));
            out.push_str(" | ");
        }
        out.push('\n');

        for row in 0..table.row_count() {
            for (column, &width) in table.columns().iter().zip(&widths) {
                out.push_str(&fit(&cell_text(&column.data[row]), width));
                out.push_str(" | ");
            }
            out.push('\n');
        }
        out.push('\n');
        out
    }
}

impl Default for TextOutput {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_WIDTH)
    }
}

impl TableRenderer for TextOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        write!(writer, "{}", self.render_string(table))?;
        Ok(())
    }
}

/// Padding prints as `undefined`
fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Empty => "undefined".to_string(),
        other => other.display().into_owned(),
    }
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", s, " ".repeat(width.saturating_sub(len)))
}

fn fit(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        pad(s, width)
    }
}

impl Table {
    /// Render the table as fixed-width text
    pub fn print(&self) -> String {
        TextOutput::default().render_string(self)
    }
}
