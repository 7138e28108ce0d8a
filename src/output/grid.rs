//! Box-drawn grid output

use std::io::Write;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Ansi, ColorSpec, WriteColor};

use crate::model::Table;

use super::TableRenderer;

/// Grid output with an optional bold header
pub struct GridOutput {
    color: bool,
}

impl GridOutput {
    pub fn new() -> Self {
        Self { color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render to a string; a table with no columns renders as nothing
    pub fn render_string(&self, table: &Table) -> String {
        if table.column_count() == 0 {
            return String::new();
        }

        let mut builder = Builder::default();
        builder.push_record(table.column_headers());
        for row in 0..table.row_count() {
            builder.push_record(
                table
                    .columns()
                    .iter()
                    .map(|c| c.data[row].display().into_owned()),
            );
        }

        let mut grid = builder.build();
        grid.with(Style::modern());
        let mut out = grid.to_string();
        out.push('\n');
        out
    }
}

impl Default for GridOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer for GridOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let rendered = self.render_string(table);
        if !self.color {
            write!(writer, "{}", rendered)?;
            return Ok(());
        }

        // Line 0 is the top border, line 1 the header
        let mut ansi = Ansi::new(writer);
        for (i, line) in rendered.lines().enumerate() {
            if i == 1 {
                ansi.set_color(ColorSpec::new().set_bold(true))?;
                write!(ansi, "{}", line)?;
                ansi.reset()?;
                writeln!(ansi)?;
            } else {
                writeln!(ansi, "{}", line)?;
            }
        }
        Ok(())
    }
}
