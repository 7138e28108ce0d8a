//! Rendering tables for display

mod grid;
mod json;
mod text;

use std::io::{self, Write};

use anyhow::Result;

use crate::config::{Config, OutputFormat};
use crate::model::Table;

pub use grid::GridOutput;
pub use json::{cell_value_to_json, JsonOutput};
pub use text::TextOutput;

/// Minimum column width used by `print`
pub const DEFAULT_COLUMN_WIDTH: usize = 15;

/// Writes a whole table in one format
pub trait TableRenderer {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Renderer for the configured format
pub fn renderer_for(config: &Config) -> Box<dyn TableRenderer> {
    match config.output_format {
        OutputFormat::Grid => Box::new(GridOutput::new().with_color(config.color)),
        OutputFormat::Text => Box::new(TextOutput::new(config.column_width)),
        OutputFormat::Json => Box::new(JsonOutput::new()),
    }
}

pub fn render_to_stdout(table: &Table, config: &Config) -> Result<()> {
    let mut stdout = io::stdout().lock();
    renderer_for(config).render(table, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
