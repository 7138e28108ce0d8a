//! Building tables from files on disk
//!
//! Each loader fills its table with silent inserts, so a freshly loaded
//! table has the same shape guarantees as one built by hand and no
//! callbacks have run.

mod csv;
mod excel;
mod json;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::model::Table;

pub use self::csv::{parse_cell_value, CsvLoader};
pub use self::excel::ExcelLoader;
pub use self::json::JsonLoader;

/// A source of tables for one family of file formats
pub trait Loader: Send + Sync {
    /// Read `path` into a new table
    fn load(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Lower-case file extensions this loader reads
    fn extensions(&self) -> &'static [&'static str];
}

/// Picks a loader by file extension, or by content when there is none
pub struct Loaders {
    loaders: Vec<Box<dyn Loader>>,
}

impl Default for Loaders {
    fn default() -> Self {
        Self::new()
    }
}

impl Loaders {
    pub fn new() -> Self {
        Self {
            loaders: vec![Box::new(CsvLoader), Box::new(JsonLoader), Box::new(ExcelLoader)],
        }
    }

    /// Loader responsible for `path`
    pub fn for_path(&self, path: &Path) -> Result<&dyn Loader> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => sniff_format(path).to_string(),
        };

        self.loaders
            .iter()
            .find(|loader| loader.extensions().contains(&format.as_str()))
            .map(|loader| loader.as_ref())
            .ok_or_else(|| anyhow!("No loader for .{} files", format))
    }

    /// Load `path` with whichever loader handles it
    pub fn load(&self, path: &Path, config: &Config) -> Result<Table> {
        let table = self.for_path(path)?.load(path, config)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        Ok(table)
    }
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0";

/// Guess a format from the first bytes of a file
///
/// Spreadsheets are recognised by their container magic, JSON by a leading
/// bracket or brace. Anything else, including an unreadable file, is
/// treated as CSV.
pub fn sniff_format(path: &Path) -> &'static str {
    let mut head = [0u8; 512];
    let read = File::open(path)
        .and_then(|mut file| file.read(&mut head))
        .unwrap_or(0);
    let head = &head[..read];

    if head.starts_with(ZIP_MAGIC) {
        "xlsx"
    } else if head.starts_with(OLE_MAGIC) {
        "xls"
    } else if matches!(
        head.iter().find(|b| !b.is_ascii_whitespace()),
        Some(b'[') | Some(b'{')
    ) {
        "json"
    } else {
        "csv"
    }
}
