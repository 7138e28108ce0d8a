//! Delimited text files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::config::Config;
use crate::engine::{ColumnOptions, WriteOptions};
use crate::model::{CellValue, Table};

use super::Loader;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Loads `.csv`, `.tsv` and `.txt` files with a header row
pub struct CsvLoader;

impl CsvLoader {
    /// Read delimited text from any reader
    ///
    /// Short lines leave their trailing columns padded; surplus fields are
    /// dropped. Repeated header names are renamed like any other collision.
    pub fn read<R: Read>(&self, reader: R, delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let mut table = Table::new();
        let headers = reader.headers().context("Failed to read header row")?;
        table.add_columns(headers.iter(), ColumnOptions::default().with_silent(true))?;

        let mut rows = Vec::new();
        for (i, line) in reader.records().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", i + 2))?;
            rows.push(line.iter().map(parse_cell_value).collect::<Vec<_>>());
        }
        table.add_rows(rows, WriteOptions::silent())?;

        Ok(table)
    }
}

impl Loader for CsvLoader {
    fn load(&self, path: &Path, _config: &Config) -> Result<Table> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let tab_separated = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));

        self.read(BufReader::new(file), if tab_separated { b'\t' } else { b',' })
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv", "tsv", "txt"]
    }
}

/// Type a text field
///
/// Blank, `null` and `NA` become `Null`; then booleans, integers, floats,
/// ISO dates and datetimes are tried in that order. Everything else is kept
/// as trimmed text. The CLI types `--where` values the same way so filters
/// compare like with like.
pub fn parse_cell_value(field: &str) -> CellValue {
    let field = field.trim();

    if field.is_empty() || field == "NA" || field.eq_ignore_ascii_case("null") {
        return CellValue::Null;
    }
    if let Some(b) = parse_bool(field) {
        return CellValue::Bool(b);
    }
    if let Ok(i) = field.parse::<i64>() {
        return CellValue::Int(i);
    }
    if let Ok(f) = field.parse::<f64>() {
        return CellValue::Float(f);
    }
    if let Ok(date) = NaiveDate::parse_from_str(field, "%Y-%m-%d") {
        return CellValue::Date(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(field, fmt).ok())
        .map_or_else(|| CellValue::from(field), CellValue::DateTime)
}

fn parse_bool(field: &str) -> Option<bool> {
    if field.eq_ignore_ascii_case("true") {
        Some(true)
    } else if field.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowFormat;

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value(""), CellValue::Null);
        assert_eq!(parse_cell_value("null"), CellValue::Null);
        assert_eq!(parse_cell_value("true"), CellValue::Bool(true));
        assert_eq!(parse_cell_value("FALSE"), CellValue::Bool(false));
        assert_eq!(parse_cell_value("42"), CellValue::Int(42));
        assert_eq!(parse_cell_value("3.5"), CellValue::Float(3.5));
        assert_eq!(
            parse_cell_value("2024-01-31"),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
        assert!(matches!(
            parse_cell_value("2024-01-31 12:30:00"),
            CellValue::DateTime(_)
        ));
        assert_eq!(parse_cell_value(" hello "), CellValue::from("hello"));
    }

    #[test]
    fn test_read() {
        let data = "name,color\nrex,red\nsnuffles,black\nbrian\n";
        let table = CsvLoader.read(data.as_bytes(), b',').unwrap();
        assert_eq!(table.column_headers(), vec!["name", "color"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.get_row(2, RowFormat::Values).as_values().unwrap(),
            &[CellValue::from("brian"), CellValue::Empty]
        );
    }

    #[test]
    fn test_tab_separated() {
        let data = "a\tb\n1\t2\n";
        let table = CsvLoader.read(data.as_bytes(), b'\t').unwrap();
        assert_eq!(table.values_at(0), vec![CellValue::Int(1), CellValue::Int(2)]);
    }

    #[test]
    fn test_repeated_headers_are_renamed() {
        let data = "id,id\n1,2\n";
        let table = CsvLoader.read(data.as_bytes(), b',').unwrap();
        assert_eq!(table.column_headers(), vec!["id-1", "id"]);
        assert_eq!(table.get_column("id").unwrap(), &[CellValue::Int(2)]);
    }
}
