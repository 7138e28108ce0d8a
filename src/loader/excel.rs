//! Spreadsheets

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::config::Config;
use crate::engine::{ColumnOptions, WriteOptions};
use crate::model::{CellValue, Table};

use super::Loader;

/// Loads one sheet of an `.xlsx`, `.xlsm`, `.xls` or `.ods` workbook
///
/// The sheet named in the config is used, or else the first one.
pub struct ExcelLoader;

impl Loader for ExcelLoader {
    fn load(&self, path: &Path, config: &Config) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open workbook {}", path.display()))?;

        let sheet = match &config.sheet_name {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .into_iter()
                .next()
                .context("Workbook has no sheets")?,
        };
        let range = workbook
            .worksheet_range(&sheet)
            .with_context(|| format!("Failed to read sheet {:?}", sheet))?;

        sheet_to_table(&range)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xlsx", "xlsm", "xls", "ods"]
    }
}

/// The first row names the columns. A blank name becomes `ColumnN` after
/// its 1-based position. An empty sheet is an empty table.
fn sheet_to_table(range: &Range<Data>) -> Result<Table> {
    let mut table = Table::new();
    let mut rows = range.rows();
    let Some(names) = rows.next() else {
        return Ok(table);
    };

    let headers = names.iter().enumerate().map(|(i, cell)| match sheet_cell(cell) {
        CellValue::Null => format!("Column{}", i + 1),
        named => named.display().into_owned(),
    });
    table.add_columns(headers, ColumnOptions::default().with_silent(true))?;

    let values = rows.map(|row| row.iter().map(sheet_cell).collect::<Vec<_>>());
    table.add_rows(values, WriteOptions::silent())?;

    Ok(table)
}

fn sheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => whole_number(*f).map_or(CellValue::Float(*f), CellValue::Int),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial dates render as "YYYY-MM-DD hh:mm:ss"; retype that text
        Data::DateTime(serial) => date_cell(&serial.to_string()),
        Data::DateTimeIso(s) => date_cell(s),
        Data::DurationIso(s) => CellValue::from(s.as_str()),
        Data::Error(e) => CellValue::from(format!("#{:?}", e)),
    }
}

/// Spreadsheets store every number as a float
fn whole_number(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn date_cell(text: &str) -> CellValue {
    let trimmed = text.split('.').next().unwrap_or(text);
    match super::parse_cell_value(trimmed) {
        cell @ (CellValue::Date(_) | CellValue::DateTime(_)) => cell,
        _ => CellValue::from(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_to_table() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("name".into()));
        range.set_value((1, 0), Data::String("rex".into()));
        range.set_value((1, 1), Data::Float(3.0));
        range.set_value((2, 0), Data::String("brian".into()));
        range.set_value((2, 1), Data::Float(2.5));

        let table = sheet_to_table(&range).unwrap();
        assert_eq!(table.column_headers(), vec!["name", "Column2"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.get_column("Column2").unwrap(),
            &[CellValue::Int(3), CellValue::Float(2.5)]
        );
    }

    #[test]
    fn test_empty_sheet() {
        let range: Range<Data> = Range::empty();
        let table = sheet_to_table(&range).unwrap();
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_sheet_cell() {
        assert_eq!(sheet_cell(&Data::Empty), CellValue::Null);
        assert_eq!(sheet_cell(&Data::String("  ".into())), CellValue::Null);
        assert_eq!(sheet_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert!(matches!(
            sheet_cell(&Data::DateTimeIso("2024-03-01T08:00:00".into())),
            CellValue::DateTime(_)
        ));
        assert_eq!(
            sheet_cell(&Data::DurationIso("PT1H".into())),
            CellValue::from("PT1H")
        );
    }
}
