//! JSON documents

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::engine::{ColumnOptions, WriteOptions};
use crate::model::{CellValue, RowInput, Table};

use super::Loader;

/// Loads `.json` files
///
/// The document is an array of rows or a single object. A row is an object
/// (keys in document order) or an array of values. When the first row is an
/// array it names the columns instead.
pub struct JsonLoader;

impl JsonLoader {
    /// Read a JSON document from text
    pub fn read_str(&self, text: &str) -> Result<Table> {
        let document: Value = serde_json::from_str(text).context("Invalid JSON")?;
        build_table(document)
    }
}

impl Loader for JsonLoader {
    fn load(&self, path: &Path, _config: &Config) -> Result<Table> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.read_str(&text)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }
}

fn build_table(document: Value) -> Result<Table> {
    let mut items = match document {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => bail!("Expected an array or an object, found {}", kind_of(&other)),
    };

    let mut table = Table::new();
    if let Some(Value::Array(names)) = items.first() {
        let headers: Vec<String> = names.iter().map(|n| to_cell(n).display().into_owned()).collect();
        table.add_columns(headers, ColumnOptions::default().with_silent(true))?;
        items.remove(0);
    }

    let rows = items.into_iter().map(|item| match item {
        Value::Object(fields) => RowInput::Record(
            fields.into_iter().map(|(k, v)| (k, to_cell(&v))).collect(),
        ),
        Value::Array(values) => RowInput::Values(values.iter().map(to_cell).collect()),
        scalar => RowInput::Values(vec![to_cell(&scalar)]),
    });
    table.add_rows(rows, WriteOptions::silent())?;

    Ok(table)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// JSON value to cell. Arrays become lists; nested objects stay JSON text.
fn to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n
            .as_i64()
            .map(CellValue::Int)
            .or_else(|| n.as_f64().map(CellValue::Float))
            .unwrap_or_else(|| CellValue::from(n.to_string())),
        Value::String(s) => string_cell(s),
        Value::Array(items) => CellValue::List(items.iter().map(to_cell).collect()),
        Value::Object(fields) => CellValue::from(object_text(fields)),
    }
}

// Dates are recognised; anything else in a string stays text, even "42".
fn string_cell(s: &str) -> CellValue {
    match super::parse_cell_value(s) {
        cell @ (CellValue::Date(_) | CellValue::DateTime(_)) => cell,
        _ => CellValue::from(s),
    }
}

fn object_text(fields: &Map<String, Value>) -> String {
    serde_json::to_string(fields).unwrap_or_default()
}
