//! Columns and cell type inference

use serde::{Deserialize, Serialize};

use super::cell::CellValue;

/// Inferred cell type for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Null,
    Bool,
    Int,
    Float,
    String,
    Date,
    DateTime,
    List,
    Mixed,
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Null
    }
}

impl CellType {
    /// Type of a single cell. Padding counts as `Null`.
    pub fn of(value: &CellValue) -> CellType {
        match value {
            CellValue::Null | CellValue::Empty => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
            CellValue::List(_) => CellType::List,
        }
    }

    /// Widen the type to accommodate another type
    pub fn widen(self, other: CellType) -> CellType {
        if self == other {
            return self;
        }

        match (self, other) {
            (CellType::Null, t) | (t, CellType::Null) => t,
            (CellType::Int, CellType::Float) | (CellType::Float, CellType::Int) => CellType::Float,
            (CellType::Date, CellType::DateTime) | (CellType::DateTime, CellType::Date) => {
                CellType::DateTime
            }
            _ => CellType::Mixed,
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellType::Null => write!(f, "null"),
            CellType::Bool => write!(f, "bool"),
            CellType::Int => write!(f, "int"),
            CellType::Float => write!(f, "float"),
            CellType::String => write!(f, "string"),
            CellType::Date => write!(f, "date"),
            CellType::DateTime => write!(f, "datetime"),
            CellType::List => write!(f, "list"),
            CellType::Mixed => write!(f, "mixed"),
        }
    }
}

/// A named column of cells
///
/// Every column of a table holds the same number of cells; the cell at
/// position `i` of each column together form row `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Display and query name
    pub header: String,
    /// Cell values in row order
    pub data: Vec<CellValue>,
}

impl Column {
    /// Create an empty column
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            data: Vec::new(),
        }
    }

    /// Create a column already padded to `len` rows
    pub fn padded(header: impl Into<String>, len: usize) -> Self {
        Self {
            header: header.into(),
            data: vec![CellValue::Empty; len],
        }
    }

    /// Number of cells held
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Right-pad with the empty marker up to `len` cells
    pub(crate) fn pad_to(&mut self, len: usize) {
        if self.data.len() < len {
            self.data.resize(len, CellValue::Empty);
        }
    }

    /// Infer the widest type over every cell
    pub fn inferred_type(&self) -> CellType {
        self.data
            .iter()
            .fold(CellType::Null, |acc, cell| acc.widen(CellType::of(cell)))
    }
}
