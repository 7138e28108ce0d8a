//! Error types for table operations

use thiserror::Error;

/// Failures raised by the table engine
///
/// Only schema violations are errors. Anything missing or out of range
/// produces an empty result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A header was supplied twice, or already exists, under a policy that forbids it
    #[error("duplicate column header: {header}")]
    DuplicateHeaders { header: String },

    /// A cell-pair row named the same header twice
    #[error("can't add a row with duplicate headers: {header}")]
    DuplicateRowHeaders { header: String },
}

pub type Result<T> = std::result::Result<T, TableError>;
