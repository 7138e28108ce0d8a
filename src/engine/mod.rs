//! Operations on tables

mod insert;
pub mod join;
mod mutate;
pub mod notify;
mod predicate;

pub use join::{compute_join, JoinEngine, JoinKind};
pub use notify::{ChangeEvent, ChangeKind, UPDATE_EVENT};
pub use predicate::Predicate;

/// Options shared by every row mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Skip `update` callbacks for this call
    pub silent: bool,
}

impl WriteOptions {
    /// Options that suppress callbacks
    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// How a column add treats a header that is already taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateHeaders {
    /// Append anyway; the cleaning pass renames the collision
    #[default]
    Rename,
    /// Skip headers that already exist
    Ignore,
    /// Fail the whole call
    Reject,
}

/// Options for adding columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnOptions {
    pub duplicates: DuplicateHeaders,
    pub silent: bool,
}

impl ColumnOptions {
    pub fn ignore_duplicates() -> Self {
        Self {
            duplicates: DuplicateHeaders::Ignore,
            ..Default::default()
        }
    }

    pub fn reject_duplicates() -> Self {
        Self {
            duplicates: DuplicateHeaders::Reject,
            ..Default::default()
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}
