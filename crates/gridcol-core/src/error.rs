//! Error types for gridcol-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridcol-core
#[derive(Debug, Error)]
pub enum Error {
    /// Column label is empty or whitespace-only
    #[error("Column label must not be empty")]
    EmptyLabel,

    /// Another column already carries this label (case-insensitive)
    #[error("A column labelled '{0}' already exists")]
    DuplicateLabel(String),

    /// Another column already carries this id
    #[error("A column with id '{0}' already exists")]
    DuplicateId(String),

    /// List column saved without a single non-blank option
    #[error("List column requires at least one option")]
    EmptyListOptions,

    /// Precision outside the displayable range
    #[error("Precision {0} out of range (max: {1})")]
    PrecisionOutOfRange(u8, u8),
}
