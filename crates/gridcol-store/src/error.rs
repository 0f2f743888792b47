//! Error types for gridcol-store

use gridcol_core::CollectionKey;
use thiserror::Error;

/// Result type alias using [`StoreError`]
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in gridcol-store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Id not present in the named collection
    #[error("Column '{id}' not found in {collection:?}")]
    ColumnNotFound {
        id: String,
        collection: CollectionKey,
    },

    /// Reorder index outside the collection's current length
    #[error("Index {index} out of bounds (len: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Column-level validation failure (duplicate label/id, empty label, ...)
    #[error(transparent)]
    Column(#[from] gridcol_core::Error),

    /// Formula validation failure, including reference cycles
    #[error(transparent)]
    Formula(#[from] gridcol_formula::FormulaError),

    /// Snapshot backend I/O failure
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot encoding failure
    #[error("Snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
