//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while building, parsing or evaluating a formula
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Expression parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Formula draft submitted without an initial operand column
    #[error("Formula is missing its initial operand column")]
    MissingInitialOperand,

    /// Formula part submitted without an operand column
    #[error("Formula part {index} is missing its operand column")]
    MissingOperand { index: usize },

    /// Part index outside the draft's current part list
    #[error("Part index {index} out of bounds (len: {len})")]
    PartOutOfBounds { index: usize, len: usize },

    /// Saving this formula would create a reference cycle
    #[error("Circular reference detected involving column '{0}'")]
    CircularReference(String),

    /// Column-level validation failure
    #[error(transparent)]
    Column(#[from] gridcol_core::Error),
}
