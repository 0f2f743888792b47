//! # gridcol-core
//!
//! Core data structures for the gridcol table-column configurator.
//!
//! This crate provides the fundamental types used throughout gridcol:
//! - [`Column`] - One configurable field of the displayed table
//! - [`ColumnKind`] - The typed payload of a user-defined column
//! - [`Currency`] - Currency codes and display symbols
//! - [`CollectionKey`] - Identifies which of the three stored column
//!   sequences an operation targets
//!
//! ## Example
//!
//! ```rust
//! use gridcol_core::{Column, ColumnKind};
//!
//! let primary = gridcol_core::default_primary();
//! assert!(primary.iter().any(|c| c.id == "area"));
//!
//! let custom = Column::new_custom(
//!     "custom_1".into(),
//!     "Скидка".into(),
//!     ColumnKind::Numeric { precision: 2 },
//! );
//! assert!(custom.custom);
//! ```

pub mod catalog;
pub mod column;
pub mod error;
pub mod formula;

// Re-exports for convenience
pub use catalog::{default_primary, default_secondary};
pub use column::{CollectionKey, Column, ColumnKind, Currency};
pub use error::{Error, Result};
pub use formula::{FormulaConfig, FormulaPart, Operator, OutputType};

/// Maximum number of fractional digits a Numeric/Formula column may display
pub const MAX_PRECISION: u8 = 10;

/// Fractional digits used when a column does not configure any
pub const DEFAULT_PRECISION: u8 = 2;
