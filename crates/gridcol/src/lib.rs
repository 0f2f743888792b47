//! # gridcol
//!
//! Table-column configuration for a catalog product: choose which columns a
//! spreadsheet-like view shows, reorder them, mark favorites, and define
//! custom columns — including columns whose value is computed per row by a
//! small user-authored arithmetic formula over other columns.
//!
//! ## Example
//!
//! ```rust
//! use gridcol::prelude::*;
//!
//! // Load the column collections (defaults, since the backend is empty)
//! let mut store = ColumnStore::load(MemoryStore::new()).unwrap();
//!
//! // Define a formula column: area * price_m2, shown as currency
//! let mut builder = CustomColumnBuilder::new();
//! builder.set_label("Стоимость (расчёт)");
//! builder.set_kind(CustomColumnKind::Formula);
//! builder.formula_mut().set_initial("area");
//! let part = builder.formula_mut().add_part();
//! builder.formula_mut().set_operator(part, Operator::Mul).unwrap();
//! builder.formula_mut().set_operand(part, "price_m2").unwrap();
//! builder.formula_mut().set_output_type(OutputType::Currency);
//!
//! let existing: Vec<Column> = store.columns().cloned().collect();
//! let column = builder.finish(&existing).unwrap();
//! let id = column.id.clone();
//! store.add_custom(column).unwrap();
//!
//! // Evaluate it for one row
//! let mut row = RowValues::new();
//! row.insert("area".into(), RowValue::Number(45.0));
//! row.insert("price_m2".into(), RowValue::Number(100_000.0));
//! assert_eq!(store.evaluate_cell(&id, &row).unwrap(), "4 500 000,00 ₽");
//! ```

pub mod evaluate;
pub mod prelude;

// Re-export evaluation extension
pub use evaluate::StoreEvaluateExt;

// Re-export core types
pub use gridcol_core::{
    default_primary, default_secondary, CollectionKey, Column, ColumnKind, Currency,
    Error as ColumnError, FormulaConfig, FormulaPart, Operator, OutputType, DEFAULT_PRECISION,
    MAX_PRECISION,
};

// Re-export formula types
pub use gridcol_formula::{
    coerce_number, evaluate_column, evaluate_config, format_number, format_output,
    parse_expression, render_expression, would_create_cycle, CustomColumnBuilder,
    CustomColumnKind, Expr, FormulaBuilder, FormulaError, NumberLocale, ReferenceGraph, RowValue,
    RowValues, ERROR_SENTINEL, NO_FORMULA_PLACEHOLDER, NO_VALUE_SENTINEL,
};

// Re-export store types
pub use gridcol_store::{
    ColumnStore, Favorite, JsonFileStore, MemoryStore, SnapshotStore, StoreError,
};
