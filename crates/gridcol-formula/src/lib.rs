//! # gridcol-formula
//!
//! Formula builder, parser and evaluator for gridcol custom columns.
//!
//! This crate provides:
//! - Interactive assembly of a [`FormulaConfig`](gridcol_core::FormulaConfig)
//!   ([`FormulaBuilder`], [`CustomColumnBuilder`])
//! - Expression rendering and parsing (text → AST)
//! - Per-row evaluation producing a display string ([`evaluate_column`])
//! - Locale-aware display formatting ([`format_number`])
//! - Reference-cycle detection across formula columns ([`ReferenceGraph`])
//!
//! ## Example
//!
//! ```rust
//! use gridcol_core::{FormulaConfig, FormulaPart, Operator, OutputType};
//! use gridcol_formula::{evaluate_config, RowValue, RowValues};
//!
//! let mut config = FormulaConfig::single("area", OutputType::Number);
//! config.parts.push(FormulaPart::new(Operator::Add, "price_m2"));
//!
//! let mut row = RowValues::new();
//! row.insert("area".into(), RowValue::Number(45.0));
//! row.insert("price_m2".into(), RowValue::Number(135_000.0));
//!
//! assert_eq!(evaluate_config(&config, &row).unwrap(), 135_045.0);
//! ```

pub mod builder;
pub mod dependency;
pub mod error;
pub mod eval;
pub mod format;
pub mod parser;

pub use builder::{CustomColumnBuilder, CustomColumnKind, FormulaBuilder};
pub use dependency::{would_create_cycle, ReferenceGraph};
pub use error::{FormulaError, FormulaResult};
pub use eval::{
    coerce_number, evaluate_column, evaluate_config, render_expression, RowValue, RowValues,
    ERROR_SENTINEL, NO_FORMULA_PLACEHOLDER, NO_VALUE_SENTINEL,
};
pub use format::{format_number, format_output, NumberLocale};
pub use parser::{parse_expression, Expr};
