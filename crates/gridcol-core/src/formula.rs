//! Formula configuration types
//!
//! A [`FormulaConfig`] describes the computation a Formula column performs:
//! an initial operand column followed by an ordered chain of
//! (operator, operand) steps, each operand optionally wrapped in its own
//! parentheses. The configuration is owned by its [`Column`](crate::Column)
//! and is created or replaced atomically with it; parsing and evaluation
//! live in the `gridcol-formula` crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Arithmetic operator chaining one formula part onto the running expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    /// The single-character symbol used in the rendered expression
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            _ => Err(format!("Unknown operator: '{s}'")),
        }
    }
}

/// How the numeric result of a formula is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    /// Locale-formatted plain number
    Number,
    /// Number with a trailing `%`
    Percent,
    /// Number followed by the column's currency symbol
    Currency,
}

/// One chained operation of a formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaPart {
    pub operator: Operator,
    /// Id of the operand column for this step
    pub col_id: String,
    /// Opening parentheses emitted before this operand only
    #[serde(default)]
    pub brackets_before: u32,
    /// Closing parentheses emitted after this operand only
    #[serde(default)]
    pub brackets_after: u32,
}

impl FormulaPart {
    pub fn new(operator: Operator, col_id: impl Into<String>) -> Self {
        Self {
            operator,
            col_id: col_id.into(),
            brackets_before: 0,
            brackets_after: 0,
        }
    }
}

/// The computation a Formula column performs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaConfig {
    /// Id of the first operand column
    pub initial_col_id: String,
    #[serde(default)]
    pub initial_brackets_before: u32,
    #[serde(default)]
    pub initial_brackets_after: u32,
    /// Chained operations, applied left to right; may be empty
    #[serde(default)]
    pub parts: Vec<FormulaPart>,
    pub output_type: OutputType,
}

impl FormulaConfig {
    /// A formula consisting of a single unbracketed operand
    pub fn single(initial_col_id: impl Into<String>, output_type: OutputType) -> Self {
        Self {
            initial_col_id: initial_col_id.into(),
            initial_brackets_before: 0,
            initial_brackets_after: 0,
            parts: Vec::new(),
            output_type,
        }
    }

    /// All operand column ids referenced by this formula, in order
    pub fn referenced_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.initial_col_id.as_str())
            .chain(self.parts.iter().map(|p| p.col_id.as_str()))
    }
}
