//! Formula evaluation
//!
//! Evaluates a column's formula configuration against one row's field
//! values and produces a display string. Evaluation is a pure synchronous
//! computation: every failure path resolves to one of two string sentinels,
//! so the row-rendering caller can always treat the result as plain text.

use crate::error::FormulaResult;
use crate::format::{format_output, NumberLocale};
use crate::parser::parse_expression;
use gridcol_core::{Column, ColumnKind, FormulaConfig};
use std::collections::HashMap;

/// Returned in place of a value when the arithmetic result is not a finite
/// number (for example a division by a zero-coerced operand)
pub const NO_VALUE_SENTINEL: &str = "—";

/// Returned when the expression could not be evaluated at all
pub const ERROR_SENTINEL: &str = "Ошибка";

/// Returned for a column that carries no formula configuration
pub const NO_FORMULA_PLACEHOLDER: &str = "-";

/// Raw field value of one row, as supplied by the row-data collaborator
///
/// Strings may decorate the numeric value with thousands separators,
/// currency symbols or unit suffixes, and may use a decimal comma.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RowValue {
    fn from(n: f64) -> Self {
        RowValue::Number(n)
    }
}

impl From<&str> for RowValue {
    fn from(s: &str) -> Self {
        RowValue::Text(s.to_string())
    }
}

impl From<String> for RowValue {
    fn from(s: String) -> Self {
        RowValue::Text(s)
    }
}

/// Mapping from column id to raw field value for one displayed row
pub type RowValues = HashMap<String, RowValue>;

/// Coerce one operand column's raw value to a number
///
/// A missing id coerces to 0. Strings are stripped to digit, comma, period
/// and minus characters, the decimal comma is normalized to a point, and the
/// remainder is parsed as f64; anything unparseable coerces to 0.
///
/// # Example
/// ```rust
/// use gridcol_formula::{coerce_number, RowValue, RowValues};
///
/// let mut row = RowValues::new();
/// row.insert("price".into(), RowValue::Text("135 000,50 ₽".into()));
/// assert_eq!(coerce_number("price", &row), 135000.50);
/// assert_eq!(coerce_number("missing", &row), 0.0);
/// ```
pub fn coerce_number(col_id: &str, row: &RowValues) -> f64 {
    match row.get(col_id) {
        None => 0.0,
        Some(RowValue::Number(n)) => *n,
        Some(RowValue::Text(s)) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
                .map(|c| if c == ',' { '.' } else { c })
                .collect();
            cleaned.parse().unwrap_or(0.0)
        }
    }
}

/// Render a formula configuration into arithmetic expression text for one row
///
/// The text starts with the initial operand wrapped in its configured
/// parentheses, then appends ` op ` and each part's bracketed operand. No
/// grouping is implied beyond each operand's own brackets, so evaluation
/// order follows standard operator precedence unless brackets override it.
pub fn render_expression(config: &FormulaConfig, row: &RowValues) -> String {
    let mut expr = String::new();
    push_operand(
        &mut expr,
        coerce_number(&config.initial_col_id, row),
        config.initial_brackets_before,
        config.initial_brackets_after,
    );
    for part in &config.parts {
        expr.push(' ');
        expr.push(part.operator.symbol());
        expr.push(' ');
        push_operand(
            &mut expr,
            coerce_number(&part.col_id, row),
            part.brackets_before,
            part.brackets_after,
        );
    }
    expr
}

fn push_operand(expr: &mut String, value: f64, brackets_before: u32, brackets_after: u32) {
    for _ in 0..brackets_before {
        expr.push('(');
    }
    expr.push_str(&value.to_string());
    for _ in 0..brackets_after {
        expr.push(')');
    }
}

/// Strip any character outside the arithmetic alphabet
///
/// The rendered text is synthesized entirely from coerced numbers and fixed
/// operator tokens, so this is a guard against malformed input leaking
/// unexpected characters into the parser, not a security boundary.
fn sanitize(expr: &str) -> String {
    expr.chars()
        .filter(|c| {
            c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
        })
        .collect()
}

/// Evaluate a formula configuration against one row's values
///
/// The returned number may be non-finite (division by a zero-coerced
/// operand); display-level callers map that to [`NO_VALUE_SENTINEL`].
pub fn evaluate_config(config: &FormulaConfig, row: &RowValues) -> FormulaResult<f64> {
    let expr = sanitize(&render_expression(config, row));
    Ok(parse_expression(&expr)?.eval())
}

/// Evaluate a column's formula for one row, producing the display string
///
/// Never fails: a column without a formula yields [`NO_FORMULA_PLACEHOLDER`],
/// a non-finite result yields [`NO_VALUE_SENTINEL`], and any evaluation
/// failure yields [`ERROR_SENTINEL`].
pub fn evaluate_column(column: &Column, row: &RowValues) -> String {
    let Some(ColumnKind::Formula {
        config,
        precision,
        currency,
    }) = &column.kind
    else {
        return NO_FORMULA_PLACEHOLDER.to_string();
    };

    match evaluate_config(config, row) {
        Ok(value) if value.is_finite() => {
            let locale = NumberLocale::default();
            format_output(
                value,
                *precision,
                config.output_type,
                currency.as_ref(),
                &locale,
            )
        }
        Ok(_) => NO_VALUE_SENTINEL.to_string(),
        Err(_) => ERROR_SENTINEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcol_core::{Currency, FormulaPart, Operator, OutputType};
    use pretty_assertions::assert_eq;

    fn row(values: &[(&str, RowValue)]) -> RowValues {
        values
            .iter()
            .map(|(id, v)| (id.to_string(), v.clone()))
            .collect()
    }

    fn formula_column(config: FormulaConfig, precision: u8, currency: Option<Currency>) -> Column {
        Column::new_custom(
            "custom_1".into(),
            "Расчёт".into(),
            ColumnKind::Formula {
                config,
                precision,
                currency,
            },
        )
    }

    #[test]
    fn coercion_strips_decorations() {
        let row = row(&[
            ("price", RowValue::Text("135 000,50 ₽".into())),
            ("label", RowValue::Text("abc".into())),
            ("plain", RowValue::Number(42.5)),
        ]);
        assert_eq!(coerce_number("price", &row), 135000.50);
        assert_eq!(coerce_number("label", &row), 0.0);
        assert_eq!(coerce_number("plain", &row), 42.5);
        assert_eq!(coerce_number("missing", &row), 0.0);
    }

    #[test]
    fn coercion_handles_negative_and_point() {
        let row = row(&[
            ("neg", RowValue::Text("-12.5 м²".into())),
            ("int", RowValue::Text("1 500".into())),
        ]);
        assert_eq!(coerce_number("neg", &row), -12.5);
        assert_eq!(coerce_number("int", &row), 1500.0);
    }

    #[test]
    fn renders_operands_with_brackets() {
        let mut config = FormulaConfig::single("a", OutputType::Number);
        config.initial_brackets_before = 1;
        let mut part = FormulaPart::new(Operator::Add, "b");
        part.brackets_after = 1;
        config.parts.push(part);

        let row = row(&[("a", 2.0.into()), ("b", 3.0.into())]);
        assert_eq!(render_expression(&config, &row), "(2 + 3)");
    }

    #[test]
    fn evaluates_number_output() {
        let mut config = FormulaConfig::single("area", OutputType::Number);
        config.parts.push(FormulaPart::new(Operator::Add, "price_m2"));
        let col = formula_column(config, 2, None);

        let row = row(&[("area", 45.0.into()), ("price_m2", 135_000.0.into())]);
        assert_eq!(evaluate_column(&col, &row), "135 045,00");
    }

    #[test]
    fn evaluates_percent_output() {
        let config = FormulaConfig::single("rate", OutputType::Percent);
        let col = formula_column(config, 1, None);

        let row = row(&[("rate", 12.345.into())]);
        assert_eq!(evaluate_column(&col, &row), "12,3%");
    }

    #[test]
    fn evaluates_currency_output() {
        let config = FormulaConfig::single("total", OutputType::Currency);
        let col = formula_column(config, 2, Some(Currency::Usd));

        let row = row(&[("total", 1000.0.into())]);
        assert_eq!(evaluate_column(&col, &row), "1 000,00 $");
    }

    #[test]
    fn division_by_coerced_zero_yields_no_value() {
        let mut config = FormulaConfig::single("a", OutputType::Number);
        config.parts.push(FormulaPart::new(Operator::Div, "absent"));
        let col = formula_column(config, 2, None);

        let row = row(&[("a", 10.0.into())]);
        assert_eq!(evaluate_column(&col, &row), "—");
    }

    #[test]
    fn unmatched_brackets_yield_error_sentinel() {
        let mut config = FormulaConfig::single("a", OutputType::Number);
        config.initial_brackets_before = 2;
        config.initial_brackets_after = 1;
        let col = formula_column(config, 2, None);

        let row = row(&[("a", 1.0.into())]);
        assert_eq!(evaluate_column(&col, &row), "Ошибка");
    }

    #[test]
    fn brackets_override_precedence() {
        // (2 + 3) * 4 vs 2 + 3 * 4
        let mut grouped = FormulaConfig::single("a", OutputType::Number);
        grouped.initial_brackets_before = 1;
        let mut add = FormulaPart::new(Operator::Add, "b");
        add.brackets_after = 1;
        grouped.parts.push(add);
        grouped.parts.push(FormulaPart::new(Operator::Mul, "c"));

        let mut plain = FormulaConfig::single("a", OutputType::Number);
        plain.parts.push(FormulaPart::new(Operator::Add, "b"));
        plain.parts.push(FormulaPart::new(Operator::Mul, "c"));

        let row = row(&[("a", 2.0.into()), ("b", 3.0.into()), ("c", 4.0.into())]);
        assert_eq!(evaluate_config(&grouped, &row).unwrap(), 20.0);
        assert_eq!(evaluate_config(&plain, &row).unwrap(), 14.0);
    }

    #[test]
    fn non_formula_column_gets_placeholder() {
        let col = Column::builtin("area", "Площадь", true);
        assert_eq!(evaluate_column(&col, &RowValues::new()), "-");
    }

    #[test]
    fn evaluation_is_deterministic() {
        let mut config = FormulaConfig::single("a", OutputType::Number);
        config.parts.push(FormulaPart::new(Operator::Mul, "b"));
        let col = formula_column(config, 3, None);

        let row = row(&[("a", 1.1.into()), ("b", 3.0.into())]);
        let first = evaluate_column(&col, &row);
        for _ in 0..10 {
            assert_eq!(evaluate_column(&col, &row), first);
        }
    }

    #[test]
    fn negative_operand_renders_and_evaluates() {
        let mut config = FormulaConfig::single("a", OutputType::Number);
        config.parts.push(FormulaPart::new(Operator::Sub, "b"));
        let col = formula_column(config, 0, None);

        let row = row(&[("a", 10.0.into()), ("b", RowValue::Text("-5".into()))]);
        // 10 - -5
        assert_eq!(evaluate_column(&col, &row), "15");
    }
}
