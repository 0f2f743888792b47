//! Interactive assembly of formula configurations and custom columns
//!
//! [`FormulaBuilder`] maintains a draft [`FormulaConfig`] while the user
//! edits it part by part; [`CustomColumnBuilder`] wraps it together with the
//! rest of a custom column's fields (label, type, type-specific payload).
//! Required-field and uniqueness constraints are enforced at save time; an
//! incomplete draft cannot be turned into a configuration.

use crate::error::{FormulaError, FormulaResult};
use gridcol_core::{
    Column, ColumnKind, Currency, Error as ColumnError, FormulaConfig, FormulaPart, Operator,
    OutputType, DEFAULT_PRECISION, MAX_PRECISION,
};

/// Draft-state editor for one formula configuration
#[derive(Debug, Clone)]
pub struct FormulaBuilder {
    draft: FormulaConfig,
}

impl FormulaBuilder {
    /// Start an empty draft (single unselected operand, Number output)
    pub fn new() -> Self {
        Self {
            draft: FormulaConfig::single("", OutputType::Number),
        }
    }

    /// Start from an existing configuration (edit mode)
    pub fn edit(config: FormulaConfig) -> Self {
        Self { draft: config }
    }

    /// The current draft state
    pub fn draft(&self) -> &FormulaConfig {
        &self.draft
    }

    pub fn set_initial(&mut self, col_id: impl Into<String>) {
        self.draft.initial_col_id = col_id.into();
    }

    pub fn set_initial_brackets(&mut self, before: u32, after: u32) {
        self.draft.initial_brackets_before = before;
        self.draft.initial_brackets_after = after;
    }

    pub fn set_output_type(&mut self, output_type: OutputType) {
        self.draft.output_type = output_type;
    }

    /// Append a new part defaulted to `+` and an unselected operand;
    /// returns its index
    pub fn add_part(&mut self) -> usize {
        self.draft.parts.push(FormulaPart::new(Operator::Add, ""));
        self.draft.parts.len() - 1
    }

    /// Delete one part, shifting subsequent parts down
    pub fn remove_part(&mut self, index: usize) -> FormulaResult<()> {
        self.check_index(index)?;
        self.draft.parts.remove(index);
        Ok(())
    }

    pub fn set_operator(&mut self, index: usize, operator: Operator) -> FormulaResult<()> {
        self.part_mut(index)?.operator = operator;
        Ok(())
    }

    pub fn set_operand(&mut self, index: usize, col_id: impl Into<String>) -> FormulaResult<()> {
        self.part_mut(index)?.col_id = col_id.into();
        Ok(())
    }

    /// Parenthesization around this part's operand only, not around the
    /// accumulated expression
    pub fn set_brackets(&mut self, index: usize, before: u32, after: u32) -> FormulaResult<()> {
        let part = self.part_mut(index)?;
        part.brackets_before = before;
        part.brackets_after = after;
        Ok(())
    }

    /// Validate the draft and hand over the finished configuration
    ///
    /// Bracket counts are never validated for global balance: every bracket
    /// group is emitted in matched before/after pairs per operand, so any
    /// non-negative counts are structurally valid.
    pub fn finish(self) -> FormulaResult<FormulaConfig> {
        if self.draft.initial_col_id.is_empty() {
            return Err(FormulaError::MissingInitialOperand);
        }
        for (index, part) in self.draft.parts.iter().enumerate() {
            if part.col_id.is_empty() {
                return Err(FormulaError::MissingOperand { index });
            }
        }
        Ok(self.draft)
    }

    fn check_index(&self, index: usize) -> FormulaResult<()> {
        let len = self.draft.parts.len();
        if index >= len {
            return Err(FormulaError::PartOutOfBounds { index, len });
        }
        Ok(())
    }

    fn part_mut(&mut self, index: usize) -> FormulaResult<&mut FormulaPart> {
        self.check_index(index)?;
        Ok(&mut self.draft.parts[index])
    }
}

impl Default for FormulaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Type selector of a custom-column draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomColumnKind {
    Text,
    Money,
    Date,
    List,
    Numeric,
    Formula,
}

/// Draft-state editor for one custom column
///
/// Carries every type-conditional field at once, the way the form does; only
/// the fields relevant to the selected kind make it into the finished
/// [`Column`].
#[derive(Debug, Clone)]
pub struct CustomColumnBuilder {
    /// Present when editing an existing column; keeps id, visibility and
    /// favorite state stable across the edit
    editing: Option<(String, bool, bool)>,
    label: String,
    kind: CustomColumnKind,
    options: Vec<String>,
    multi_select: bool,
    precision: u8,
    currency: Currency,
    formula: FormulaBuilder,
}

impl CustomColumnBuilder {
    /// Start a fresh draft (create mode)
    pub fn new() -> Self {
        Self {
            editing: None,
            label: String::new(),
            kind: CustomColumnKind::Text,
            options: vec![String::new()],
            multi_select: false,
            precision: DEFAULT_PRECISION,
            currency: Currency::Rub,
            formula: FormulaBuilder::new(),
        }
    }

    /// Seed a draft from an existing custom column (edit mode)
    pub fn edit(column: &Column) -> Self {
        let mut builder = Self::new();
        builder.editing = Some((column.id.clone(), column.visible, column.favorite));
        builder.label = column.label.clone();
        match &column.kind {
            Some(ColumnKind::Text) | None => builder.kind = CustomColumnKind::Text,
            Some(ColumnKind::Money { currency }) => {
                builder.kind = CustomColumnKind::Money;
                builder.currency = currency.clone();
            }
            Some(ColumnKind::Date) => builder.kind = CustomColumnKind::Date,
            Some(ColumnKind::List {
                options,
                multi_select,
            }) => {
                builder.kind = CustomColumnKind::List;
                builder.options = options.clone();
                builder.multi_select = *multi_select;
            }
            Some(ColumnKind::Numeric { precision }) => {
                builder.kind = CustomColumnKind::Numeric;
                builder.precision = *precision;
            }
            Some(ColumnKind::Formula {
                config,
                precision,
                currency,
            }) => {
                builder.kind = CustomColumnKind::Formula;
                builder.precision = *precision;
                if let Some(currency) = currency {
                    builder.currency = currency.clone();
                }
                builder.formula = FormulaBuilder::edit(config.clone());
            }
        }
        builder
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_kind(&mut self, kind: CustomColumnKind) {
        self.kind = kind;
    }

    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    /// Remove one list option; the last remaining option row stays in place
    pub fn remove_option(&mut self, index: usize) {
        if self.options.len() > 1 && index < self.options.len() {
            self.options.remove(index);
        }
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) {
        if let Some(option) = self.options.get_mut(index) {
            *option = value.into();
        }
    }

    pub fn set_multi_select(&mut self, multi_select: bool) {
        self.multi_select = multi_select;
    }

    /// Fractional digits for Numeric/Formula display, constrained to `[0, 10]`
    pub fn set_precision(&mut self, precision: u8) -> FormulaResult<()> {
        if precision > MAX_PRECISION {
            return Err(ColumnError::PrecisionOutOfRange(precision, MAX_PRECISION).into());
        }
        self.precision = precision;
        Ok(())
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// The embedded formula draft (meaningful when the kind is Formula)
    pub fn formula_mut(&mut self) -> &mut FormulaBuilder {
        &mut self.formula
    }

    /// Validate the draft against the existing columns and produce the column
    ///
    /// The label must be non-empty and unique (case-insensitive) across all
    /// existing columns other than the one being edited. In create mode a
    /// fresh id is generated that collides with nothing.
    pub fn finish(self, existing: &[Column]) -> FormulaResult<Column> {
        let label = self.label.trim().to_string();
        if label.is_empty() {
            return Err(ColumnError::EmptyLabel.into());
        }

        let own_id = self.editing.as_ref().map(|(id, _, _)| id.as_str());
        let lowered = label.to_lowercase();
        if existing
            .iter()
            .any(|c| c.label.to_lowercase() == lowered && Some(c.id.as_str()) != own_id)
        {
            return Err(ColumnError::DuplicateLabel(label).into());
        }

        let kind = match self.kind {
            CustomColumnKind::Text => ColumnKind::Text,
            CustomColumnKind::Money => ColumnKind::Money {
                currency: self.currency,
            },
            CustomColumnKind::Date => ColumnKind::Date,
            CustomColumnKind::List => {
                let options: Vec<String> = self
                    .options
                    .into_iter()
                    .filter(|o| !o.trim().is_empty())
                    .collect();
                if options.is_empty() {
                    return Err(ColumnError::EmptyListOptions.into());
                }
                ColumnKind::List {
                    options,
                    multi_select: self.multi_select,
                }
            }
            CustomColumnKind::Numeric => ColumnKind::Numeric {
                precision: self.precision,
            },
            CustomColumnKind::Formula => {
                let config = self.formula.finish()?;
                let currency = match config.output_type {
                    OutputType::Currency => Some(self.currency),
                    _ => None,
                };
                ColumnKind::Formula {
                    config,
                    precision: self.precision,
                    currency,
                }
            }
        };

        let column = match self.editing {
            Some((id, visible, favorite)) => {
                let mut column = Column::new_custom(id, label, kind);
                column.visible = visible;
                column.favorite = favorite;
                column
            }
            None => {
                let id = Column::generate_custom_id(existing.iter().map(|c| c.id.as_str()));
                Column::new_custom(id, label, kind)
            }
        };

        Ok(column)
    }
}

impl Default for CustomColumnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
