//! Store-level formula evaluation
//!
//! Bridges the column store and the formula evaluator: given one row's raw
//! field values, produce the display strings for the formula columns the
//! store currently holds.
//!
//! # Example
//!
//! ```rust,ignore
//! use gridcol::prelude::*;
//!
//! let store = ColumnStore::load(MemoryStore::new()).unwrap();
//! let row = RowValues::new();
//! for (id, text) in store.evaluate_visible(&row) {
//!     println!("{id}: {text}");
//! }
//! ```

use gridcol_formula::{evaluate_column, RowValues};
use gridcol_store::{ColumnStore, SnapshotStore};

/// Extension trait adding per-row evaluation to [`ColumnStore`]
pub trait StoreEvaluateExt {
    /// Evaluate one column for one row
    ///
    /// Returns `None` when no column with this id exists in any collection.
    /// For an existing column the result is always a display string: formula
    /// columns evaluate their configuration, every other kind yields the
    /// no-formula placeholder.
    fn evaluate_cell(&self, col_id: &str, row: &RowValues) -> Option<String>;

    /// Evaluate every visible formula column for one row
    ///
    /// Returns `(column id, display string)` pairs in visible-column order.
    /// Non-formula columns are skipped; their cells render the raw row value
    /// directly.
    fn evaluate_visible(&self, row: &RowValues) -> Vec<(String, String)>;
}

impl<S: SnapshotStore> StoreEvaluateExt for ColumnStore<S> {
    fn evaluate_cell(&self, col_id: &str, row: &RowValues) -> Option<String> {
        self.find(col_id)
            .map(|(_, column)| evaluate_column(column, row))
    }

    fn evaluate_visible(&self, row: &RowValues) -> Vec<(String, String)> {
        self.visible_columns()
            .into_iter()
            .filter(|c| c.formula().is_some())
            .map(|c| (c.id.clone(), evaluate_column(c, row)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcol_core::{Column, ColumnKind, FormulaConfig, FormulaPart, Operator, OutputType};
    use gridcol_formula::RowValue;
    use gridcol_store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn store_with_sum_column() -> (ColumnStore<MemoryStore>, String) {
        let mut store = ColumnStore::load(MemoryStore::new()).unwrap();
        let mut config = FormulaConfig::single("area", OutputType::Number);
        config
            .parts
            .push(FormulaPart::new(Operator::Mul, "price_m2"));
        let column = Column::new_custom(
            "custom_1".into(),
            "Расчёт".into(),
            ColumnKind::Formula {
                config,
                precision: 2,
                currency: None,
            },
        );
        let id = column.id.clone();
        store.add_custom(column).unwrap();
        (store, id)
    }

    fn sample_row() -> RowValues {
        let mut row = RowValues::new();
        row.insert("area".into(), RowValue::Number(45.0));
        row.insert("price_m2".into(), RowValue::Number(100_000.0));
        row
    }

    #[test]
    fn evaluates_existing_formula_column() {
        let (store, id) = store_with_sum_column();
        assert_eq!(
            store.evaluate_cell(&id, &sample_row()),
            Some("4 500 000,00".to_string())
        );
    }

    #[test]
    fn unknown_column_yields_none() {
        let (store, _) = store_with_sum_column();
        assert_eq!(store.evaluate_cell("nope", &sample_row()), None);
    }

    #[test]
    fn builtin_column_yields_placeholder() {
        let (store, _) = store_with_sum_column();
        assert_eq!(
            store.evaluate_cell("area", &sample_row()),
            Some("-".to_string())
        );
    }

    #[test]
    fn evaluate_visible_covers_only_formula_columns() {
        let (store, id) = store_with_sum_column();
        let results = store.evaluate_visible(&sample_row());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0], (id, "4 500 000,00".to_string()));
    }

    #[test]
    fn hidden_formula_columns_are_skipped() {
        let (mut store, id) = store_with_sum_column();
        store
            .toggle_visible(&id, gridcol_core::CollectionKey::Custom)
            .unwrap();
        assert!(store.evaluate_visible(&sample_row()).is_empty());
    }
}
