//! Reference tracking across formula columns
//!
//! Formula operands are column ids, and a formula column may reference
//! another formula column. Nothing at evaluation time follows such a
//! reference (an operand that is not present in the row mapping coerces to
//! zero), but a reference cycle is always a configuration mistake, so the
//! store rejects one at save time using this graph.

use gridcol_core::{Column, FormulaConfig};
use std::collections::{HashMap, HashSet};

/// Directed graph of formula-operand references between columns
///
/// Edges point from a formula column to the columns its formula reads.
#[derive(Debug, Default)]
pub struct ReferenceGraph {
    precedents: HashMap<String, HashSet<String>>,
}

impl ReferenceGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from every formula column in `columns`
    pub fn from_columns<'a>(columns: impl IntoIterator<Item = &'a Column>) -> Self {
        let mut graph = Self::new();
        for column in columns {
            if let Some(config) = column.formula() {
                graph.add_formula(&column.id, config);
            }
        }
        graph
    }

    /// Record the operand references of one formula column
    pub fn add_formula(&mut self, col_id: &str, config: &FormulaConfig) {
        let refs = self.precedents.entry(col_id.to_string()).or_default();
        for operand in config.referenced_ids() {
            refs.insert(operand.to_string());
        }
    }

    /// Drop a column's outgoing references (used before re-checking an edit)
    pub fn remove_column(&mut self, col_id: &str) {
        self.precedents.remove(col_id);
    }

    /// Detect a reference cycle reachable from `col_id`
    pub fn has_circular_reference(&self, col_id: &str) -> bool {
        let mut visited = HashSet::new();
        let mut in_stack = HashSet::new();
        self.detect_cycle(col_id, &mut visited, &mut in_stack)
    }

    fn detect_cycle<'a>(
        &'a self,
        col_id: &'a str,
        visited: &mut HashSet<&'a str>,
        in_stack: &mut HashSet<&'a str>,
    ) -> bool {
        if in_stack.contains(col_id) {
            return true;
        }
        if visited.contains(col_id) {
            return false;
        }

        visited.insert(col_id);
        in_stack.insert(col_id);

        if let Some(precedents) = self.precedents.get(col_id) {
            for precedent in precedents {
                if self.detect_cycle(precedent, visited, in_stack) {
                    return true;
                }
            }
        }

        in_stack.remove(col_id);
        false
    }
}

/// Check whether saving `config` under `col_id` would create a reference
/// cycle given the other columns' formulas
///
/// `others` should not contain the previous version of the column being
/// saved; the caller excludes it so an edit is checked against its
/// replacement, not its past self.
pub fn would_create_cycle<'a>(
    col_id: &str,
    config: &FormulaConfig,
    others: impl IntoIterator<Item = &'a Column>,
) -> bool {
    let mut graph = ReferenceGraph::from_columns(others.into_iter().filter(|c| c.id != col_id));
    graph.add_formula(col_id, config);
    graph.has_circular_reference(col_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcol_core::{ColumnKind, FormulaPart, Operator, OutputType};

    fn formula_column(id: &str, refs: &[&str]) -> Column {
        let mut config = FormulaConfig::single(refs[0], OutputType::Number);
        for operand in &refs[1..] {
            config.parts.push(FormulaPart::new(Operator::Add, *operand));
        }
        Column::new_custom(
            id.into(),
            format!("col {id}"),
            ColumnKind::Formula {
                config,
                precision: 2,
                currency: None,
            },
        )
    }

    #[test]
    fn test_self_reference() {
        let config = FormulaConfig::single("custom_1", OutputType::Number);
        assert!(would_create_cycle("custom_1", &config, std::iter::empty()));
    }

    #[test]
    fn test_mutual_reference() {
        let other = formula_column("custom_2", &["custom_1"]);
        let config = FormulaConfig::single("custom_2", OutputType::Number);
        assert!(would_create_cycle("custom_1", &config, &[other]));
    }

    #[test]
    fn test_three_column_cycle() {
        let b = formula_column("b", &["c"]);
        let c = formula_column("c", &["a"]);
        let config = FormulaConfig::single("b", OutputType::Number);
        assert!(would_create_cycle("a", &config, &[b, c]));
    }

    #[test]
    fn test_chain_without_cycle() {
        let b = formula_column("b", &["area", "price_m2"]);
        let config = FormulaConfig::single("b", OutputType::Number);
        assert!(!would_create_cycle("a", &config, &[b]));
    }

    #[test]
    fn test_edit_replaces_previous_references() {
        // custom_1 used to reference custom_2; the edit points it at a
        // built-in instead, so custom_2 referencing custom_1 stays legal
        let old_self = formula_column("custom_1", &["custom_2"]);
        let other = formula_column("custom_2", &["custom_1"]);

        let config = FormulaConfig::single("area", OutputType::Number);
        assert!(!would_create_cycle("custom_1", &config, &[old_self, other]));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let b = formula_column("b", &["d"]);
        let c = formula_column("c", &["d"]);
        let config = {
            let mut config = FormulaConfig::single("b", OutputType::Number);
            config.parts.push(FormulaPart::new(Operator::Add, "c"));
            config
        };
        assert!(!would_create_cycle("a", &config, &[b, c]));
    }
}
