//! The column store
//!
//! [`ColumnStore`] owns the three ordered column collections and is the only
//! writer to them. Every mutating operation re-serializes and writes all
//! three collections through the snapshot backend in the same synchronous
//! step, keeping the persisted state globally consistent even when only one
//! collection changed.

use crate::error::{StoreError, StoreResult};
use crate::persist::SnapshotStore;
use gridcol_core::{
    default_primary, default_secondary, CollectionKey, Column,
};
use gridcol_formula::dependency::would_create_cycle;
use gridcol_formula::FormulaError;
use log::warn;

/// A favorite column tagged with its originating collection, so a later
/// toggle can be routed back to the right sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Favorite<'a> {
    pub collection: CollectionKey,
    pub column: &'a Column,
}

/// Owner of the three ordered column collections
#[derive(Debug)]
pub struct ColumnStore<S: SnapshotStore> {
    primary: Vec<Column>,
    secondary: Vec<Column>,
    custom: Vec<Column>,
    backend: S,
}

impl<S: SnapshotStore> ColumnStore<S> {
    /// Load the three collections from the backend, falling back to the
    /// default catalog where a key is absent
    ///
    /// A stored value that fails to decode is treated as corrupt: the
    /// collection falls back to its defaults instead of failing the whole
    /// load.
    pub fn load(backend: S) -> StoreResult<Self> {
        let primary = Self::load_collection(&backend, CollectionKey::Primary, default_primary)?;
        let secondary =
            Self::load_collection(&backend, CollectionKey::Secondary, default_secondary)?;
        let custom = Self::load_collection(&backend, CollectionKey::Custom, Vec::new)?;
        Ok(Self {
            primary,
            secondary,
            custom,
            backend,
        })
    }

    fn load_collection(
        backend: &S,
        key: CollectionKey,
        defaults: impl FnOnce() -> Vec<Column>,
    ) -> StoreResult<Vec<Column>> {
        let Some(raw) = backend.read(key.storage_key())? else {
            return Ok(defaults());
        };
        match serde_json::from_str(&raw) {
            Ok(columns) => Ok(columns),
            Err(e) => {
                warn!(
                    "corrupt snapshot under '{}', falling back to defaults: {e}",
                    key.storage_key()
                );
                Ok(defaults())
            }
        }
    }

    // === Read access ===

    pub fn primary(&self) -> &[Column] {
        &self.primary
    }

    pub fn secondary(&self) -> &[Column] {
        &self.secondary
    }

    pub fn custom(&self) -> &[Column] {
        &self.custom
    }

    /// All columns in collection-priority order (primary, secondary, custom)
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .chain(self.custom.iter())
    }

    /// Look up a column by id across the three collections
    pub fn find(&self, id: &str) -> Option<(CollectionKey, &Column)> {
        for key in [
            CollectionKey::Primary,
            CollectionKey::Secondary,
            CollectionKey::Custom,
        ] {
            if let Some(column) = self.collection(key).iter().find(|c| c.id == id) {
                return Some((key, column));
            }
        }
        None
    }

    /// Visible columns, primary then secondary then custom, insertion order
    /// within each collection
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns().filter(|c| c.visible).collect()
    }

    /// All favorite columns, each tagged with its originating collection
    pub fn favorites(&self) -> Vec<Favorite<'_>> {
        let tagged = |key: CollectionKey| {
            self.collection(key)
                .iter()
                .filter(|c| c.favorite)
                .map(move |column| Favorite {
                    collection: key,
                    column,
                })
        };
        tagged(CollectionKey::Primary)
            .chain(tagged(CollectionKey::Secondary))
            .chain(tagged(CollectionKey::Custom))
            .collect()
    }

    // === Mutation ===

    /// Flip `visible` on the matching entry and return the updated collection
    pub fn toggle_visible(&mut self, id: &str, key: CollectionKey) -> StoreResult<&[Column]> {
        self.toggle_flag(id, key, |c| c.visible = !c.visible)
    }

    /// Flip `favorite` on the matching entry and return the updated collection
    pub fn toggle_favorite(&mut self, id: &str, key: CollectionKey) -> StoreResult<&[Column]> {
        self.toggle_flag(id, key, |c| c.favorite = !c.favorite)
    }

    fn toggle_flag(
        &mut self,
        id: &str,
        key: CollectionKey,
        flip: impl FnOnce(&mut Column),
    ) -> StoreResult<&[Column]> {
        let column = self
            .collection_mut(key)
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::ColumnNotFound {
                id: id.to_string(),
                collection: key,
            })?;
        flip(column);
        self.persist()?;
        Ok(self.collection(key))
    }

    /// Append a user-defined column
    ///
    /// Fails if the id or the case-insensitive label collides with any
    /// existing column across all three collections, or if a formula config
    /// would create a reference cycle.
    pub fn add_custom(&mut self, mut column: Column) -> StoreResult<()> {
        if self.columns().any(|c| c.id == column.id) {
            return Err(gridcol_core::Error::DuplicateId(column.id).into());
        }
        self.check_label_unique(&column.label, None)?;
        self.check_no_cycle(&column, None)?;
        column.custom = true;
        self.custom.push(column);
        self.persist()
    }

    /// Replace the custom column with matching id in place
    pub fn replace_custom(&mut self, id: &str, column: Column) -> StoreResult<()> {
        let index = self
            .custom
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::ColumnNotFound {
                id: id.to_string(),
                collection: CollectionKey::Custom,
            })?;
        self.check_label_unique(&column.label, Some(id))?;
        self.check_no_cycle(&column, Some(id))?;
        self.custom[index] = column;
        self.persist()
    }

    /// Remove a custom column by id; removing an absent id is a no-op
    pub fn delete_custom(&mut self, id: &str) -> StoreResult<()> {
        self.custom.retain(|c| c.id != id);
        self.persist()
    }

    /// Move one element of a collection from `from` to `to`
    ///
    /// Splice semantics: the element is extracted and re-inserted, so the
    /// relative order of all other elements is preserved.
    pub fn reorder(&mut self, key: CollectionKey, from: usize, to: usize) -> StoreResult<()> {
        let len = self.collection(key).len();
        for index in [from, to] {
            if index >= len {
                return Err(StoreError::IndexOutOfBounds { index, len });
            }
        }
        let collection = self.collection_mut(key);
        let column = collection.remove(from);
        collection.insert(to, column);
        self.persist()
    }

    /// Hide every column in all three collections
    pub fn reset_visibility(&mut self) -> StoreResult<()> {
        for column in self
            .primary
            .iter_mut()
            .chain(self.secondary.iter_mut())
            .chain(self.custom.iter_mut())
        {
            column.visible = false;
        }
        self.persist()
    }

    // === Internals ===

    fn collection(&self, key: CollectionKey) -> &[Column] {
        match key {
            CollectionKey::Primary => &self.primary,
            CollectionKey::Secondary => &self.secondary,
            CollectionKey::Custom => &self.custom,
        }
    }

    fn collection_mut(&mut self, key: CollectionKey) -> &mut Vec<Column> {
        match key {
            CollectionKey::Primary => &mut self.primary,
            CollectionKey::Secondary => &mut self.secondary,
            CollectionKey::Custom => &mut self.custom,
        }
    }

    fn check_label_unique(&self, label: &str, own_id: Option<&str>) -> StoreResult<()> {
        let lowered = label.to_lowercase();
        if self
            .columns()
            .any(|c| c.label.to_lowercase() == lowered && Some(c.id.as_str()) != own_id)
        {
            return Err(gridcol_core::Error::DuplicateLabel(label.to_string()).into());
        }
        Ok(())
    }

    fn check_no_cycle(&self, column: &Column, replacing: Option<&str>) -> StoreResult<()> {
        let Some(config) = column.formula() else {
            return Ok(());
        };
        let others = self.columns().filter(|c| Some(c.id.as_str()) != replacing);
        if would_create_cycle(&column.id, config, others) {
            return Err(FormulaError::CircularReference(column.id.clone()).into());
        }
        Ok(())
    }

    /// Re-serialize and write all three collections as a unit
    fn persist(&mut self) -> StoreResult<()> {
        let primary = serde_json::to_string(&self.primary)?;
        let secondary = serde_json::to_string(&self.secondary)?;
        let custom = serde_json::to_string(&self.custom)?;
        self.backend
            .write(CollectionKey::Primary.storage_key(), &primary)?;
        self.backend
            .write(CollectionKey::Secondary.storage_key(), &secondary)?;
        self.backend
            .write(CollectionKey::Custom.storage_key(), &custom)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use gridcol_core::{ColumnKind, FormulaConfig, FormulaPart, Operator, OutputType};
    use pretty_assertions::assert_eq;

    fn store() -> ColumnStore<MemoryStore> {
        ColumnStore::load(MemoryStore::new()).unwrap()
    }

    fn numeric_custom(id: &str, label: &str) -> Column {
        Column::new_custom(
            id.into(),
            label.into(),
            ColumnKind::Numeric { precision: 2 },
        )
    }

    fn formula_custom(id: &str, label: &str, refs: &[&str]) -> Column {
        let mut config = FormulaConfig::single(refs[0], OutputType::Number);
        for operand in &refs[1..] {
            config.parts.push(FormulaPart::new(Operator::Add, *operand));
        }
        Column::new_custom(
            id.into(),
            label.into(),
            ColumnKind::Formula {
                config,
                precision: 2,
                currency: None,
            },
        )
    }

    #[test]
    fn loads_defaults_when_backend_empty() {
        let store = store();
        assert_eq!(store.primary().len(), 13);
        assert_eq!(store.secondary().len(), 3);
        assert!(store.custom().is_empty());
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_defaults() {
        let mut backend = MemoryStore::new();
        backend.write("main-columns", "{not json").unwrap();
        let store = ColumnStore::load(backend).unwrap();
        assert_eq!(store.primary().len(), 13);
    }

    #[test]
    fn toggle_visible_flips_and_reports_missing() {
        let mut store = store();
        let before = store
            .find("total_price")
            .map(|(_, c)| c.visible)
            .unwrap();
        store
            .toggle_visible("total_price", CollectionKey::Primary)
            .unwrap();
        let after = store.find("total_price").map(|(_, c)| c.visible).unwrap();
        assert_eq!(after, !before);

        let err = store
            .toggle_visible("nope", CollectionKey::Primary)
            .unwrap_err();
        assert!(matches!(err, StoreError::ColumnNotFound { .. }));

        // id exists, but in a different collection
        let err = store
            .toggle_visible("tags", CollectionKey::Primary)
            .unwrap_err();
        assert!(matches!(err, StoreError::ColumnNotFound { .. }));
    }

    #[test]
    fn favorites_are_tagged_with_their_collection() {
        let mut store = store();
        store
            .toggle_favorite("area", CollectionKey::Primary)
            .unwrap();
        store
            .toggle_favorite("tags", CollectionKey::Secondary)
            .unwrap();

        let favorites = store.favorites();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].collection, CollectionKey::Primary);
        assert_eq!(favorites[0].column.id, "area");
        assert_eq!(favorites[1].collection, CollectionKey::Secondary);
        assert_eq!(favorites[1].column.id, "tags");
    }

    #[test]
    fn add_custom_rejects_duplicate_label_case_insensitive() {
        let mut store = store();
        let err = store
            .add_custom(numeric_custom("custom_1", "ПЛОЩАДЬ"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Column(gridcol_core::Error::DuplicateLabel(_))
        ));
    }

    #[test]
    fn add_custom_rejects_duplicate_id() {
        let mut store = store();
        let err = store.add_custom(numeric_custom("area", "Другое")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Column(gridcol_core::Error::DuplicateId(_))
        ));
    }

    #[test]
    fn replace_custom_requires_presence() {
        let mut store = store();
        let err = store
            .replace_custom("custom_9", numeric_custom("custom_9", "Новый"))
            .unwrap_err();
        assert!(matches!(err, StoreError::ColumnNotFound { .. }));

        store.add_custom(numeric_custom("custom_9", "Новый")).unwrap();
        store
            .replace_custom("custom_9", numeric_custom("custom_9", "Новее"))
            .unwrap();
        assert_eq!(store.custom()[0].label, "Новее");
    }

    #[test]
    fn replace_custom_keeps_own_label() {
        let mut store = store();
        store.add_custom(numeric_custom("custom_1", "Скидка")).unwrap();
        // Re-saving under the same label must not trip the duplicate check
        store
            .replace_custom("custom_1", numeric_custom("custom_1", "скидка"))
            .unwrap();
    }

    #[test]
    fn delete_custom_is_idempotent() {
        let mut store = store();
        store.add_custom(numeric_custom("custom_1", "Скидка")).unwrap();
        store.delete_custom("custom_1").unwrap();
        assert!(store.custom().is_empty());
        // Absent id: no-op, not an error
        store.delete_custom("custom_1").unwrap();
        assert!(store.custom().is_empty());
    }

    #[test]
    fn reorder_preserves_other_elements() {
        let mut store = store();
        let before: Vec<String> = store.primary().iter().map(|c| c.id.clone()).collect();
        store.reorder(CollectionKey::Primary, 0, 3).unwrap();
        let after: Vec<String> = store.primary().iter().map(|c| c.id.clone()).collect();

        assert_eq!(after[3], before[0]);
        assert_eq!(&after[0..3], &before[1..4]);
        assert_eq!(&after[4..], &before[4..]);

        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort();
        sorted_after.sort();
        assert_eq!(sorted_before, sorted_after);
    }

    #[test]
    fn reorder_rejects_out_of_bounds() {
        let mut store = store();
        let len = store.secondary().len();
        let err = store
            .reorder(CollectionKey::Secondary, 0, len)
            .unwrap_err();
        assert!(matches!(err, StoreError::IndexOutOfBounds { .. }));
        let err = store
            .reorder(CollectionKey::Secondary, len, 0)
            .unwrap_err();
        assert!(matches!(err, StoreError::IndexOutOfBounds { .. }));
    }

    #[test]
    fn visible_columns_order_is_stable() {
        let mut store = store();
        store.add_custom(numeric_custom("custom_1", "Скидка")).unwrap();
        store
            .toggle_visible("tags", CollectionKey::Secondary)
            .unwrap();
        store
            .toggle_visible("plan7_id", CollectionKey::Primary)
            .unwrap();

        let ids: Vec<&str> = store.visible_columns().iter().map(|c| c.id.as_str()).collect();
        // Primary entries first, then secondary, then custom, regardless of
        // the order toggles happened in
        let tags_pos = ids.iter().position(|id| *id == "tags").unwrap();
        let custom_pos = ids.iter().position(|id| *id == "custom_1").unwrap();
        assert!(ids.iter().position(|id| *id == "area").unwrap() < tags_pos);
        assert!(tags_pos < custom_pos);
        assert!(!ids.contains(&"plan7_id"));
    }

    #[test]
    fn self_referencing_formula_rejected() {
        let mut store = store();
        let err = store
            .add_custom(formula_custom("custom_1", "Цикл", &["custom_1"]))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Formula(FormulaError::CircularReference(_))
        ));
    }

    #[test]
    fn mutual_reference_rejected_at_save() {
        let mut store = store();
        store
            .add_custom(formula_custom("custom_1", "Первый", &["area"]))
            .unwrap();
        store
            .add_custom(formula_custom("custom_2", "Второй", &["custom_1"]))
            .unwrap();

        // Editing custom_1 to point at custom_2 closes the loop
        let err = store
            .replace_custom("custom_1", formula_custom("custom_1", "Первый", &["custom_2"]))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Formula(FormulaError::CircularReference(_))
        ));
    }

    #[test]
    fn formula_referencing_builtins_accepted() {
        let mut store = store();
        store
            .add_custom(formula_custom("custom_1", "Итог", &["area", "price_m2"]))
            .unwrap();
        assert_eq!(store.custom().len(), 1);
    }

    #[test]
    fn every_mutation_persists_all_three_collections() {
        let mut store = store();
        store
            .toggle_visible("tags", CollectionKey::Secondary)
            .unwrap();

        // All three keys must be present after a single-collection mutation
        for key in ["main-columns", "additional-columns", "custom-columns"] {
            assert!(store.backend.read(key).unwrap().is_some(), "missing {key}");
        }
    }

    #[test]
    fn persisted_state_survives_reload() {
        let mut store = store();
        store.add_custom(numeric_custom("custom_1", "Скидка")).unwrap();
        store
            .toggle_visible("total_price", CollectionKey::Primary)
            .unwrap();
        store.reorder(CollectionKey::Primary, 2, 0).unwrap();

        let primary: Vec<Column> = store.primary().to_vec();
        let secondary: Vec<Column> = store.secondary().to_vec();
        let custom: Vec<Column> = store.custom().to_vec();

        let reloaded = ColumnStore::load(store.backend).unwrap();
        assert_eq!(reloaded.primary(), primary.as_slice());
        assert_eq!(reloaded.secondary(), secondary.as_slice());
        assert_eq!(reloaded.custom(), custom.as_slice());
    }

    #[test]
    fn reset_visibility_hides_everything() {
        let mut store = store();
        store.add_custom(numeric_custom("custom_1", "Скидка")).unwrap();
        store.reset_visibility().unwrap();
        assert!(store.visible_columns().is_empty());
    }
}
