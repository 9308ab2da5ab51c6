use std::collections::{BTreeSet, HashSet};

use super::SelectionEngine;
use crate::model::{CategoryKind, ValueArena, ValueKey};

impl SelectionEngine {
    /// Ids selected across remote filter categories. Recomputed on every call.
    #[must_use]
    pub fn selected_filter_ids(&self) -> BTreeSet<String> {
        self.selected_ids(CategoryKind::RemoteFilter)
    }

    /// Ids selected across local parameter categories. Recomputed on every call.
    #[must_use]
    pub fn selected_parameter_ids(&self) -> BTreeSet<String> {
        self.selected_ids(CategoryKind::LocalParameter)
    }

    fn selected_ids(&self, kind: CategoryKind) -> BTreeSet<String> {
        let arena = self.catalog.arena();
        let mut ids = Vec::new();
        for category in self.catalog.categories().iter().filter(|c| c.kind() == kind) {
            for &key in category.values() {
                arena.selected_tree_ids(key, &mut ids);
            }
        }
        ids.into_iter().filter(|id| !id.is_empty()).collect()
    }

    /// Every selected value with a non-empty id, in catalog order and without repeats.
    #[must_use]
    pub fn selected_values(&self) -> Vec<ValueKey> {
        let arena = self.catalog.arena();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for category in self.catalog.categories() {
            for &key in category.values() {
                collect_selected(arena, key, &mut seen, &mut out);
            }
        }
        out
    }
}

fn collect_selected(arena: &ValueArena, key: ValueKey, seen: &mut HashSet<ValueKey>, out: &mut Vec<ValueKey>) {
    let node = &arena[key];
    if !node.is_selected() {
        return;
    }
    if !node.id().is_empty() && seen.insert(key) {
        out.push(key);
    }
    for &child in node.children() {
        collect_selected(arena, child, seen, out);
    }
}
