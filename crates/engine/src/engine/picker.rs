//! Overflow picker requests and the handling of their results.

use std::collections::BTreeSet;

use log::{debug, trace};

use super::{DrillDownMode, SelectionEngine, Transition, sweep};
use crate::model::{Catalog, Category, CategoryKind, ImageRef, ValueKey, ValueKind};

/// Asks the host to present the overflow picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRequest {
    pub(crate) revision: u64,
    pub(crate) category: String,
    pub(crate) kind: CategoryKind,
    pub(crate) title: String,
    pub(crate) values: Vec<ValueKey>,
    pub(crate) parent: Option<ValueKey>,
    pub(crate) preselected: Vec<ValueKey>,
    pub(crate) images: Vec<ImageRef>,
}

impl PickerRequest {
    /// Name of the category the result will be applied to.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Options offered by the picker.
    #[must_use]
    pub fn values(&self) -> &[ValueKey] {
        &self.values
    }

    /// Value whose children are being edited, when the picker was opened for a drill-down.
    #[must_use]
    pub fn parent(&self) -> Option<ValueKey> {
        self.parent
    }

    #[must_use]
    pub fn preselected(&self) -> &[ValueKey] {
        &self.preselected
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Build the result event for `chosen`.
    pub fn resolve(&self, chosen: Vec<ValueKey>) -> PickerResult {
        PickerResult {
            revision: self.revision,
            category: self.category.clone(),
            kind: self.kind,
            parent: self.parent,
            chosen,
        }
    }
}

/// The single result event of a confirmed picker. A dismissed picker produces none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerResult {
    revision: u64,
    category: String,
    kind: CategoryKind,
    parent: Option<ValueKey>,
    chosen: Vec<ValueKey>,
}

impl PickerResult {
    #[must_use]
    pub fn chosen(&self) -> &[ValueKey] {
        &self.chosen
    }

    #[must_use]
    pub fn parent(&self) -> Option<ValueKey> {
        self.parent
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl SelectionEngine {
    /// Open the overflow picker for the whole category at `category_index`.
    pub fn press_button(&mut self, category_index: usize) -> Transition {
        let Some(category) = self.catalog.category(category_index) else {
            debug!("button pressed on missing category {category_index}");
            return Transition::unchanged();
        };
        let arena = self.catalog.arena();
        let preselected = category
            .values()
            .iter()
            .copied()
            .filter(|&key| arena[key].kind() == ValueKind::Hidden && arena[key].is_selected())
            .collect();
        Transition::picker(PickerRequest {
            revision: self.catalog.revision(),
            category: category.name().to_string(),
            kind: category.kind(),
            title: category.name().to_string(),
            values: category.values().to_vec(),
            parent: None,
            preselected,
            images: self.catalog.images().to_vec(),
        })
    }

    /// Apply what the user confirmed in the overflow picker.
    pub fn apply_picker_result(&mut self, result: PickerResult) -> Transition {
        if result.revision != self.catalog.revision() {
            debug!("dropping picker result for {} from an older catalog", result.category);
            return Transition::unchanged();
        }
        let arena = self.catalog.arena();
        if result.parent.is_some_and(|key| !arena.contains(key))
            || result.chosen.iter().any(|&key| !arena.contains(key))
        {
            debug!("dropping picker result for {} with unknown values", result.category);
            return Transition::unchanged();
        }

        let transition = match result.parent {
            None if result.chosen.is_empty() => self.reset_category(&result.category),
            None => self.replace_category_values(&result.category, &result.chosen),
            Some(parent) => {
                let filtered: Vec<ValueKey> = result
                    .chosen
                    .iter()
                    .copied()
                    .filter(|&key| key != parent && arena[key].parent_id() == arena[parent].id())
                    .collect();
                match self.mode {
                    DrillDownMode::RowPerDrillDown => {
                        self.append_chip_row(parent, result.kind, &filtered)
                    }
                    DrillDownMode::ReplaceInPlace => self.splice_chips(parent, &filtered),
                }
            }
        };
        self.catalog.refresh_cells();
        transition
    }

    fn reset_category(&mut self, name: &str) -> Transition {
        let Some(index) = self.catalog.position(name) else {
            return Transition::unchanged();
        };
        let ids = sweep::owned_tree_ids(&self.catalog, index);
        sweep::prune_trees(&mut self.catalog, &ids);
        let Some(index) = self.catalog.position(name) else {
            return Transition::updated();
        };
        sweep::clear_selection(&mut self.catalog, index);
        sweep::select_total(&mut self.catalog, index);
        sweep::remove_orphan_rows(&mut self.catalog);
        Transition::updated()
    }

    fn replace_category_values(&mut self, name: &str, chosen: &[ValueKey]) -> Transition {
        let Some(index) = self.catalog.position(name) else {
            return Transition::unchanged();
        };
        let ids = sweep::owned_tree_ids(&self.catalog, index);
        sweep::prune_trees(&mut self.catalog, &ids);
        let Some(index) = self.catalog.position(name) else {
            return Transition::updated();
        };
        sweep::clear_selection(&mut self.catalog, index);

        let mut exclusive_taken = false;
        for &key in chosen {
            let kind = self.catalog.arena()[key].kind();
            if kind.is_exclusive() {
                if exclusive_taken {
                    continue;
                }
                exclusive_taken = true;
            }
            self.catalog.arena_mut().set_selected(key, true);
        }

        let rest: Vec<ValueKey> = self.catalog.categories()[index]
            .values()
            .iter()
            .copied()
            .filter(|key| !chosen.contains(key))
            .collect();
        self.catalog.categories_mut()[index].values = chosen.iter().copied().chain(rest).collect();

        if !self.catalog.categories()[index].has_selection(self.catalog.arena()) {
            sweep::select_total(&mut self.catalog, index);
        }
        sweep::remove_orphan_rows(&mut self.catalog);
        Transition::updated()
    }

    /// Make sure `parent` is the active value of the category listing it.
    fn ensure_selected(&mut self, parent: ValueKey) {
        if self.catalog.arena()[parent].is_selected() {
            return;
        }
        let Some(index) = self.catalog.category_of(parent) else {
            self.catalog.arena_mut().set_selected(parent, true);
            return;
        };
        let name = self.catalog.categories()[index].name().to_string();
        let ids = sweep::owned_tree_ids(&self.catalog, index);
        sweep::prune_trees(&mut self.catalog, &ids);
        if let Some(index) = self.catalog.position(&name) {
            sweep::clear_selection(&mut self.catalog, index);
        }
        self.catalog.arena_mut().set_selected(parent, true);
    }

    fn mark_children(&mut self, parent: ValueKey, chosen: &[ValueKey]) {
        let arena = self.catalog.arena_mut();
        if chosen.is_empty() {
            arena.reset_children(parent);
            return;
        }
        for child in arena[parent].children().to_vec() {
            arena.set_selected(child, chosen.contains(&child));
        }
    }

    fn append_chip_row(&mut self, parent: ValueKey, kind: CategoryKind, chosen: &[ValueKey]) -> Transition {
        self.ensure_selected(parent);
        let parent_id = self.catalog.arena()[parent].id().to_string();
        sweep::remove_chip_rows(&mut self.catalog);
        sweep::prune_trees(&mut self.catalog, &BTreeSet::from([parent_id.clone()]));
        self.mark_children(parent, chosen);
        sweep::remove_orphan_rows(&mut self.catalog);

        if !chosen.is_empty() {
            let kind = self
                .catalog
                .category_of(parent)
                .and_then(|index| self.catalog.category(index))
                .map_or(kind, Category::kind);
            trace!("appending chip row {parent_id} with {} values", chosen.len());
            self.catalog
                .categories_mut()
                .push(Category::drill_down(parent, parent_id, kind, chosen.to_vec()));
        }
        Transition::updated()
    }

    fn splice_chips(&mut self, parent: ValueKey, chosen: &[ValueKey]) -> Transition {
        self.ensure_selected(parent);
        self.mark_children(parent, chosen);

        if let Some(index) = splice_target(&self.catalog, parent) {
            let arena = self.catalog.arena();
            let previous_chips = arena[parent].children();
            // only chips join the row; a chosen Usual child stays in the parent's tree
            let chips: Vec<ValueKey> = chosen
                .iter()
                .copied()
                .filter(|&key| arena[key].kind() == ValueKind::Hidden)
                .collect();
            let kept: Vec<ValueKey> = self.catalog.categories()[index]
                .values()
                .iter()
                .copied()
                .filter(|key| !chips.contains(key))
                .filter(|key| !(previous_chips.contains(key) && arena[*key].kind() == ValueKind::Hidden))
                .collect();
            self.catalog.categories_mut()[index].values = chips.into_iter().chain(kept).collect();
        }
        sweep::remove_orphan_rows(&mut self.catalog);
        Transition::updated()
    }
}

/// The row named after the parent's own parent id, or else the row listing the parent.
fn splice_target(catalog: &Catalog, parent: ValueKey) -> Option<usize> {
    let parent_id = catalog.arena()[parent].parent_id();
    if parent_id.is_empty() {
        return catalog.category_of(parent);
    }
    catalog
        .position(parent_id)
        .or_else(|| catalog.category_of(parent))
}
