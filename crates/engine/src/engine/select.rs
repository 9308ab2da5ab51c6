use log::debug;

use super::{SelectionEngine, Transition, hidden, sweep};
use crate::model::{ValueKey, ValueKind};

impl SelectionEngine {
    /// React to a tap on the value `value_id` of the category at `category_index`.
    ///
    /// Unknown categories or ids leave the catalog untouched.
    pub fn select_value(&mut self, category_index: usize, value_id: &str) -> Transition {
        let Some(key) = self.catalog.find_value(category_index, value_id) else {
            debug!("no value {value_id:?} in category {category_index}");
            return Transition::unchanged();
        };
        let node = &self.catalog.arena()[key];
        let (kind, selected, overflow) = (node.kind(), node.is_selected(), node.requires_overflow_popup());
        let in_drill_down = self.catalog.categories()[category_index].is_drill_down();

        let transition = match kind {
            ValueKind::Button => return self.press_button(category_index),
            ValueKind::Hidden => hidden::toggle_chip(&mut self.catalog, self.mode, category_index, key),
            ValueKind::Total if in_drill_down => self.back_out(category_index),
            _ if selected && overflow => {
                let kind = self.catalog.categories()[category_index].kind();
                return Transition::picker(sweep::overflow_request(&self.catalog, kind, key));
            }
            _ if selected => self.deselect(category_index),
            ValueKind::Total => self.choose_total(category_index, key),
            ValueKind::Usual => self.choose_usual(category_index, key),
        };
        self.catalog.refresh_cells();
        transition
    }

    /// Prune the rows hanging off the category at `index`, then clear it.
    /// Returns the category's index after pruning.
    fn reset_tree(&mut self, index: usize, keep: Option<&str>) -> Option<usize> {
        let name = self.catalog.categories()[index].name().to_string();
        let mut ids = sweep::owned_tree_ids(&self.catalog, index);
        if let Some(keep) = keep {
            ids.remove(keep);
        }
        sweep::prune_trees(&mut self.catalog, &ids);
        let index = self.catalog.position(&name)?;
        sweep::clear_selection(&mut self.catalog, index);
        Some(index)
    }

    fn deselect(&mut self, index: usize) -> Transition {
        let picker = self
            .reset_tree(index, None)
            .and_then(|index| sweep::apply_defaults(&mut self.catalog, index));
        sweep::remove_chip_rows(&mut self.catalog);
        sweep::remove_orphan_rows(&mut self.catalog);
        Transition::updated().with_picker(picker)
    }

    fn choose_total(&mut self, index: usize, key: ValueKey) -> Transition {
        let parent_id = self.catalog.arena()[key].parent_id().to_string();
        if self.reset_tree(index, Some(&parent_id)).is_some() {
            self.catalog.arena_mut().set_selected(key, true);
        }
        sweep::remove_chip_rows(&mut self.catalog);
        sweep::remove_orphan_rows(&mut self.catalog);
        Transition::updated()
    }

    fn choose_usual(&mut self, index: usize, key: ValueKey) -> Transition {
        let mut picker = None;
        if let Some(index) = self.reset_tree(index, None) {
            self.catalog.arena_mut().set_selected(key, true);
            picker = sweep::open_drill_down(&mut self.catalog, index, key);
        }
        sweep::remove_chip_rows(&mut self.catalog);
        sweep::remove_orphan_rows(&mut self.catalog);
        Transition::updated().with_picker(picker)
    }

    /// Total tapped inside a drill-down row: collapse the row and return the
    /// category holding its owner to its defaults.
    fn back_out(&mut self, index: usize) -> Transition {
        let Some(owner) = self.catalog.categories()[index].owner() else {
            return Transition::unchanged();
        };
        let Some(owner_index) = self.catalog.category_of(owner) else {
            let key = self.catalog.categories()[index].total(self.catalog.arena());
            return match key {
                Some(key) => self.choose_total(index, key),
                None => Transition::unchanged(),
            };
        };

        let owner_id = self.catalog.arena()[owner].id().to_string();
        let name = self.catalog.categories()[owner_index].name().to_string();
        let mut ids = sweep::owned_tree_ids(&self.catalog, owner_index);
        ids.insert(owner_id);
        sweep::prune_trees(&mut self.catalog, &ids);

        let mut picker = None;
        if let Some(owner_index) = self.catalog.position(&name) {
            sweep::clear_selection(&mut self.catalog, owner_index);
            picker = sweep::apply_defaults(&mut self.catalog, owner_index);
        }
        sweep::remove_chip_rows(&mut self.catalog);
        sweep::remove_orphan_rows(&mut self.catalog);
        Transition::updated().with_picker(picker)
    }
}
