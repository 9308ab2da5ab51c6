//! Chip toggling for Hidden values.

use log::trace;

use super::{DrillDownMode, PickerRequest, Transition, sweep};
use crate::model::{Catalog, ValueKey, ValueKind};

/// Toggle the Hidden value `key` listed in the category at `index`.
///
/// Selecting a chip never touches its siblings. Dismissing one depends on the
/// mode: replace-in-place only deselects it, while row-per-drill-down consumes
/// it and collapses the row once the last chip is gone.
pub(super) fn toggle_chip(catalog: &mut Catalog, mode: DrillDownMode, index: usize, key: ValueKey) -> Transition {
    if !catalog.arena()[key].is_selected() {
        catalog.arena_mut().set_selected(key, true);
        return Transition::updated();
    }
    catalog.arena_mut().set_selected(key, false);

    let picker = match mode {
        DrillDownMode::ReplaceInPlace => {
            let arena = catalog.arena();
            let chips_left = catalog.categories()[index]
                .values()
                .iter()
                .any(|&value| arena[value].kind() == ValueKind::Hidden && arena[value].is_selected());
            if chips_left {
                None
            } else {
                sweep::clear_selection(catalog, index);
                sweep::apply_defaults(catalog, index)
            }
        }
        DrillDownMode::RowPerDrillDown => consume_chip(catalog, index, key),
    };
    sweep::remove_orphan_rows(catalog);
    Transition::updated().with_picker(picker)
}

fn consume_chip(catalog: &mut Catalog, index: usize, key: ValueKey) -> Option<PickerRequest> {
    catalog.categories_mut()[index]
        .values
        .retain(|&value| value != key);

    if !catalog.categories()[index].values().is_empty() {
        if catalog.categories()[index].has_selection(catalog.arena()) {
            return None;
        }
        return sweep::apply_defaults(catalog, index);
    }

    let removed = catalog.categories_mut().remove(index);
    trace!("chip row {} emptied", removed.name());

    let parent_id = catalog.arena()[key].parent_id().to_string();
    if parent_id.is_empty() {
        return None;
    }
    let owner = (0..catalog.len()).find(|&candidate| catalog.find_value(candidate, &parent_id).is_some())?;
    let name = catalog.categories()[owner].name().to_string();
    let ids = sweep::owned_tree_ids(catalog, owner);
    sweep::prune_trees(catalog, &ids);
    let owner = catalog.position(&name)?;
    sweep::clear_selection(catalog, owner);
    sweep::select_total(catalog, owner);
    None
}
