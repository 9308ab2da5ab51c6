//! Catalog-wide sweeps shared by the selection operations.
//!
//! These are free functions over a [`Catalog`] so each step of a cascade can be
//! exercised on its own. None of them refresh cells; the calling operation
//! does that once at the end.

use std::collections::BTreeSet;

use log::trace;

use super::picker::PickerRequest;
use crate::model::{Catalog, Category, CategoryKind, ValueKey, ValueKind};

/// Non-empty ids reachable through selected values of the category at `index`.
#[must_use]
pub fn owned_tree_ids(catalog: &Catalog, index: usize) -> BTreeSet<String> {
    let Some(category) = catalog.category(index) else {
        return BTreeSet::new();
    };
    let mut ids = Vec::new();
    for &key in category.values() {
        catalog.arena().selected_tree_ids(key, &mut ids);
    }
    ids.into_iter().filter(|id| !id.is_empty()).collect()
}

/// Remove every drill-down row named by `ids`.
///
/// Values of a removed row are reset so that only their Total stays selected.
/// Returns the number of rows removed.
pub fn prune_trees(catalog: &mut Catalog, ids: &BTreeSet<String>) -> usize {
    if ids.is_empty() {
        return 0;
    }
    let mut released = Vec::new();
    catalog.categories_mut().retain(|category| {
        let stale = category.is_drill_down() && ids.contains(category.name());
        if stale {
            trace!("pruning drill-down row {}", category.name());
            released.push(category.values().to_vec());
        }
        !stale
    });
    let removed = released.len();
    release_values(catalog, released);
    removed
}

fn release_values(catalog: &mut Catalog, released: Vec<Vec<ValueKey>>) {
    let arena = catalog.arena_mut();
    for key in released.into_iter().flatten() {
        let keep = arena[key].kind() == ValueKind::Total;
        arena.set_selected(key, keep);
    }
}

/// Remove drill-down rows that no longer belong on screen.
///
/// A row is an orphan when its value list is empty, when its owner value is
/// no longer selected or no longer listed anywhere, or when it holds only
/// Hidden values and none of them is selected.
pub fn remove_orphan_rows(catalog: &mut Catalog) -> usize {
    let orphaned: Vec<bool> = catalog
        .categories()
        .iter()
        .map(|category| is_orphan(catalog, category))
        .collect();
    if !orphaned.contains(&true) {
        return 0;
    }

    let mut released = Vec::new();
    let mut flags = orphaned.into_iter();
    catalog.categories_mut().retain(|category| {
        let orphan = flags.next().unwrap_or(false);
        if orphan {
            trace!("removing orphaned row {}", category.name());
            released.push(category.values().to_vec());
        }
        !orphan
    });
    let removed = released.len();
    release_values(catalog, released);
    removed
}

fn is_orphan(catalog: &Catalog, category: &Category) -> bool {
    let Some(owner) = category.owner() else {
        return false;
    };
    if category.values().is_empty() {
        return true;
    }
    let arena = catalog.arena();
    let anchored = arena[owner].is_selected() && catalog.category_of(owner).is_some();
    if !anchored {
        return true;
    }
    let hidden_only = category
        .values()
        .iter()
        .all(|&key| arena[key].kind() == ValueKind::Hidden);
    hidden_only && !category.has_selection(arena)
}

/// Remove every drill-down row made only of Hidden values, deselecting its chips.
///
/// Runs across the whole catalog. Returns the number of rows removed.
pub fn remove_chip_rows(catalog: &mut Catalog) -> usize {
    let chip_rows: Vec<bool> = catalog
        .categories()
        .iter()
        .map(|category| is_chip_row(catalog, category))
        .collect();
    if !chip_rows.contains(&true) {
        return 0;
    }

    let mut chips = Vec::new();
    let mut flags = chip_rows.into_iter();
    catalog.categories_mut().retain(|category| {
        let chip_row = flags.next().unwrap_or(false);
        if chip_row {
            trace!("removing chip row {}", category.name());
            chips.push(category.values().to_vec());
        }
        !chip_row
    });
    let removed = chips.len();
    let arena = catalog.arena_mut();
    for key in chips.into_iter().flatten() {
        arena.set_selected(key, false);
    }
    removed
}

fn is_chip_row(catalog: &Catalog, category: &Category) -> bool {
    let arena = catalog.arena();
    category.is_drill_down()
        && !category.values().is_empty()
        && category
            .values()
            .iter()
            .all(|&key| arena[key].kind() == ValueKind::Hidden)
}

/// Clear every top-level selection of the category at `index`.
pub fn clear_selection(catalog: &mut Catalog, index: usize) {
    let Some(category) = catalog.category(index) else {
        return;
    };
    let values = category.values().to_vec();
    for key in values {
        catalog.arena_mut().set_selected(key, false);
    }
}

/// Select the first Total value of the category at `index`.
pub fn select_total(catalog: &mut Catalog, index: usize) {
    let total = catalog
        .category(index)
        .and_then(|category| category.total(catalog.arena()));
    if let Some(total) = total {
        catalog.arena_mut().set_selected(total, true);
    }
}

/// Re-apply the default selection of the category at `index`.
///
/// Without default ids the Total value is selected. Otherwise every Hidden
/// value listed as a default is selected along with the first listed
/// Total/Usual value, whose drill-down is reopened. Returns a picker request
/// when that drill-down is too sparse to show inline.
pub fn apply_defaults(catalog: &mut Catalog, index: usize) -> Option<PickerRequest> {
    let category = catalog.category(index)?;
    let defaults = category.default_selected_ids().clone();
    if defaults.is_empty() {
        select_total(catalog, index);
        return None;
    }

    let mut exclusive = None;
    for key in category.values().to_vec() {
        let node = &catalog.arena()[key];
        if !defaults.contains(node.id()) {
            continue;
        }
        match node.kind() {
            ValueKind::Hidden => catalog.arena_mut().set_selected(key, true),
            ValueKind::Total | ValueKind::Usual if exclusive.is_none() => {
                catalog.arena_mut().set_selected(key, true);
                exclusive = Some(key);
            }
            _ => {}
        }
    }

    match exclusive {
        Some(key) => open_selected_chain(catalog, index, key),
        None => {
            select_total(catalog, index);
            None
        }
    }
}

/// Show the children of the selected value `key`, which lives in the
/// category at `index`.
///
/// With fewer than two Total/Usual children the options go to the overflow
/// picker instead and the catalog is left as is. Otherwise a drill-down row
/// named after the value's id is inserted right after `index`.
pub fn open_drill_down(catalog: &mut Catalog, index: usize, key: ValueKey) -> Option<PickerRequest> {
    let node = catalog.value(key)?;
    if node.is_leaf() {
        return None;
    }
    let eligible = node
        .children()
        .iter()
        .filter(|&&child| catalog.arena()[child].kind().is_exclusive())
        .count();
    let kind = catalog
        .category(index)
        .map_or(CategoryKind::RemoteFilter, Category::kind);
    if eligible < 2 {
        return Some(overflow_request(catalog, kind, key));
    }

    let name = node.id().to_string();
    let children = node.children().to_vec();
    let mut index = index;
    let mut position = 0;
    catalog.categories_mut().retain(|category| {
        let stale = category.owner() == Some(key);
        if stale && position < index {
            index -= 1;
        }
        position += 1;
        !stale
    });

    let at = (index + 1).min(catalog.len());
    trace!("opening drill-down row {name} at {at}");
    catalog
        .categories_mut()
        .insert(at, Category::drill_down(key, name, kind, children));
    None
}

/// Open the drill-down of `key` and keep following selected children that
/// have options of their own. Returns the first picker request met on the way.
pub fn open_selected_chain(catalog: &mut Catalog, index: usize, key: ValueKey) -> Option<PickerRequest> {
    if let Some(request) = open_drill_down(catalog, index, key) {
        return Some(request);
    }
    let row = catalog
        .categories()
        .iter()
        .position(|category| category.owner() == Some(key))?;
    let next = catalog.arena()[key]
        .children()
        .iter()
        .copied()
        .find(|&child| {
            let node = &catalog.arena()[child];
            node.is_selected() && node.kind() == ValueKind::Usual && !node.is_leaf()
        })?;
    open_selected_chain(catalog, row, next)
}

/// Picker for the children of `key`, seeded with its selected non-Total children.
#[must_use]
pub fn overflow_request(catalog: &Catalog, kind: CategoryKind, key: ValueKey) -> PickerRequest {
    let arena = catalog.arena();
    let node = &arena[key];
    let preselected = node
        .children()
        .iter()
        .copied()
        .filter(|&child| arena[child].is_selected() && arena[child].kind() != ValueKind::Total)
        .collect();
    PickerRequest {
        revision: catalog.revision(),
        category: node.id().to_string(),
        kind,
        title: node.name().to_string(),
        values: node.children().to_vec(),
        parent: Some(key),
        preselected,
        images: catalog.images().to_vec(),
    }
}
