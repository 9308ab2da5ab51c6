use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryKind};
use super::value::{ValueArena, ValueKey, ValueNode};
use crate::wire::CategoryItem;

/// Featured artwork attached to a value id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "imageRef", alias = "imageCode", default)]
    pub image_ref: String,
}

/// The ordered list of categories currently on screen and the values behind them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    arena: ValueArena,
    categories: Vec<Category>,
    images: Vec<ImageRef>,
    revision: u64,
}

impl Catalog {
    /// Build a catalog from loader payloads: remote filter categories first,
    /// local parameter categories after them.
    pub(crate) fn build(
        remote: &[CategoryItem],
        parameters: &[CategoryItem],
        images: Vec<ImageRef>,
        revision: u64,
    ) -> Self {
        let mut catalog = Self {
            arena: ValueArena::default(),
            categories: Vec::with_capacity(remote.len() + parameters.len()),
            images,
            revision,
        };
        for item in remote {
            catalog.push_root(item, CategoryKind::RemoteFilter);
        }
        for item in parameters {
            catalog.push_root(item, CategoryKind::LocalParameter);
        }
        catalog.refresh_cells();
        catalog
    }

    fn push_root(&mut self, item: &CategoryItem, kind: CategoryKind) {
        let defaults: IndexSet<String> = item.selected_filter_ids.iter().cloned().collect();
        let values: Vec<ValueKey> = item
            .values
            .iter()
            .map(|value| self.arena.insert_tree(value, &defaults))
            .collect();
        for &value in &values {
            self.arena.settle_child_defaults(value);
        }
        self.categories
            .push(Category::root(item.name.clone(), kind, values, defaults));
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn arena(&self) -> &ValueArena {
        &self.arena
    }

    #[must_use]
    pub fn value(&self, key: ValueKey) -> Option<&ValueNode> {
        self.arena.get(key)
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Incremented every time the catalog is rebuilt or cleared.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Index of the category called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| category.name() == name)
    }

    /// Key of the value with `id` inside the category at `index`.
    #[must_use]
    pub fn find_value(&self, index: usize, id: &str) -> Option<ValueKey> {
        self.categories
            .get(index)?
            .values()
            .iter()
            .copied()
            .find(|&key| self.arena[key].id() == id)
    }

    /// Index of the first category listing `key` among its values.
    #[must_use]
    pub fn category_of(&self, key: ValueKey) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| category.values().contains(&key))
    }

    pub(crate) fn categories_mut(&mut self) -> &mut Vec<Category> {
        &mut self.categories
    }

    pub(crate) fn arena_mut(&mut self) -> &mut ValueArena {
        &mut self.arena
    }

    /// Recompute the display cells of every category.
    pub fn refresh_cells(&mut self) {
        let arena = &self.arena;
        for category in &mut self.categories {
            category.refresh_cells(arena);
        }
    }
}
