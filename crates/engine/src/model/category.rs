use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::value::{ValueArena, ValueKey, ValueKind};

/// Whether a category feeds the remote filter query or the local parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    RemoteFilter,
    LocalParameter,
}

/// Where a category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOrigin {
    /// Delivered by a loader or the local parameter source.
    Root,
    /// Opened for the children of `owner`, which lives in another category.
    DrillDown { owner: ValueKey },
}

/// A named group of values displayed as one row.
///
/// Two categories are the same entity when their names match.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    kind: CategoryKind,
    origin: CategoryOrigin,
    pub(crate) values: Vec<ValueKey>,
    default_selected_ids: IndexSet<String>,
    cells: Vec<Cell>,
}

impl Category {
    pub(crate) fn root(
        name: String,
        kind: CategoryKind,
        values: Vec<ValueKey>,
        default_selected_ids: IndexSet<String>,
    ) -> Self {
        Self {
            name,
            kind,
            origin: CategoryOrigin::Root,
            values,
            default_selected_ids,
            cells: Vec::new(),
        }
    }

    /// A drill-down row is named after its owner's id and has no defaults of its own.
    pub(crate) fn drill_down(owner: ValueKey, name: String, kind: CategoryKind, values: Vec<ValueKey>) -> Self {
        Self {
            name,
            kind,
            origin: CategoryOrigin::DrillDown { owner },
            values,
            default_selected_ids: IndexSet::new(),
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    #[must_use]
    pub fn origin(&self) -> CategoryOrigin {
        self.origin
    }

    #[must_use]
    pub fn owner(&self) -> Option<ValueKey> {
        match self.origin {
            CategoryOrigin::DrillDown { owner } => Some(owner),
            CategoryOrigin::Root => None,
        }
    }

    #[must_use]
    pub fn is_drill_down(&self) -> bool {
        matches!(self.origin, CategoryOrigin::DrillDown { .. })
    }

    #[must_use]
    pub fn values(&self) -> &[ValueKey] {
        &self.values
    }

    #[must_use]
    pub fn default_selected_ids(&self) -> &IndexSet<String> {
        &self.default_selected_ids
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The first Total value of the category.
    #[must_use]
    pub fn total(&self, arena: &ValueArena) -> Option<ValueKey> {
        self.values
            .iter()
            .copied()
            .find(|&key| arena[key].kind() == ValueKind::Total)
    }

    #[must_use]
    pub fn has_selection(&self, arena: &ValueArena) -> bool {
        self.values.iter().any(|&key| arena[key].is_selected())
    }

    pub(crate) fn refresh_cells(&mut self, arena: &ValueArena) {
        self.cells = Cell::project(arena, &self.values);
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Category {}
