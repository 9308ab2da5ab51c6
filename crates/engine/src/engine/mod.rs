//! The selection state machine.
//!
//! Every public operation runs to completion synchronously: it either applies
//! its whole prune/insert/reselect cascade or, when a lookup fails, leaves the
//! catalog untouched. Cells are refreshed before an operation returns.

mod hidden;
mod picker;
mod query;
mod select;
pub mod sweep;

#[cfg(test)]
mod tests;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::{Catalog, ImageRef};
use crate::wire::CategoryItem;

pub use picker::{PickerRequest, PickerResult};

/// How a drill-down is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrillDownMode {
    /// Each drill-down, including picker chips, gets a row of its own.
    #[default]
    #[serde(alias = "new-row")]
    RowPerDrillDown,
    /// Picker chips are spliced into the row that holds their parent value.
    #[serde(alias = "replace")]
    ReplaceInPlace,
}

/// Outcome of an engine operation.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Transition {
    changed: bool,
    picker: Option<PickerRequest>,
}

impl Transition {
    pub(crate) fn unchanged() -> Self {
        Self::default()
    }

    pub(crate) fn updated() -> Self {
        Self {
            changed: true,
            picker: None,
        }
    }

    pub(crate) fn picker(request: PickerRequest) -> Self {
        Self {
            changed: false,
            picker: Some(request),
        }
    }

    pub(crate) fn with_picker(mut self, request: Option<PickerRequest>) -> Self {
        if request.is_some() {
            self.picker = request;
        }
        self
    }

    /// Whether the catalog was mutated.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Picker the host should present next, if any.
    #[must_use]
    pub fn picker_request(&self) -> Option<&PickerRequest> {
        self.picker.as_ref()
    }

    pub fn into_picker_request(self) -> Option<PickerRequest> {
        self.picker
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    catalog: Catalog,
    mode: DrillDownMode,
}

impl SelectionEngine {
    pub fn new(mode: DrillDownMode) -> Self {
        Self {
            catalog: Catalog::default(),
            mode,
        }
    }

    #[must_use]
    pub fn mode(&self) -> DrillDownMode {
        self.mode
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the catalog with one built from loader output.
    ///
    /// Categories whose default selection has children get their drill-down
    /// rows opened immediately, following nested defaults as deep as they go.
    /// A default whose options are too sparse for an inline row yields a picker
    /// request, as a tap on it would; the first such request is returned.
    pub fn initialize(
        &mut self,
        remote: &[CategoryItem],
        parameters: &[CategoryItem],
        images: Vec<ImageRef>,
    ) -> Transition {
        let revision = self.catalog.revision() + 1;
        self.catalog = Catalog::build(remote, parameters, images, revision);

        let roots: Vec<String> = self
            .catalog
            .categories()
            .iter()
            .map(|category| category.name().to_string())
            .collect();
        let mut pending = None;
        for name in roots {
            let Some(index) = self.catalog.position(&name) else {
                continue;
            };
            let selected = self.catalog.categories()[index]
                .values()
                .iter()
                .copied()
                .find(|&key| {
                    let node = &self.catalog.arena()[key];
                    node.is_selected() && node.kind().is_exclusive() && !node.is_leaf()
                });
            let Some(key) = selected else {
                continue;
            };
            if let Some(request) = sweep::open_selected_chain(&mut self.catalog, index, key) {
                if pending.is_none() {
                    debug!("default value of {name} needs the overflow picker for {}", request.category());
                    pending = Some(request);
                } else {
                    debug!("overflow picker for {} deferred", request.category());
                }
            }
        }

        self.catalog.refresh_cells();
        Transition::updated().with_picker(pending)
    }

    /// Drop every category, keeping the engine usable for a later reload.
    pub fn clear(&mut self) {
        let revision = self.catalog.revision() + 1;
        self.catalog = Catalog::build(&[], &[], Vec::new(), revision);
    }
}
