//! Serialized shapes exchanged with filter loaders.
//!
//! Field names follow the camelCase payload served by the catalog backend.
//! Missing fields fall back to their defaults so partial payloads still decode.

use serde::{Deserialize, Serialize};

use crate::model::{ImageRef, ValueKind};

/// One value of a category as delivered by a loader, with its nested options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueItem {
    pub item_id: String,
    pub name: String,
    pub parent_item_id: String,
    pub item_type: u8,
    pub children: Vec<ValueItem>,
}

impl ValueItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            item_id: id.into(),
            name: name.into(),
            parent_item_id: String::new(),
            item_type: kind.code(),
            children: Vec::new(),
        }
    }

    /// The neutral "everything" option, identified by an empty id.
    pub fn total(name: impl Into<String>) -> Self {
        Self::new("", name, ValueKind::Total)
    }

    pub fn usual(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ValueKind::Usual)
    }

    pub fn hidden(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ValueKind::Hidden)
    }

    pub fn button(name: impl Into<String>) -> Self {
        Self::new("", name, ValueKind::Button)
    }

    /// Attach nested options. Children without an explicit parent inherit this item's id.
    #[must_use]
    pub fn with_children(mut self, children: Vec<ValueItem>) -> Self {
        self.children = children
            .into_iter()
            .map(|mut child| {
                if child.parent_item_id.is_empty() {
                    child.parent_item_id = self.item_id.clone();
                }
                child
            })
            .collect();
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_item_id = parent_id.into();
        self
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        ValueKind::from_code(self.item_type)
    }
}

/// A category as delivered by a loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryItem {
    pub name: String,
    pub selected_filter_ids: Vec<String>,
    pub values: Vec<ValueItem>,
}

impl CategoryItem {
    pub fn new(name: impl Into<String>, values: Vec<ValueItem>) -> Self {
        Self {
            name: name.into(),
            selected_filter_ids: Vec::new(),
            values,
        }
    }

    #[must_use]
    pub fn with_defaults<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_filter_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Complete payload answered by a loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiltersResponse {
    #[serde(alias = "remoteFilters")]
    pub filters: Vec<CategoryItem>,
    pub image_mapping: Vec<ImageRef>,
}
