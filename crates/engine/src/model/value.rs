use std::ops::Index;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::wire::ValueItem;

/// Selection semantics attached to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Neutral option that stands for "no restriction" in its category.
    Total,
    /// Regular option. Mutually exclusive with the other Total/Usual values.
    Usual,
    /// Chip-style option that is only shown while selected.
    Hidden,
    /// Pseudo-value that opens the overflow picker for its category.
    Button,
}

impl ValueKind {
    /// Decode the integer used by loader payloads. Unknown codes are treated as [`ValueKind::Usual`].
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => Self::Hidden,
            3 => Self::Total,
            4 => Self::Button,
            _ => Self::Usual,
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Usual => 1,
            Self::Hidden => 2,
            Self::Total => 3,
            Self::Button => 4,
        }
    }

    /// Total and Usual values share a single selection slot per category.
    #[must_use]
    pub fn is_exclusive(self) -> bool {
        matches!(self, Self::Total | Self::Usual)
    }
}

/// Stable handle to a node stored in a [`ValueArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueKey(usize);

impl ValueKey {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueNode {
    pub(crate) id: String,
    pub(crate) parent_id: String,
    pub(crate) name: String,
    pub(crate) kind: ValueKind,
    pub(crate) children: Vec<ValueKey>,
    pub(crate) selected: bool,
    pub(crate) requires_overflow_popup: bool,
}

impl ValueNode {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub fn children(&self) -> &[ValueKey] {
        &self.children
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Usual values whose options include Hidden leaves are edited through the
    /// overflow picker once they are selected.
    #[must_use]
    pub fn requires_overflow_popup(&self) -> bool {
        self.requires_overflow_popup
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Owner of every value node in a catalog.
///
/// Categories and drill-down rows refer to nodes by [`ValueKey`], so a row
/// opened for a value shares its nodes with the value's children. Nodes are
/// never removed while the arena lives; a reload builds a new arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueArena {
    nodes: Vec<ValueNode>,
}

impl ValueArena {
    #[must_use]
    pub fn get(&self, key: ValueKey) -> Option<&ValueNode> {
        self.nodes.get(key.0)
    }

    #[must_use]
    pub fn contains(&self, key: ValueKey) -> bool {
        key.0 < self.nodes.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn set_selected(&mut self, key: ValueKey, selected: bool) {
        if let Some(node) = self.nodes.get_mut(key.0) {
            node.selected = selected;
        }
    }

    /// Store `item` and its descendants.
    ///
    /// A node starts selected when its id is one of `defaults`, or when it is a
    /// Total (empty id) and the category declares no defaults at all. Buttons
    /// never carry a selection.
    pub(crate) fn insert_tree(&mut self, item: &ValueItem, defaults: &IndexSet<String>) -> ValueKey {
        let children: Vec<ValueKey> = item
            .children
            .iter()
            .map(|child| self.insert_tree(child, defaults))
            .collect();
        let kind = item.kind();
        let requires_overflow_popup = kind == ValueKind::Usual
            && children
                .iter()
                .any(|&child| self[child].is_leaf() && self[child].kind == ValueKind::Hidden);
        let selected = match kind {
            ValueKind::Button => false,
            ValueKind::Total if item.item_id.is_empty() => defaults.is_empty() || defaults.contains(""),
            _ => defaults.contains(&item.item_id),
        };

        let key = ValueKey(self.nodes.len());
        self.nodes.push(ValueNode {
            id: item.item_id.clone(),
            parent_id: item.parent_item_id.clone(),
            name: item.name.clone(),
            kind,
            children,
            selected,
            requires_overflow_popup,
        });
        key
    }

    /// Give every node with options a usable child selection.
    ///
    /// When no child of a node is selected by a default id, the Total child is
    /// selected and every other child is cleared.
    pub(crate) fn settle_child_defaults(&mut self, key: ValueKey) {
        let children = self[key].children.clone();
        if children.is_empty() {
            return;
        }
        let has_explicit_default = children
            .iter()
            .any(|&child| self[child].selected && !self[child].id.is_empty());
        if !has_explicit_default {
            for &child in &children {
                let is_total = self[child].kind == ValueKind::Total;
                self.set_selected(child, is_total);
            }
        }
        for child in children {
            self.settle_child_defaults(child);
        }
    }

    /// Clear the children of `key` and select its Total child, if it has one.
    pub(crate) fn reset_children(&mut self, key: ValueKey) {
        let children = self[key].children.clone();
        for child in children {
            let is_total = self[child].kind == ValueKind::Total;
            self.set_selected(child, is_total);
        }
    }

    /// Every id reachable from `key` through selected nodes, `key` included.
    ///
    /// Traversal stops at unselected nodes.
    pub(crate) fn selected_tree_ids(&self, key: ValueKey, out: &mut Vec<String>) {
        let node = &self[key];
        if !node.selected {
            return;
        }
        out.push(node.id.clone());
        for &child in &node.children {
            self.selected_tree_ids(child, out);
        }
    }
}

impl Index<ValueKey> for ValueArena {
    type Output = ValueNode;

    fn index(&self, key: ValueKey) -> &ValueNode {
        &self.nodes[key.0]
    }
}
