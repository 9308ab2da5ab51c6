use super::value::{ValueArena, ValueKey, ValueKind};

/// Display-ready projection of one value of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// A regular tappable option.
    Plain(ValueKey),
    /// A selected chip that can be dismissed.
    Closable(ValueKey),
    /// Opens the overflow picker for the category.
    Button { title: String },
}

impl Cell {
    #[must_use]
    pub fn value(&self) -> Option<ValueKey> {
        match self {
            Self::Plain(key) | Self::Closable(key) => Some(*key),
            Self::Button { .. } => None,
        }
    }

    /// Project the values of a category into cells.
    ///
    /// Order follows `values`. Unselected Hidden values are skipped.
    pub(crate) fn project(arena: &ValueArena, values: &[ValueKey]) -> Vec<Cell> {
        values
            .iter()
            .filter_map(|&key| {
                let node = &arena[key];
                match node.kind() {
                    ValueKind::Hidden if node.is_selected() => Some(Cell::Closable(key)),
                    ValueKind::Hidden => None,
                    ValueKind::Total | ValueKind::Usual => Some(Cell::Plain(key)),
                    ValueKind::Button => Some(Cell::Button {
                        title: node.name().to_string(),
                    }),
                }
            })
            .collect()
    }
}
