//! Presentation states of the filter bar and the height it asks for.

use std::fmt;
use std::str::FromStr;

/// Terminal rows used by one category in the expanded layout.
pub const ROW_HEIGHT: u16 = 1;
/// Terminal rows used by the single summary line of the compact layouts.
pub const COMPACT_HEIGHT: u16 = 1;
/// Terminal rows used by the placeholder shown while filters load.
pub const SKELETON_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutState {
    /// One line per category.
    #[default]
    Expanded,
    /// One line holding only the active choices.
    Minimized,
    /// One wide line holding every choice.
    Landscape,
}

impl LayoutState {
    /// The state the expand affordance switches to.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Minimized,
            Self::Minimized => Self::Expanded,
            Self::Landscape => Self::Landscape,
        }
    }

    #[must_use]
    pub fn is_compact(self) -> bool {
        !matches!(self, Self::Expanded)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::Minimized => "minimized",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for LayoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutState {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expanded" => Ok(Self::Expanded),
            "minimized" | "compact" => Ok(Self::Minimized),
            "landscape" => Ok(Self::Landscape),
            other => Err(format!("unknown layout `{other}`")),
        }
    }
}

/// Height the rows of `state` would like to occupy.
#[must_use]
pub fn preferred_height(state: LayoutState, loading: bool, rows: usize) -> u16 {
    if loading {
        return SKELETON_HEIGHT;
    }
    match state {
        LayoutState::Expanded => {
            let rows = u16::try_from(rows).unwrap_or(u16::MAX);
            rows.saturating_mul(ROW_HEIGHT)
        }
        LayoutState::Minimized | LayoutState::Landscape => COMPACT_HEIGHT,
    }
}

/// Whether to offer switching between the expanded and minimized layouts.
///
/// Shown when the expanded rows do not fit into `available` lines. Landscape
/// never offers it.
#[must_use]
pub fn needs_expand_affordance(state: LayoutState, rows: usize, available: u16) -> bool {
    state != LayoutState::Landscape && preferred_height(LayoutState::Expanded, false, rows) > available
}
