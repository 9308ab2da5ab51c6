//! Colour themes for the filter bar.

use ratatui::style::{Color, Modifier, Style};

/// Styles used across the filter rows, the picker and the chrome around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header: Style,
    pub label: Style,
    pub cell: Style,
    pub selected: Style,
    pub chip: Style,
    pub button: Style,
    pub focus: Style,
    pub empty: Style,
    pub prompt: Style,
}

pub const SLATE: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .add_modifier(Modifier::BOLD),
    label: Style::new().fg(Color::Rgb(148, 163, 184)),
    cell: Style::new()
        .fg(Color::Rgb(203, 213, 225))
        .bg(Color::Rgb(30, 41, 59)),
    selected: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(125, 211, 252))
        .add_modifier(Modifier::BOLD),
    chip: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(253, 186, 116)),
    button: Style::new()
        .fg(Color::Rgb(125, 211, 252))
        .add_modifier(Modifier::UNDERLINED),
    focus: Style::new().add_modifier(Modifier::REVERSED),
    empty: Style::new().fg(Color::Rgb(100, 116, 139)),
    prompt: Style::new().fg(Color::Rgb(56, 189, 248)),
};

pub const LIGHT: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .add_modifier(Modifier::BOLD),
    label: Style::new().fg(Color::Rgb(71, 85, 105)),
    cell: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(226, 232, 240)),
    selected: Style::new()
        .fg(Color::Rgb(255, 255, 255))
        .bg(Color::Rgb(0, 102, 153))
        .add_modifier(Modifier::BOLD),
    chip: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(250, 204, 21)),
    button: Style::new()
        .fg(Color::Rgb(0, 102, 153))
        .add_modifier(Modifier::UNDERLINED),
    focus: Style::new().add_modifier(Modifier::REVERSED),
    empty: Style::new().fg(Color::Rgb(100, 100, 100)),
    prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
};

pub const MONO: Theme = Theme {
    header: Style::new().add_modifier(Modifier::BOLD),
    label: Style::new().add_modifier(Modifier::DIM),
    cell: Style::new(),
    selected: Style::new().add_modifier(Modifier::BOLD.union(Modifier::UNDERLINED)),
    chip: Style::new().add_modifier(Modifier::ITALIC),
    button: Style::new().add_modifier(Modifier::UNDERLINED),
    focus: Style::new().add_modifier(Modifier::REVERSED),
    empty: Style::new().add_modifier(Modifier::DIM),
    prompt: Style::new().add_modifier(Modifier::BOLD),
};

const BUILTINS: [(&str, Theme); 3] = [("slate", SLATE), ("light", LIGHT), ("mono", MONO)];

impl Default for Theme {
    fn default() -> Self {
        SLATE
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Look up a built-in theme, ignoring case and surrounding whitespace.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    let normalized = normalize_name(name);
    BUILTINS
        .iter()
        .find(|(candidate, _)| *candidate == normalized)
        .map(|(_, theme)| *theme)
}

/// Names of the built-in themes, sorted.
#[must_use]
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = BUILTINS.iter().map(|(name, _)| (*name).to_string()).collect();
    names.sort_unstable();
    names
}
