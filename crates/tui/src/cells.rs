//! Turning category cells into styled terminal spans.

use fltr_engine::{Catalog, Category, Cell, ValueKind};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

const CLOSE_MARK: &str = "×";
const BUTTON_MARK: &str = "…";
const GAP: usize = 1;

/// Text shown for a cell, without padding.
#[must_use]
pub fn cell_label(catalog: &Catalog, cell: &Cell) -> String {
    match cell {
        Cell::Plain(key) => catalog
            .value(*key)
            .map(|node| node.name().to_string())
            .unwrap_or_default(),
        Cell::Closable(key) => catalog
            .value(*key)
            .map(|node| format!("{} {CLOSE_MARK}", node.name()))
            .unwrap_or_default(),
        Cell::Button { title } => format!("{title} {BUTTON_MARK}"),
    }
}

#[must_use]
pub fn cell_style(theme: &Theme, catalog: &Catalog, cell: &Cell) -> Style {
    match cell {
        Cell::Button { .. } => theme.button,
        Cell::Closable(_) => theme.chip,
        Cell::Plain(key) => match catalog.value(*key) {
            Some(node) if node.is_selected() && node.kind() == ValueKind::Hidden => theme.chip,
            Some(node) if node.is_selected() => theme.selected,
            _ => theme.cell,
        },
    }
}

fn padded(label: &str) -> String {
    format!(" {label} ")
}

/// First cell to draw so that the cell at `focus` ends inside `width` columns.
#[must_use]
pub fn first_visible(widths: &[usize], focus: usize, width: usize) -> usize {
    let focus = focus.min(widths.len().saturating_sub(1));
    let mut start = 0;
    while start < focus {
        let used: usize = widths[start..=focus].iter().sum::<usize>() + GAP * (focus - start);
        if used <= width {
            break;
        }
        start += 1;
    }
    start
}

/// Render the cells of `category` into one line, scrolled to keep `focus` visible.
pub fn row_line(
    theme: &Theme,
    catalog: &Catalog,
    category: &Category,
    focus: Option<usize>,
    width: u16,
) -> Line<'static> {
    let cells = category.cells();
    if cells.is_empty() {
        return Line::from(Span::styled(" nothing to choose ".to_string(), theme.empty));
    }

    let labels: Vec<String> = cells
        .iter()
        .map(|cell| padded(&cell_label(catalog, cell)))
        .collect();
    let widths: Vec<usize> = labels.iter().map(|label| label.width()).collect();
    let start = focus.map_or(0, |focus| first_visible(&widths, focus, usize::from(width)));

    let mut spans = Vec::with_capacity(cells.len() * 2);
    if start > 0 {
        spans.push(Span::styled("‹".to_string(), theme.label));
    }
    for (index, (cell, label)) in cells.iter().zip(labels).enumerate().skip(start) {
        let mut style = cell_style(theme, catalog, cell);
        if focus == Some(index) {
            style = style.patch(theme.focus);
        }
        if index > start {
            spans.push(Span::raw(" ".repeat(GAP)));
        }
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}
