use fltr_engine::{Catalog, Cell};

use super::App;
use crate::layout::LayoutState;

/// A focusable cell: the category it belongs to and its position among that category's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Target {
    pub category: usize,
    pub cell: usize,
}

fn is_active(catalog: &Catalog, cell: &Cell) -> bool {
    match cell {
        Cell::Closable(_) => true,
        Cell::Plain(key) => catalog.value(*key).is_some_and(|node| node.is_selected()),
        Cell::Button { .. } => false,
    }
}

/// Focusable cells grouped into the lines `layout` draws.
pub(crate) fn lines_for(catalog: &Catalog, layout: LayoutState) -> Vec<Vec<Target>> {
    let every = |category: usize| {
        (0..catalog.categories()[category].cells().len()).map(move |cell| Target { category, cell })
    };
    match layout {
        LayoutState::Expanded => (0..catalog.len())
            .map(|category| every(category).collect())
            .collect(),
        LayoutState::Landscape => {
            let line: Vec<Target> = (0..catalog.len()).flat_map(every).collect();
            if line.is_empty() { Vec::new() } else { vec![line] }
        }
        LayoutState::Minimized => {
            let line: Vec<Target> = (0..catalog.len())
                .flat_map(every)
                .filter(|target| {
                    is_active(catalog, &catalog.categories()[target.category].cells()[target.cell])
                })
                .collect();
            if line.is_empty() { Vec::new() } else { vec![line] }
        }
    }
}

impl App {
    pub(crate) fn lines(&self) -> Vec<Vec<Target>> {
        if self.session.is_loading() {
            return Vec::new();
        }
        lines_for(self.session.engine().catalog(), self.layout)
    }

    pub(crate) fn focused(&self) -> Option<Target> {
        let lines = self.lines();
        lines.get(self.focus.0)?.get(self.focus.1).copied()
    }

    /// Keep the focus on an existing cell after the catalog or layout changed.
    pub(crate) fn clamp_focus(&mut self) {
        let lines = self.lines();
        if lines.is_empty() {
            self.focus = (0, 0);
            return;
        }
        let line = self.focus.0.min(lines.len() - 1);
        let cell = self.focus.1.min(lines[line].len().saturating_sub(1));
        self.focus = (line, cell);
    }

    pub(crate) fn move_up(&mut self) {
        self.focus.0 = self.focus.0.saturating_sub(1);
        self.clamp_focus();
    }

    pub(crate) fn move_down(&mut self) {
        self.focus.0 = self.focus.0.saturating_add(1);
        self.clamp_focus();
    }

    pub(crate) fn move_left(&mut self) {
        self.focus.1 = self.focus.1.saturating_sub(1);
        self.clamp_focus();
    }

    pub(crate) fn move_right(&mut self) {
        self.focus.1 = self.focus.1.saturating_add(1);
        self.clamp_focus();
    }
}
