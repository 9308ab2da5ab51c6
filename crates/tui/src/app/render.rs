use fltr_engine::{Catalog, Category};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph};
use throbber_widgets_tui::Throbber;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerSmartWidget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::App;
use super::targets::Target;
use crate::cells::{cell_label, cell_style, first_visible, row_line};
use crate::layout::{LayoutState, needs_expand_affordance, preferred_height};
use crate::picker::{PickerEntry, PickerModel};
use crate::theme::Theme;

const MAX_LABEL_WIDTH: usize = 18;
const SKELETON: &str = "░░░░░░ ░░░░░░░░ ░░░░░ ░░░░░░░";

/// Row label: the category name, or the parent value a drill-down row refines.
fn category_label(catalog: &Catalog, category: &Category) -> String {
    match category.owner().and_then(|owner| catalog.value(owner)) {
        Some(owner) => format!("› {}", owner.name()),
        None => category.name().to_string(),
    }
}

impl App {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header, main, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let main = if self.show_logs {
            let [rows, logs] =
                Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(main);
            self.draw_logs(frame, logs);
            rows
        } else {
            main
        };
        self.body_height = main.height;

        self.draw_header(frame, header);
        self.draw_body(frame, main);
        self.draw_footer(frame, footer);

        if let Some(picker) = self.picker.as_ref() {
            draw_picker(frame, area, picker, &self.theme);
        }
    }

    fn row_count(&self) -> usize {
        self.session.engine().catalog().len()
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut line = Line::default();
        if self.session.is_loading() || self.session.is_pending() {
            let spinner = Throbber::default()
                .style(theme.label)
                .throbber_style(theme.prompt);
            line.spans.push(spinner.to_symbol_span(&self.throbber_state));
        }
        line.spans.push(Span::styled(self.title.clone(), theme.header));

        if !self.session.is_loading() && needs_expand_affordance(self.layout, self.row_count(), self.body_height)
        {
            let hint = match self.layout {
                LayoutState::Minimized => "  [tab] expand",
                _ => "  [tab] minimize",
            };
            line.spans.push(Span::styled(hint, theme.button));
        }
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_body(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let wanted = preferred_height(self.layout, self.session.is_loading(), self.row_count());
        let area = Rect {
            height: area.height.min(wanted.max(1)),
            ..area
        };

        if self.session.is_loading() {
            let line = Line::from(vec![
                Span::styled("Loading filters ", theme.label),
                Span::styled(SKELETON, theme.empty),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let catalog = self.session.engine().catalog();
        if catalog.is_empty() {
            let message = match self.session.last_error() {
                Some(error) => format!("No filters available: {error}"),
                None => "No filters available".to_string(),
            };
            frame.render_widget(Paragraph::new(Span::styled(message, theme.empty)), area);
            return;
        }

        match self.layout {
            LayoutState::Expanded => self.draw_rows(frame, area, catalog),
            LayoutState::Minimized | LayoutState::Landscape => self.draw_compact(frame, area, catalog),
        }
    }

    fn draw_rows(&self, frame: &mut Frame, area: Rect, catalog: &Catalog) {
        let labels: Vec<String> = catalog
            .categories()
            .iter()
            .map(|category| category_label(catalog, category))
            .collect();
        let label_width = labels
            .iter()
            .map(|label| label.width())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH);
        let cells_width = usize::from(area.width).saturating_sub(label_width + 1);
        let cells_width = u16::try_from(cells_width).unwrap_or(u16::MAX);

        let height = usize::from(area.height);
        let offset = (self.focus.0 + 1).saturating_sub(height);
        let lines: Vec<Line> = catalog
            .categories()
            .iter()
            .zip(labels)
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(index, (category, label))| {
                let focus = (index == self.focus.0).then_some(self.focus.1);
                let mut line = row_line(&self.theme, catalog, category, focus, cells_width);
                let label = fit(&label, label_width);
                let label_style = if focus.is_some() {
                    self.theme.header
                } else {
                    self.theme.label
                };
                line.spans.insert(0, Span::styled(format!("{label} "), label_style));
                line
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_compact(&self, frame: &mut Frame, area: Rect, catalog: &Catalog) {
        let theme = &self.theme;
        let targets: Vec<Target> = self.lines().into_iter().next().unwrap_or_default();
        if targets.is_empty() {
            let line = Span::styled("No active filters", theme.empty);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let mut segments: Vec<Vec<Span>> = Vec::with_capacity(targets.len());
        let mut previous = None;
        for (index, target) in targets.iter().enumerate() {
            let category = &catalog.categories()[target.category];
            let cell = &category.cells()[target.cell];
            let mut segment = Vec::new();
            if previous != Some(target.category) {
                let prefix = category_label(catalog, category).to_uppercase();
                segment.push(Span::styled(format!("{prefix} "), theme.label));
                previous = Some(target.category);
            }
            let mut style = cell_style(theme, catalog, cell);
            if self.focus == (0, index) {
                style = style.patch(theme.focus);
            }
            segment.push(Span::styled(format!(" {} ", cell_label(catalog, cell)), style));
            segments.push(segment);
        }

        let widths: Vec<usize> = segments
            .iter()
            .map(|segment| segment.iter().map(|span| span.width()).sum())
            .collect();
        let start = first_visible(&widths, self.focus.1, usize::from(area.width));
        let mut line = Line::default();
        if start > 0 {
            line.spans.push(Span::styled("‹", theme.label));
        }
        for (index, segment) in segments.into_iter().enumerate().skip(start) {
            if index > start {
                line.spans.push(Span::raw(" "));
            }
            line.spans.extend(segment);
        }
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let line = match self.status.as_deref() {
            Some(status) => Line::from(Span::styled(status.to_string(), theme.empty)),
            None => Line::from(vec![
                Span::styled("enter", theme.prompt),
                Span::styled(" select  ", theme.label),
                Span::styled("tab", theme.prompt),
                Span::styled(" layout  ", theme.label),
                Span::styled("r", theme.prompt),
                Span::styled(" reload  ", theme.label),
                Span::styled("q", theme.prompt),
                Span::styled(" done  ", theme.label),
                Span::styled("esc", theme.prompt),
                Span::styled(" cancel", theme.label),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_logs(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        tui_logger::move_events();

        let widget = TuiLoggerSmartWidget::default()
            .title_log("Runtime log")
            .title_target("Targets")
            .highlight_style(self.theme.focus)
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .state(&self.log_state);
        frame.render_widget(widget, area);
    }
}

/// Truncate or pad `text` to exactly `width` columns.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

fn popup_area(area: Rect) -> Rect {
    let width = (area.width / 5 * 3).max(area.width.min(36));
    let height = (area.height / 5 * 4).max(area.height.min(8));
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

fn draw_picker(frame: &mut Frame, area: Rect, picker: &PickerModel, theme: &Theme) {
    let area = popup_area(area);
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(format!(" {} ", picker.title()))
        .border_style(theme.prompt);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [query, list, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let prompt = Line::from(vec![
        Span::styled("> ", theme.prompt),
        Span::raw(picker.query().to_string()),
    ]);
    frame.render_widget(Paragraph::new(prompt), query);

    let items: Vec<ListItem> = picker
        .entries()
        .into_iter()
        .map(|entry| match entry {
            PickerEntry::Section(name) => ListItem::new(Line::styled(name, theme.header)),
            PickerEntry::Option { name, chosen, .. } => {
                let (mark, style) = if chosen {
                    ("[x] ", theme.selected)
                } else {
                    ("[ ] ", Style::default())
                };
                ListItem::new(Line::from(vec![Span::raw(mark), Span::styled(name, style)]))
            }
        })
        .collect();
    let mut state = ListState::default().with_selected(picker.cursor_entry());
    let list_widget = List::new(items).highlight_style(theme.focus);
    frame.render_stateful_widget(list_widget, list, &mut state);

    let footer_line = Line::from(vec![
        Span::styled(picker.confirm_label(), theme.button),
        Span::styled("  ctrl+s confirm  ctrl+x clear  esc close", theme.label),
    ]);
    frame.render_widget(Paragraph::new(footer_line), footer);
}
