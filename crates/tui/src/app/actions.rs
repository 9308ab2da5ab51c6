use anyhow::Result;
use fltr_engine::{Cell, Transition};
use log::debug;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_logger::TuiWidgetEvent;

use super::{App, FilterOutcome};
use crate::picker::PickerModel;

impl App {
    /// Process a keyboard event and return an outcome if the user exits.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<Option<FilterOutcome>> {
        if self.picker.is_some() {
            self.handle_picker_key(key);
            return Ok(None);
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(Some(self.outcome(false))),
            KeyCode::Char('c') if control => return Ok(Some(self.outcome(false))),
            KeyCode::Char('q') => return Ok(Some(self.outcome(true))),
            KeyCode::Char('l') if control => self.show_logs = !self.show_logs,
            KeyCode::Tab => {
                self.layout = self.layout.toggled();
                self.clamp_focus();
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::PageUp if self.show_logs => self.log_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown if self.show_logs => self.log_state.transition(TuiWidgetEvent::NextPageKey),
            _ => {}
        }
        Ok(None)
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                debug!("picker dismissed");
                self.picker = None;
            }
            KeyCode::Char('s') if control => self.confirm_picker(),
            KeyCode::Char('x') if control => {
                if let Some(picker) = self.picker.as_mut() {
                    picker.clear();
                }
            }
            _ => {
                let Some(picker) = self.picker.as_mut() else {
                    return;
                };
                match key.code {
                    KeyCode::Up => picker.move_up(),
                    KeyCode::Down => picker.move_down(),
                    KeyCode::Enter => picker.toggle_current(),
                    KeyCode::Backspace => picker.pop_char(),
                    KeyCode::Char(ch) if !control => picker.push_char(ch),
                    _ => {}
                }
            }
        }
    }

    fn confirm_picker(&mut self) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        let result = picker.confirm();
        let transition = self.session.engine_mut().apply_picker_result(result);
        self.follow(transition);
    }

    /// Tap the focused cell.
    pub(crate) fn activate(&mut self) {
        let Some(target) = self.focused() else {
            return;
        };
        let engine = self.session.engine_mut();
        let Some(cell) = engine
            .catalog()
            .category(target.category)
            .and_then(|category| category.cells().get(target.cell))
            .cloned()
        else {
            return;
        };
        let transition = match cell {
            Cell::Button { .. } => engine.press_button(target.category),
            Cell::Plain(key) | Cell::Closable(key) => {
                let Some(id) = engine.catalog().value(key).map(|node| node.id().to_string()) else {
                    return;
                };
                engine.select_value(target.category, &id)
            }
        };
        self.follow(transition);
    }

    /// Open the picker an engine transition asked for and keep focus valid.
    fn follow(&mut self, transition: Transition) {
        if let Some(request) = transition.into_picker_request() {
            debug!("opening picker for {}", request.category());
            self.picker = Some(PickerModel::new(request, self.session.engine().catalog()));
        }
        self.clamp_focus();
    }
}
