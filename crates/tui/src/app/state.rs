use std::collections::BTreeSet;

use fltr_engine::{CategoryItem, FilterLoader, FilterSession, LoadEvent, SelectionEngine};
use log::{LevelFilter, debug};
use throbber_widgets_tui::ThrobberState;
use tui_logger::TuiWidgetState;

use crate::layout::LayoutState;
use crate::picker::PickerModel;
use crate::theme::Theme;

/// Load session driven by the terminal front end.
pub type Session = FilterSession<Box<dyn FilterLoader + Send>, Vec<CategoryItem>>;

/// What the user left the filter bar with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub accepted: bool,
    pub filters: BTreeSet<String>,
    pub parameters: BTreeSet<String>,
    /// `(category, value)` names of every selected value, in catalog order.
    pub selections: Vec<(String, String)>,
}

impl FilterOutcome {
    /// Snapshot the current selection of `engine`.
    pub fn from_engine(engine: &SelectionEngine, accepted: bool) -> Self {
        let catalog = engine.catalog();
        let selections = engine
            .selected_values()
            .into_iter()
            .filter_map(|key| {
                let node = catalog.value(key)?;
                let category = catalog
                    .category_of(key)
                    .and_then(|index| catalog.category(index))
                    .map(|category| category.name().to_string())
                    .unwrap_or_default();
                Some((category, node.name().to_string()))
            })
            .collect();
        Self {
            accepted,
            filters: engine.selected_filter_ids(),
            parameters: engine.selected_parameter_ids(),
            selections,
        }
    }
}

pub struct App {
    pub(crate) session: Session,
    pub layout: LayoutState,
    pub theme: Theme,
    pub title: String,
    pub(crate) focus: (usize, usize),
    pub(crate) picker: Option<PickerModel>,
    pub(crate) show_logs: bool,
    pub(crate) log_state: TuiWidgetState,
    pub(crate) throbber_state: ThrobberState,
    pub(crate) body_height: u16,
    pub(crate) status: Option<String>,
}

impl App {
    /// Wrap `session` and ask it for the first catalog.
    pub fn new(mut session: Session) -> Self {
        session.request_load();
        Self {
            session,
            layout: LayoutState::default(),
            theme: Theme::default(),
            title: "Filters".to_string(),
            focus: (0, 0),
            picker: None,
            show_logs: false,
            log_state: TuiWidgetState::new().set_default_display_level(LevelFilter::Debug),
            throbber_state: ThrobberState::default(),
            body_height: u16::MAX,
            status: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn picker(&self) -> Option<&PickerModel> {
        self.picker.as_ref()
    }

    pub fn set_show_logs(&mut self, show: bool) {
        self.show_logs = show;
    }

    /// Apply a finished load, if any arrived since the last frame.
    pub(crate) fn pump_session(&mut self) {
        let Some(event) = self.session.pump() else {
            return;
        };
        debug!("filter session event: {event:?}");
        match event {
            LoadEvent::Loaded | LoadEvent::Reloaded => {
                self.picker = self
                    .session
                    .take_picker_request()
                    .map(|request| PickerModel::new(request, self.session.engine().catalog()));
                self.status = None;
            }
            LoadEvent::Cleared => {
                self.picker = None;
                self.status = self.session.last_error().map(str::to_string);
            }
            LoadEvent::Ignored => {}
        }
        self.clamp_focus();
    }

    pub(crate) fn reload(&mut self) {
        self.status = Some("Reloading filters…".to_string());
        self.session.request_load();
    }

    pub(crate) fn outcome(&self, accepted: bool) -> FilterOutcome {
        FilterOutcome::from_engine(self.session.engine(), accepted)
    }
}
