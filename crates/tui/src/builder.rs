use anyhow::Result;
use fltr_engine::{CategoryItem, DrillDownMode, FilterLoader, FilterSession, FilterSetKind};

use crate::app::{App, FilterOutcome};
use crate::layout::LayoutState;
use crate::theme::{self, Theme};

/// A small builder for configuring the interactive filter bar before running it.
pub struct FilterUi {
    loader: Box<dyn FilterLoader + Send>,
    filter_set: FilterSetKind,
    parameters: Vec<CategoryItem>,
    mode: DrillDownMode,
    layout: LayoutState,
    title: Option<String>,
    theme: Option<Theme>,
    show_logs: bool,
}

impl FilterUi {
    /// Create a filter bar that asks `loader` for the catalog called `filter_set`.
    pub fn new(loader: impl FilterLoader + Send + 'static, filter_set: FilterSetKind) -> Self {
        Self {
            loader: Box::new(loader),
            filter_set,
            parameters: Vec::new(),
            mode: DrillDownMode::default(),
            layout: LayoutState::default(),
            title: None,
            theme: None,
            show_logs: false,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<CategoryItem>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_mode(mut self, mode: DrillDownMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_layout(mut self, layout: LayoutState) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Unknown names keep the default theme.
    pub fn with_theme_name(mut self, name: &str) -> Self {
        if let Some(theme) = theme::by_name(name) {
            self.theme = Some(theme);
        }
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_logs(mut self, show: bool) -> Self {
        self.show_logs = show;
        self
    }

    /// Build the [`App`] without starting the terminal.
    pub fn build(self) -> App {
        let session = FilterSession::new(self.loader, self.parameters, self.filter_set, self.mode);
        let mut app = App::new(session);
        app.layout = self.layout;
        if let Some(title) = self.title {
            app.title = title;
        }
        if let Some(theme) = self.theme {
            app.theme = theme;
        }
        app.set_show_logs(self.show_logs);
        app
    }

    /// Run the interactive filter bar with the configured options.
    pub fn run(self) -> Result<FilterOutcome> {
        self.build().run()
    }
}
