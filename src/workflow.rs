use anyhow::{Context, Result, bail};
use fltr::engine::{CategoryItem, FilterLoader, FilterSession, FilterSetKind, LoadEvent};
use fltr::tui::{FilterOutcome, FilterUi};
use fltr::{JsonFileLoader, load_parameters};
use log::info;

use crate::settings::ResolvedConfig;

/// Coordinates loading a filter set and running the selection experience.
pub(crate) struct FilterWorkflow {
    config: ResolvedConfig,
    parameters: Vec<CategoryItem>,
}

impl FilterWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let parameters = match &config.parameters {
            Some(path) => load_parameters(path)
                .with_context(|| format!("failed to read parameters from {}", path.display()))?,
            None => Vec::new(),
        };
        Ok(Self { config, parameters })
    }

    /// Run the interactive filter bar, or resolve the defaults when `headless`.
    pub(crate) fn run(self, headless: bool) -> Result<FilterOutcome> {
        if headless {
            self.run_headless()
        } else {
            self.run_interactive()
        }
    }

    fn run_interactive(self) -> Result<FilterOutcome> {
        let Self { config, parameters } = self;
        let loader = JsonFileLoader::new(&config.catalog_dir);
        let mut ui = FilterUi::new(loader, FilterSetKind::new(config.filter_set))
            .with_parameters(parameters)
            .with_mode(config.mode)
            .with_layout(config.layout)
            .with_title(config.title)
            .with_logs(config.show_logs);
        if let Some(theme) = &config.theme {
            ui = ui.with_theme_name(theme);
        }
        ui.run()
    }

    fn run_headless(self) -> Result<FilterOutcome> {
        let Self { config, parameters } = self;
        let loader: Box<dyn FilterLoader + Send> = Box::new(JsonFileLoader::new(&config.catalog_dir));
        let kind = FilterSetKind::new(config.filter_set);
        let mut session = FilterSession::new(loader, parameters, kind, config.mode);

        session.request_load();
        match session.wait() {
            Some(LoadEvent::Loaded | LoadEvent::Reloaded) => {}
            Some(LoadEvent::Cleared) => bail!(
                "failed to load filter set {}: {}",
                session.kind(),
                session.last_error().unwrap_or("unknown error")
            ),
            Some(LoadEvent::Ignored) | None => {
                bail!("filter set {} was not loaded", session.kind())
            }
        }

        let outcome = FilterOutcome::from_engine(session.engine(), true);
        info!(
            "resolved {} default selections for {}",
            outcome.selections.len(),
            session.kind()
        );
        Ok(outcome)
    }
}
