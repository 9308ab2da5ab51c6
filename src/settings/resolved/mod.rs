use std::path::PathBuf;

use fltr::engine::DrillDownMode;
use fltr::tui::LayoutState;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub catalog_dir: PathBuf,
    pub filter_set: String,
    pub parameters: Option<PathBuf>,
    pub mode: DrillDownMode,
    pub layout: LayoutState,
    pub title: String,
    pub theme: Option<String>,
    pub show_logs: bool,
}

impl ResolvedConfig {
    pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
        validation::validate(self, sources)
    }

    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        summary::print_summary(self);
    }
}
