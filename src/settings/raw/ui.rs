use fltr::engine::DrillDownMode;
use fltr::tui::LayoutState;
use serde::Deserialize;

use super::super::resolved::{ConfigError, ConfigSources};
use crate::cli::CliArgs;

/// UI related configuration values prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
    pub(super) mode: Option<String>,
    pub(super) layout: Option<String>,
    pub(super) title: Option<String>,
    pub(super) theme: Option<String>,
    pub(super) show_logs: Option<bool>,
}

pub(super) struct UiResolution {
    pub(super) mode: DrillDownMode,
    pub(super) layout: LayoutState,
    pub(super) title: String,
    pub(super) theme: Option<String>,
    pub(super) show_logs: bool,
}

impl UiSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(mode) = cli.mode {
            self.mode = Some(mode.as_str().to_string());
        }
        if let Some(layout) = cli.layout {
            self.layout = Some(layout.as_str().to_string());
        }
        if let Some(title) = cli.title.clone() {
            self.title = Some(title);
        }
        if let Some(theme) = cli.theme.clone() {
            self.theme = Some(theme);
        }
        if cli.show_logs {
            self.show_logs = Some(true);
        }
    }

    pub(super) fn finalize(
        self,
        filter_set: &str,
        sources: &ConfigSources,
    ) -> Result<UiResolution, ConfigError> {
        let mode = match self.mode {
            Some(value) => parse_mode(&value).ok_or_else(|| {
                ConfigError::invalid(
                    "ui.mode",
                    value.clone(),
                    sources.source_for_mode(),
                    "expected `new-row` or `replace`",
                )
            })?,
            None => DrillDownMode::default(),
        };
        let layout = match self.layout {
            Some(value) => value.parse::<LayoutState>().map_err(|reason| {
                ConfigError::invalid("ui.layout", value.clone(), sources.source_for_layout(), reason)
            })?,
            None => LayoutState::default(),
        };
        let title = self
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| default_title_for(filter_set));

        Ok(UiResolution {
            mode,
            layout,
            title,
            theme: self.theme,
            show_logs: self.show_logs.unwrap_or(false),
        })
    }
}

/// Parse a drill-down presentation name.
pub(super) fn parse_mode(value: &str) -> Option<DrillDownMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "new-row" | "row" | "row-per-drill-down" => Some(DrillDownMode::RowPerDrillDown),
        "replace" | "replace-in-place" => Some(DrillDownMode::ReplaceInPlace),
        _ => None,
    }
}

/// Turn a filter set name such as `used_cars` into a heading like `Used cars`.
pub(super) fn default_title_for(filter_set: &str) -> String {
    let spaced = filter_set.replace(['-', '_'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Filters".to_string(),
    }
}
