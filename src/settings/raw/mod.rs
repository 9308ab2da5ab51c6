use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod catalog;
mod ui;

use catalog::CatalogSection;
use ui::UiSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    catalog: CatalogSection,
    ui: UiSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.catalog.apply_cli_overrides(cli);
        self.ui.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            catalog_dir: detect_source(
                cli.catalog_dir.is_some(),
                self.catalog.dir.is_some(),
                "FLTR__CATALOG__DIR",
                "--catalog-dir",
                "catalog.dir",
            ),
            filter_set: detect_source(
                cli.filter_set.is_some(),
                self.catalog.filter_set.is_some(),
                "FLTR__CATALOG__FILTER_SET",
                "--filter-set",
                "catalog.filter_set",
            ),
            mode: detect_source(
                cli.mode.is_some(),
                self.ui.mode.is_some(),
                "FLTR__UI__MODE",
                "--mode",
                "ui.mode",
            ),
            layout: detect_source(
                cli.layout.is_some(),
                self.ui.layout.is_some(),
                "FLTR__UI__LAYOUT",
                "--layout",
                "ui.layout",
            ),
            theme: detect_source(
                cli.theme.is_some(),
                self.ui.theme.is_some(),
                "FLTR__UI__THEME",
                "--theme",
                "ui.theme",
            ),
        };

        let catalog = self.catalog.resolve()?;
        let ui = self
            .ui
            .finalize(&catalog.filter_set, &sources)
            .map_err(Error::new)?;

        let config = ResolvedConfig {
            catalog_dir: catalog.dir,
            filter_set: catalog.filter_set,
            parameters: catalog.parameters,
            mode: ui.mode,
            layout: ui.layout,
            title: ui.title,
            theme: ui.theme,
            show_logs: ui.show_logs,
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}
