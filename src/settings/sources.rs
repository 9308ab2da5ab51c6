use std::env;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};
use fltr::app_dirs;

use crate::cli::CliArgs;

/// Stack the configuration layers, later layers winning.
///
/// User and working-directory files come first unless `--no-config` is given,
/// then every `--config` file in order, then `FLTR__SECTION__KEY` variables.
pub(super) fn config_layers(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        let working_dir = env::current_dir().ok();
        for path in app_dirs::config_files(working_dir.as_deref()) {
            builder = builder.add_source(File::from(path).required(false));
        }
    }
    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }
    builder = builder.add_source(environment_layer());

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration layers were already frozen"),
        other => other.into(),
    })
}

/// `FLTR__UI__THEME=mono` sets `ui.theme`.
fn environment_layer() -> Environment {
    Environment::with_prefix("fltr")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
