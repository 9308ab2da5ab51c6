//! Log sinks for the `fltr` binary.
//!
//! The interactive front end collects records in `tui-logger` so they can be
//! shown in the log pane. Headless runs write to stderr instead.

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

/// Environment variable read by the stderr sink for per-module filters.
pub const LOG_ENV: &str = "FLTR_LOG";

/// Install the in-UI log collector.
pub fn initialize() -> Result<()> {
    tui_logger::init_logger(LevelFilter::Trace).context("failed to install the log collector")?;
    tui_logger::set_default_level(LevelFilter::Debug);
    Ok(())
}

/// Install a stderr logger for runs without the terminal UI.
///
/// Only warnings are printed unless `verbose` is set; `FLTR_LOG` refines either.
pub fn initialize_stderr(verbose: bool) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(stderr_level(verbose))
        .parse_env(LOG_ENV)
        .target(Target::Stderr)
        .try_init()
        .context("failed to install the stderr logger")
}

fn stderr_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}
