use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use fltr::app_dirs;
use serde::Deserialize;

use crate::cli::CliArgs;

pub(super) const DEFAULT_FILTER_SET: &str = "default";

/// Where catalogs come from, as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct CatalogSection {
    pub(super) dir: Option<PathBuf>,
    pub(super) filter_set: Option<String>,
    pub(super) parameters: Option<PathBuf>,
}

pub(super) struct CatalogResolution {
    pub(super) dir: PathBuf,
    pub(super) filter_set: String,
    pub(super) parameters: Option<PathBuf>,
}

impl CatalogSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(dir) = cli.catalog_dir.clone() {
            self.dir = Some(dir);
        }
        if let Some(name) = cli.filter_set.clone() {
            self.filter_set = Some(name);
        }
        if let Some(path) = cli.parameters.clone() {
            self.parameters = Some(path);
        }
    }

    pub(super) fn resolve(self) -> Result<CatalogResolution> {
        let dir = match self.dir {
            Some(dir) => absolutize(dir)?,
            None => app_dirs::catalog_dir()?,
        };
        let filter_set = self
            .filter_set
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| DEFAULT_FILTER_SET.to_string());
        let parameters = self.parameters.map(absolutize).transpose()?;

        Ok(CatalogResolution {
            dir,
            filter_set,
            parameters,
        })
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(env::current_dir()
        .context("failed to resolve current directory")?
        .join(path))
}
