//! Where `fltr` looks for its settings and its filter catalogs.
//!
//! Both locations come from the platform directories of the `directories`
//! crate unless `FLTR_CONFIG_DIR` or `FLTR_DATA_DIR` points somewhere else.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const CATALOG_FOLDER: &str = "catalogs";

/// File names looked up in the working directory, lowest precedence first.
const LOCAL_CONFIG_FILES: [&str; 2] = [".fltr.toml", "fltr.toml"];

/// A directory `fltr` reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Holds `config.toml`.
    Config,
    /// Parent of the catalog folder.
    Data,
}

impl Location {
    /// Environment variable that replaces the platform directory.
    pub const fn override_var(self) -> &'static str {
        match self {
            Location::Config => "FLTR_CONFIG_DIR",
            Location::Data => "FLTR_DATA_DIR",
        }
    }

    fn platform_dir(self, dirs: &ProjectDirs) -> &Path {
        match self {
            Location::Config => dirs.config_local_dir(),
            Location::Data => dirs.data_local_dir(),
        }
    }

    /// The override when it is set and non-empty, the platform directory otherwise.
    pub fn resolve(self) -> Result<PathBuf> {
        if let Some(dir) = env::var_os(self.override_var()).filter(|value| !value.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let dirs = ProjectDirs::from("io", "fltr", "fltr")
            .ok_or_else(|| anyhow!("no home directory to place fltr {self:?} files in"))?;
        Ok(self.platform_dir(&dirs).to_path_buf())
    }
}

pub fn config_dir() -> Result<PathBuf> {
    Location::Config.resolve()
}

/// Folder holding one `<filter_set>.json` per filter set when `catalog.dir`
/// is not configured.
pub fn catalog_dir() -> Result<PathBuf> {
    Ok(Location::Data.resolve()?.join(CATALOG_FOLDER))
}

/// Config files read before any `--config` file, lowest precedence first.
///
/// Missing files are skipped by the caller.
pub fn config_files(working_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = config_dir()
        .map(|dir| dir.join("config.toml"))
        .into_iter()
        .collect();
    if let Some(dir) = working_dir {
        files.extend(LOCAL_CONFIG_FILES.iter().map(|name| dir.join(name)));
    }
    files
}
