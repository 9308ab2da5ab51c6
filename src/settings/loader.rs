use anyhow::{Result, anyhow};

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::config_layers;
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = config_layers(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve(cli)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use fltr::engine::DrillDownMode;
    use fltr::tui::LayoutState;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn explicit_file_is_merged_and_cli_wins() {
        let dir = tempdir().expect("tempdir");
        let catalogs = dir.path().join("catalogs");
        fs::create_dir(&catalogs).expect("catalog dir");
        let file = dir.path().join("fltr.toml");
        fs::write(
            &file,
            format!(
                "[catalog]\ndir = {:?}\nfilter_set = \"boats\"\n\n[ui]\nmode = \"replace\"\nlayout = \"minimized\"\ntheme = \"mono\"\n",
                catalogs.display().to_string()
            ),
        )
        .expect("write config");

        let cli = CliArgs::parse_from([
            "fltr",
            "--no-config",
            "--config",
            file.to_str().expect("utf-8 path"),
            "--filter-set",
            "cars",
        ]);
        let resolved = load(&cli).expect("resolves");

        assert_eq!(resolved.catalog_dir, catalogs);
        assert_eq!(resolved.filter_set, "cars");
        assert_eq!(resolved.mode, DrillDownMode::ReplaceInPlace);
        assert_eq!(resolved.layout, LayoutState::Minimized);
        assert_eq!(resolved.theme.as_deref(), Some("mono"));
    }

    #[test]
    fn unknown_layout_in_file_names_the_key() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("fltr.toml");
        fs::write(&file, "[ui]\nlayout = \"sideways\"\n").expect("write config");

        let cli = CliArgs::parse_from([
            "fltr",
            "--no-config",
            "--config",
            file.to_str().expect("utf-8 path"),
            "--catalog-dir",
            dir.path().to_str().expect("utf-8 path"),
        ]);
        let message = load(&cli).expect_err("rejects layout").to_string();
        assert!(message.contains("ui.layout"));
        assert!(message.contains("sideways"));
    }
}
