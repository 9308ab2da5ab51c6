use fltr::tui::theme;

use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
    if config.filter_set.is_empty() {
        return Err(ConfigError::invalid(
            "catalog.filter_set",
            config.filter_set.clone(),
            sources.source_for_filter_set(),
            "must not be empty",
        ));
    }

    if config.filter_set.contains(['/', '\\']) {
        return Err(ConfigError::invalid(
            "catalog.filter_set",
            config.filter_set.clone(),
            sources.source_for_filter_set(),
            "must be a name, not a path",
        ));
    }

    if !config.catalog_dir.is_dir() {
        return Err(ConfigError::invalid(
            "catalog.dir",
            config.catalog_dir.display().to_string(),
            sources.source_for_catalog_dir(),
            "must be an existing directory",
        ));
    }

    if let Some(name) = &config.theme
        && theme::by_name(name).is_none()
    {
        return Err(ConfigError::invalid(
            "ui.theme",
            name.clone(),
            sources.source_for_theme(),
            format!("expected one of: {}", theme::names().join(", ")),
        ));
    }

    Ok(())
}
