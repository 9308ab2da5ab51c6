use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
    CliFlag(&'static str),
    Environment(&'static str),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::Environment(var) => write!(f, "environment variable `{var}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

/// Where each user-facing setting came from, for error reporting.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
    pub(crate) catalog_dir: Option<SettingSource>,
    pub(crate) filter_set: Option<SettingSource>,
    pub(crate) mode: Option<SettingSource>,
    pub(crate) layout: Option<SettingSource>,
    pub(crate) theme: Option<SettingSource>,
}

impl ConfigSources {
    pub(crate) fn source_for_catalog_dir(&self) -> SettingSource {
        self.catalog_dir
            .clone()
            .unwrap_or(SettingSource::ConfigKey("catalog.dir"))
    }

    pub(crate) fn source_for_filter_set(&self) -> SettingSource {
        self.filter_set
            .clone()
            .unwrap_or(SettingSource::ConfigKey("catalog.filter_set"))
    }

    pub(crate) fn source_for_mode(&self) -> SettingSource {
        self.mode.clone().unwrap_or(SettingSource::ConfigKey("ui.mode"))
    }

    pub(crate) fn source_for_layout(&self) -> SettingSource {
        self.layout
            .clone()
            .unwrap_or(SettingSource::ConfigKey("ui.layout"))
    }

    pub(crate) fn source_for_theme(&self) -> SettingSource {
        self.theme
            .clone()
            .unwrap_or(SettingSource::ConfigKey("ui.theme"))
    }
}
