use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Command, CommandFactory, FromArgMatches, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use fltr::app_dirs;

/// Produce the full version banner including config and catalog directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let catalog_dir = match app_dirs::catalog_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("fltr {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "catalog directory: {catalog_dir}");

    Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    let mut matches = cli_command().get_matches();
    CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

fn cli_command() -> Command {
    CliArgs::command()
}

#[derive(Parser, Debug)]
#[command(
    name = "fltr",
    version,
    long_version = long_version(),
    about = "Pick hierarchical filters from a catalog in the terminal",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `fltr` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "FLTR_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'd',
        long = "catalog-dir",
        value_name = "PATH",
        help = "Directory holding <filter set>.json catalogs (default: data directory)"
    )]
    pub(crate) catalog_dir: Option<PathBuf>,
    #[arg(
        short = 'f',
        long = "filter-set",
        value_name = "NAME",
        help = "Catalog to load (default: default)"
    )]
    pub(crate) filter_set: Option<String>,
    #[arg(
        short = 'P',
        long = "parameters",
        value_name = "FILE",
        help = "JSON file with local parameter categories (default: none)"
    )]
    pub(crate) parameters: Option<PathBuf>,
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        help = "How drill-downs are presented (default: new-row)"
    )]
    pub(crate) mode: Option<ModeArg>,
    #[arg(
        long = "layout",
        value_enum,
        help = "Initial layout of the filter rows (default: expanded)"
    )]
    pub(crate) layout: Option<LayoutArg>,
    #[arg(
        short = 't',
        long,
        value_name = "TITLE",
        help = "Title shown above the filters (default: derived from filter set)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: slate)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        long = "show-logs",
        help = "Open the log pane on start (default: disabled)"
    )]
    pub(crate) show_logs: bool,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-themes",
        help = "List supported themes and exit (default: disabled)"
    )]
    pub(crate) list_themes: bool,
    #[arg(
        long = "no-ui",
        help = "Load the catalog and print its default selection without opening the UI (default: disabled)"
    )]
    pub(crate) no_ui: bool,
    #[arg(
        short = 'v',
        long,
        help = "Print debug logs to stderr when running without the UI (default: disabled)"
    )]
    pub(crate) verbose: bool,
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
    pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
/// Drill-down presentations accepted via the command line.
pub(crate) enum ModeArg {
    NewRow,
    Replace,
}

impl ModeArg {
    /// Return the string representation consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ModeArg::NewRow => "new-row",
            ModeArg::Replace => "replace",
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum LayoutArg {
    Expanded,
    Minimized,
    Landscape,
}

impl LayoutArg {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            LayoutArg::Expanded => "expanded",
            LayoutArg::Minimized => "minimized",
            LayoutArg::Landscape => "landscape",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
