//! Library half of the `fltr` binary.
//!
//! Holds the pieces the command line front end shares with embedders: platform
//! directories, the log sinks and the JSON catalog loader. The engine and the
//! terminal UI live in `fltr-engine` and `fltr-tui` and are re-exported here.

pub mod app_dirs;
pub mod loader;
pub mod logging;

pub use fltr_engine as engine;
pub use fltr_tui as tui;
pub use loader::{JsonFileLoader, load_parameters};
