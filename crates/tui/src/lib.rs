//! Terminal front end for the `fltr` filter bar.
//!
//! Renders the rows of a [`fltr_engine::Catalog`], drives taps through the
//! selection engine and hosts the overflow picker. [`FilterUi`] configures
//! and runs the whole thing.

mod app;
mod builder;
pub mod cells;
pub mod layout;
pub mod picker;
mod runtime;
pub mod theme;

pub use app::{App, FilterOutcome, Session};
pub use builder::FilterUi;
pub use layout::LayoutState;
pub use picker::{PickerEntry, PickerModel};
pub use runtime::run;
pub use theme::Theme;
