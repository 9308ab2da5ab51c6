//! Selection engine for hierarchical faceted filters.
//!
//! A [`Catalog`] holds every filter category shown to the user together with
//! the value trees behind them. The [`SelectionEngine`] mutates that catalog in
//! response to user taps: selecting a value with sub-options opens a drill-down
//! row, selecting something else prunes the rows that depended on the previous
//! choice, and chip-style values come and go through the overflow picker.
//! [`FilterSession`] wraps the engine with an asynchronous loading boundary.

pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod session;
pub mod wire;

pub use engine::{DrillDownMode, PickerRequest, PickerResult, SelectionEngine, Transition};
pub use error::LoadError;
pub use loader::{
    CancelToken, FilterLoader, FilterSetKind, LoadCompletion, LoadResult, ParameterSource,
    StaticLoader,
};
pub use model::{
    Catalog, Category, CategoryKind, CategoryOrigin, Cell, ImageRef, ValueArena, ValueKey,
    ValueKind, ValueNode,
};
pub use session::{FilterSession, LoadEvent, SessionState};
pub use wire::{CategoryItem, FiltersResponse, ValueItem};
