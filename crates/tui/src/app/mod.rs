//! Application state and behavior of the filter bar.
//!
//! [`App`] owns the load session and everything the terminal shows around it.
//! Input handling, drawing and the navigation model live in their own modules.

mod actions;
mod render;
mod state;
mod targets;

#[cfg(test)]
mod tests;

pub use state::{App, FilterOutcome, Session};
