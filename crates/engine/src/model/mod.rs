//! Catalog data model: value trees, categories and their display cells.

mod catalog;
mod category;
mod cell;
mod value;

pub use catalog::{Catalog, ImageRef};
pub use category::{Category, CategoryKind, CategoryOrigin};
pub use cell::Cell;
pub use value::{ValueArena, ValueKey, ValueKind, ValueNode};
