//! Tree module - Item tree data structure and visible-sequence projection

pub mod collection;
pub mod node;

pub use collection::{TabTree, MAX_NESTING_DEPTH};
pub use node::{GroupId, Item, ItemId, ItemKind, Side};
