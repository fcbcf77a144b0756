//! Action module - Yank buffer and item relocation

pub mod relocate;
pub mod yank;

pub use relocate::{paste, PasteReport};
pub use yank::YankBuffer;
