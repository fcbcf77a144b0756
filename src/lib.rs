//! tabnav - A modal, keyboard-driven navigator for tabs and folders
//!
//! This crate provides a vim-style state machine over a tree of tabs:
//! browse with a highlight, jump to absolute or relative positions, set
//! marks, walk back and forth through history, and move many tabs at
//! once through a yank/paste buffer.

pub mod action;
pub mod app;
pub mod core;
pub mod error;
pub mod handler;
pub mod tree;

pub use crate::core::{Engine, EngineConfig, Mode};
pub use error::{NavError, Result};
pub use tree::{GroupId, ItemId, Side, TabTree};
