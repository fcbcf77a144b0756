//! Handler module - Input event handling

pub mod action;
pub mod key;
pub mod keymap;

pub use key::{resolve, Command};
pub use keymap::{key_event_to_string, parse_key, KeyBindingRegistry, KeymapFile};

use std::time::Instant;

use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::debug;

use crate::core::{Engine, Mode};

/// Handle one key event
///
/// Inactive mode only consumes the enter trigger; every active mode consumes
/// every key press.
pub fn handle_key(engine: &mut Engine, key: KeyEvent, now: Instant) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    // Deadlines that passed before this key must fire first
    tick(engine, now);

    let command = resolve(&engine.keymap, &engine.mode, &key);
    if !engine.mode.is_active() && command != Some(Command::Activate) {
        return false;
    }

    engine.sync();
    let mode = std::mem::take(&mut engine.mode);
    let from = mode.label();
    let next = if mode.is_active() && engine.tree.visible_len() == 0 {
        debug!("visible sequence is empty");
        Mode::Inactive
    } else {
        action::handle(engine, mode, command, now)
    };
    transition(engine, from, next);
    true
}

/// Fire the deadline of the current mode if it has passed
pub fn tick(engine: &mut Engine, now: Instant) -> bool {
    if !engine.mode.next_deadline().is_some_and(|at| now >= at) {
        return false;
    }
    engine.sync();
    let mode = std::mem::take(&mut engine.mode);
    let from = mode.label();
    let next = action::expire(engine, mode, now);
    transition(engine, from, next);
    true
}

fn transition(engine: &mut Engine, from: &'static str, next: Mode) {
    if !next.is_active() {
        engine.reset_session();
    }
    if from != next.label() {
        debug!(from, to = next.label(), "mode change");
    }
    engine.mode = next;
}
