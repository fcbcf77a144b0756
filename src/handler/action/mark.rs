//! Set-mark and goto-mark modes

use std::time::Instant;

use super::demote;
use crate::core::{Engine, MarkChange, Marks, Mode};
use crate::handler::key::Command;

pub(super) fn handle_set(engine: &mut Engine, command: Option<Command>, now: Instant) -> Mode {
    match command {
        Some(Command::Char(c)) if Marks::is_mark_char(c) => {
            match engine.set_mark(c) {
                Some(MarkChange::Set {
                    moved_from: Some(old),
                }) => engine.set_message(format!("Mark '{}' set (was '{}')", c, old)),
                Some(MarkChange::Set { moved_from: None }) => {
                    engine.set_message(format!("Mark '{}' set", c))
                }
                Some(MarkChange::Cleared) => engine.set_message(format!("Mark '{}' cleared", c)),
                None => engine.set_message("Nothing to mark"),
            }
            Mode::Inactive
        }
        Some(Command::Cancel) => Mode::Inactive,
        _ => demote(engine, now),
    }
}

/// An unknown mark keeps the mode open for another try
pub(super) fn handle_goto(engine: &mut Engine, command: Option<Command>, now: Instant) -> Mode {
    match command {
        Some(Command::Char(c)) if Marks::is_mark_char(c) => {
            if engine.goto_mark(c).is_some() {
                Mode::Inactive
            } else {
                engine.set_message(format!("Mark '{}' not set", c));
                Mode::GotoMark
            }
        }
        Some(Command::Cancel) => Mode::Inactive,
        _ => demote(engine, now),
    }
}
