//! Absolute jump and scroll command modes

use std::time::Instant;

use tracing::debug;

use super::demote;
use crate::core::{CountBuffer, Engine, Mode, ScrollAlign};
use crate::handler::key::Command;

pub(super) fn handle(
    engine: &mut Engine,
    mut count: CountBuffer,
    command: Option<Command>,
    now: Instant,
) -> Mode {
    match command {
        Some(Command::Digit(c)) => {
            count.push(c, now, engine.config.jump_timeout);
            Mode::AbsoluteJump { count }
        }
        Some(Command::Execute) if !count.is_empty() => execute(engine, &count),
        Some(Command::First) if count.is_empty() => {
            engine.move_to_index(engine.first_index());
            Mode::Inactive
        }
        Some(Command::Last) if count.is_empty() => {
            engine.move_to_index(usize::MAX);
            Mode::Inactive
        }
        Some(Command::Cancel) => Mode::Inactive,
        _ => demote(engine, now),
    }
}

/// Jump to the 1-based position typed into `count`
pub(super) fn execute(engine: &mut Engine, count: &CountBuffer) -> Mode {
    let position = count.value().unwrap_or(1).max(1);
    debug!(position, "absolute jump");
    engine.move_to_index(position - 1);
    Mode::Inactive
}

pub(super) fn handle_scroll(engine: &mut Engine, command: Option<Command>, now: Instant) -> Mode {
    let align = match command {
        Some(Command::ScrollCenter) => ScrollAlign::Center,
        Some(Command::ScrollTop) => ScrollAlign::Top,
        Some(Command::ScrollBottom) => ScrollAlign::Bottom,
        Some(Command::Cancel) => return Mode::Inactive,
        _ => return demote(engine, now),
    };
    engine.request_scroll(align);
    Mode::Inactive
}
