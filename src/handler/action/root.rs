//! Entering navigation and the root mode

use std::time::Instant;

use crate::core::{BrowseState, Deadline, Direction, Engine, Mode};
use crate::handler::key::Command;

/// Inactive -> Root
pub(super) fn enter(engine: &mut Engine, now: Instant) -> Mode {
    let len = engine.tree.visible_len();
    if len == 0 {
        engine.set_message("Nothing to navigate");
        return Mode::Inactive;
    }
    let origin = engine
        .tree
        .current()
        .filter(|id| engine.tree.nearest_visible_index(*id).is_some())
        .or_else(|| engine.tree.visible_at(0));
    let index = origin
        .and_then(|id| engine.tree.nearest_visible_index(id))
        .unwrap_or(0);
    engine.origin = origin;
    engine.selection.set_highlight(index, len);
    engine.clear_message();
    Mode::Root {
        deadline: Deadline::starting(now, engine.config.root_timeout),
    }
}

pub(super) fn handle(
    engine: &mut Engine,
    deadline: Deadline,
    command: Option<Command>,
    now: Instant,
) -> Mode {
    match command {
        Some(Command::MoveDown) => start_browse(engine, Direction::Down),
        Some(Command::MoveUp) => start_browse(engine, Direction::Up),
        Some(Command::StartJump) => Mode::AbsoluteJump {
            count: Default::default(),
        },
        Some(Command::StartScroll) => Mode::ScrollCommand,
        Some(Command::StartSetMark) => Mode::SetMark,
        Some(Command::StartGotoMark) => Mode::GotoMark,
        Some(Command::JumpBack) => {
            if engine.jump_back().is_none() {
                engine.set_message("Already at oldest jump");
            }
            restart(engine, now)
        }
        Some(Command::JumpForward) => {
            if engine.jump_forward().is_none() {
                engine.set_message("Already at newest jump");
            }
            restart(engine, now)
        }
        Some(Command::ClearMarks) => {
            engine.marks.clear_all();
            engine.set_message("Marks cleared");
            Mode::Inactive
        }
        Some(Command::Cancel) => Mode::Inactive,
        _ => {
            engine.set_message("Unknown key");
            Mode::Root { deadline }
        }
    }
}

fn restart(engine: &Engine, now: Instant) -> Mode {
    Mode::Root {
        deadline: Deadline::starting(now, engine.config.root_timeout),
    }
}

/// Root -> Browse, one step from the anchor
fn start_browse(engine: &mut Engine, direction: Direction) -> Mode {
    let len = engine.tree.visible_len();
    let anchor = engine.highlighted();
    let from = engine.selection.clamp(len).unwrap_or(0);
    engine
        .selection
        .set_highlight(direction.offset(from, 1, len), len);
    Mode::Browse(BrowseState::new(direction, anchor))
}
