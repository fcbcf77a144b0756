//! Per-mode transition handlers
//!
//! Each handler receives the mode value it was in (owned, timers included)
//! and returns the mode to continue in.

mod browse;
mod jump;
mod mark;
mod root;


use std::time::Instant;

use tracing::debug;

use crate::core::{Deadline, Engine, Mode};
use crate::handler::key::Command;

/// Route a resolved command to the handler of `mode`
pub fn handle(engine: &mut Engine, mode: Mode, command: Option<Command>, now: Instant) -> Mode {
    match mode {
        Mode::Inactive => root::enter(engine, now),
        Mode::Root { deadline } => root::handle(engine, deadline, command, now),
        Mode::Browse(state) => browse::handle(engine, state, command, now),
        Mode::AbsoluteJump { count } => jump::handle(engine, count, command, now),
        Mode::ScrollCommand => jump::handle_scroll(engine, command, now),
        Mode::SetMark => mark::handle_set(engine, command, now),
        Mode::GotoMark => mark::handle_goto(engine, command, now),
    }
}

/// Run whatever deadline of `mode` has passed
pub fn expire(engine: &mut Engine, mode: Mode, now: Instant) -> Mode {
    match mode {
        Mode::Root { deadline } if deadline.expired(now) => {
            debug!("root timeout");
            Mode::Inactive
        }
        Mode::AbsoluteJump { count } if count.expired(now) => jump::execute(engine, &count),
        Mode::Browse(state) => browse::expire(engine, state, now),
        other => other,
    }
}

/// Invalid input in a sub-mode: stay in the navigator, back at root
fn demote(engine: &mut Engine, now: Instant) -> Mode {
    engine.set_message("Invalid key");
    Mode::Root {
        deadline: Deadline::starting(now, engine.config.root_timeout),
    }
}
