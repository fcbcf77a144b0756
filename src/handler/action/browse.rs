//! Browse mode: highlight movement, multi-select, yank/paste and counts

use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, warn};

use crate::core::{BrowseState, Direction, Engine, Mode};
use crate::handler::key::Command;
use crate::tree::Side;

pub(super) fn handle(
    engine: &mut Engine,
    mut state: BrowseState,
    command: Option<Command>,
    now: Instant,
) -> Mode {
    reset_dead_anchor(engine, &mut state);

    if command == Some(Command::Cancel) {
        return cancel(engine, state);
    }
    if !matches!(command, Some(Command::Digit(_))) {
        state.count.clear();
    }
    if command != Some(Command::First) {
        state.double_key.cancel();
    }

    let len = engine.tree.visible_len();
    match command {
        Some(Command::MoveDown) => {
            engine.selection.step(Direction::Down, len);
        }
        Some(Command::MoveUp) => {
            engine.selection.step(Direction::Up, len);
        }
        Some(Command::ExtendDown) => extend(engine, Direction::Down),
        Some(Command::ExtendUp) => extend(engine, Direction::Up),
        Some(Command::ToggleSelect) => {
            if let Some(id) = engine.highlighted() {
                engine.toggle_select(id);
            }
        }
        Some(Command::Confirm) => return confirm(engine, state),
        Some(Command::Close) => return close(engine, state),
        Some(Command::Yank) => {
            let count = engine.yank();
            engine.set_message(format!("Yanked {} item(s)", count));
        }
        Some(Command::PasteAfter) => paste(engine, Side::After),
        Some(Command::PasteBefore) => paste(engine, Side::Before),
        Some(Command::First) => {
            if state.double_key.press(now, engine.config.double_key_timeout) {
                engine.selection.set_highlight(engine.first_index(), len);
            }
        }
        Some(Command::Last) => {
            engine.selection.set_highlight(usize::MAX, len);
        }
        Some(Command::Digit(c)) => {
            // A leading zero is not a count
            if c != '0' || !state.count.is_empty() {
                state.count.push(c, now, engine.config.count_timeout);
            }
        }
        _ => {}
    }
    Mode::Browse(state)
}

/// Fire the double-press window and the distance count
pub(super) fn expire(engine: &mut Engine, mut state: BrowseState, now: Instant) -> Mode {
    if state.double_key.expired(now) {
        state.double_key.cancel();
    }
    if state.count.expired(now) {
        reset_dead_anchor(engine, &mut state);
        return distance_jump(engine, &state);
    }
    Mode::Browse(state)
}

/// Jump `count` steps from the anchor, on the side the highlight has moved to
fn distance_jump(engine: &mut Engine, state: &BrowseState) -> Mode {
    let len = engine.tree.visible_len();
    if len == 0 {
        return Mode::Inactive;
    }
    let distance = state.count.value().unwrap_or(0);
    let highlight = engine.selection.clamp(len).unwrap_or(0);
    let anchor = state
        .anchor
        .and_then(|id| engine.tree.nearest_visible_index(id))
        .unwrap_or(highlight);
    let direction = match highlight.cmp(&anchor) {
        Ordering::Less => Direction::Up,
        Ordering::Greater => Direction::Down,
        Ordering::Equal => state.direction,
    };
    let target = direction.offset(anchor, distance, len);
    debug!(distance, ?direction, target, "distance jump");
    engine.move_to_index(target);
    Mode::Inactive
}

/// The anchor left the tree: the highlighted item becomes the new anchor
fn reset_dead_anchor(engine: &Engine, state: &mut BrowseState) {
    if state.anchor.is_some_and(|id| !engine.tree.contains(id)) {
        state.anchor = engine.highlighted();
        debug!(anchor = ?state.anchor, "browse anchor reset");
    }
}

fn extend(engine: &mut Engine, direction: Direction) {
    let len = engine.tree.visible_len();
    if let Some((from, to)) = engine.selection.step(direction, len) {
        if let (Some(from), Some(to)) = (engine.tree.visible_at(from), engine.tree.visible_at(to)) {
            engine.selection.extend(from, to);
        }
    }
}

fn confirm(engine: &mut Engine, state: BrowseState) -> Mode {
    let Some(id) = engine.highlighted() else {
        return Mode::Inactive;
    };
    let is_container = engine.tree.get(id).is_some_and(|item| item.is_container());
    if !is_container {
        if let Err(e) = engine.activate(id) {
            engine.set_message(e.to_string());
        }
        return Mode::Inactive;
    }

    if let Err(e) = engine.tree.toggle_collapsed(id) {
        engine.set_message(e.to_string());
    }
    let len = engine.tree.visible_len();
    let index = engine.tree.nearest_visible_index(id).unwrap_or(0);
    engine.selection.set_highlight(index, len);
    Mode::Browse(state)
}

fn close(engine: &mut Engine, mut state: BrowseState) -> Mode {
    let removed = engine.close_effective();
    if removed == 0 {
        return Mode::Browse(state);
    }
    engine.set_message(format!("Closed {} item(s)", removed));
    if engine.tree.visible_len() == 0 {
        return Mode::Inactive;
    }
    reset_dead_anchor(engine, &mut state);
    Mode::Browse(state)
}

fn paste(engine: &mut Engine, side: Side) {
    if engine.yank_len() == 0 {
        engine.set_message("Nothing yanked");
        return;
    }
    let Some(anchor) = engine.highlighted() else {
        return;
    };
    let report = engine.paste(anchor, side);
    if report.failed.is_empty() {
        engine.set_message(format!("Moved {} item(s)", report.placed.len()));
    } else {
        engine.set_message(format!(
            "Moved {} item(s), {} failed",
            report.placed.len(),
            report.failed.len()
        ));
    }
}

/// Two-stage escape: pending input and buffers first, then the mode itself
fn cancel(engine: &mut Engine, mut state: BrowseState) -> Mode {
    if state.has_pending() || engine.selection.has_transient() {
        state.clear_pending();
        engine.selection.clear_transient();
        return Mode::Browse(state);
    }
    if let Some(origin) = engine.origin.filter(|id| engine.tree.contains(*id)) {
        if engine.tree.current() != Some(origin) {
            // Restoring is not a jump
            if let Err(e) = engine.tree.set_current(origin) {
                warn!(item = %origin, error = %e, "cannot restore origin");
            }
        }
    }
    Mode::Inactive
}
