//! Scripted key replay on a virtual clock
//!
//! A script is a whitespace-separated list of key tokens as written in
//! keymap.toml (`j`, `G`, `ctrl+o`, `space`), plus `<wait>` which lets every
//! pending timer fire.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::core::Engine;
use crate::error::{NavError, Result};
use crate::handler::parse_key;

/// Virtual time between two scripted key presses
const KEY_INTERVAL: Duration = Duration::from_millis(10);

/// Upper bound on timers fired by one `<wait>`
const MAX_TICKS_PER_WAIT: usize = 8;

/// One scripted input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(KeyEvent),
    /// Let every pending deadline pass
    Wait,
}

/// Parse a replay script
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split_whitespace()
        .map(|token| match token {
            "<wait>" => Ok(Step::Wait),
            other => parse_key(other)
                .map(Step::Key)
                .ok_or_else(|| NavError::config(format!("unknown key '{}'", other))),
        })
        .collect()
}

/// Feed `steps` to the engine starting at `start`; returns the final virtual time
pub fn run(engine: &mut Engine, steps: &[Step], start: Instant) -> Instant {
    let mut now = start;
    for step in steps {
        match step {
            Step::Key(key) => {
                now += KEY_INTERVAL;
                engine.handle_key(*key, now);
            }
            Step::Wait => {
                for _ in 0..MAX_TICKS_PER_WAIT {
                    let Some(at) = engine.next_deadline() else {
                        break;
                    };
                    now = now.max(at);
                    engine.tick(now);
                }
            }
        }
    }
    now
}

/// Plain-text dump of the engine: one line per visible item, then mode and current
///
/// Line prefix: `>` highlight, `*` current, `+` selected.
pub fn render_text(engine: &Engine) -> String {
    let tree = engine.tree();
    let current = tree.current();
    let highlighted = engine.highlighted();
    let mut out = String::new();

    for id in engine.visible_sequence() {
        let Some(item) = tree.get(*id) else {
            continue;
        };
        let cursor = if highlighted == Some(*id) {
            '>'
        } else if current == Some(*id) {
            '*'
        } else {
            ' '
        };
        let selected = if engine.is_selected(*id) { '+' } else { ' ' };
        let indent = "  ".repeat(tree.depth(*id));
        let fold = match (item.is_container(), item.is_collapsed()) {
            (true, true) => "[+] ",
            (true, false) => "[-] ",
            _ => "",
        };
        let pin = if item.is_leaf() && item.is_pinned() && item.parent().is_none() {
            " ^"
        } else {
            ""
        };
        let mark = engine
            .marks()
            .mark_of(*id)
            .map(|c| format!(" '{}", c))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}{} {}{}{}{}{}",
            cursor, selected, indent, fold, item.title, pin, mark
        );
    }

    let title_of = move |id| tree.get(id).map(|item| item.title.as_str()).unwrap_or("-");
    let mode = engine.mode().label();
    let _ = writeln!(out, "mode: {}", if mode.is_empty() { "INACTIVE" } else { mode });
    let _ = writeln!(out, "current: {}", current.map(title_of).unwrap_or("-"));
    if let Some(msg) = engine.message() {
        let _ = writeln!(out, "message: {}", msg);
    }
    out
}
