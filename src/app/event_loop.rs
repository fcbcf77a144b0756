//! Main event loop

use std::io::Stdout;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use tracing::debug;

use super::render::{apply_scroll, render_frame};
use crate::core::Engine;

/// Longest time to block on input when no timer is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Rows taken by the list border and the status line
const CHROME_ROWS: u16 = 3;

/// Run the interactive navigator until the user quits
pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, engine: &mut Engine) -> anyhow::Result<()> {
    let mut list_state = ListState::default();

    loop {
        if let Some(request) = engine.take_scroll_request() {
            let height = terminal.size()?.height.saturating_sub(CHROME_ROWS) as usize;
            apply_scroll(engine, request, &mut list_state, height);
        }
        terminal.draw(|frame| render_frame(frame, engine, &mut list_state))?;

        // Sleep until input arrives or the next engine deadline is due
        let now = Instant::now();
        let timeout = engine
            .next_deadline()
            .map(|at| at.saturating_duration_since(now))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if engine.handle_key(key, Instant::now()) {
                    continue;
                }
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let quit = matches!(key.code, KeyCode::Char('q'))
                    || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    debug!("quit requested");
                    return Ok(());
                }
            }
        } else {
            engine.tick(Instant::now());
        }
    }
}
