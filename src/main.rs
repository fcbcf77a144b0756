//! tabnav - modal, vim-style navigation for tabs and folders

use std::fs::File;
use std::io::stdout;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tabnav::app::{exit_code, replay, run_app, Config, Fixture};
use tabnav::handler::KeyBindingRegistry;
use tabnav::Engine;

fn main() -> ExitCode {
    // Parse config first to return INVALID exit code for argument errors
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::INVALID as u8);
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("Error: {}", e);
        return ExitCode::from(exit_code::INVALID as u8);
    }

    let engine = match build_engine(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::INVALID as u8);
        }
    };

    let result = match config.replay.as_deref() {
        Some(keys) => run_replay(engine, keys),
        None => run_interactive(engine),
    };
    match result {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

/// Send tracing output to the log file, if one was requested
///
/// The terminal belongs to the UI, so nothing is ever logged to stdout/stderr.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("TABNAV_LOG").unwrap_or_else(|_| EnvFilter::new("tabnav=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()?;
    Ok(())
}

fn build_engine(config: &Config) -> anyhow::Result<Engine> {
    let fixture = match &config.fixture {
        Some(path) => Fixture::load(path)?,
        None => Fixture::sample(),
    };
    let tree = fixture.build()?;
    Ok(Engine::new(tree, config.engine.clone()).with_keymap(KeyBindingRegistry::from_file()))
}

/// Non-interactive: replay keys on a virtual clock and print the result
fn run_replay(mut engine: Engine, keys: &str) -> anyhow::Result<()> {
    let steps = replay::parse_script(keys)?;
    replay::run(&mut engine, &steps, Instant::now());
    print!("{}", replay::render_text(&engine));
    Ok(())
}

fn run_interactive(mut engine: Engine) -> anyhow::Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut engine);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;

    result
}
