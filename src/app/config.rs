//! Application configuration from CLI arguments

use std::env;
use std::path::PathBuf;

use super::config_file::ConfigFile;
use crate::core::EngineConfig;

/// Application configuration from CLI args and config file
#[derive(Debug)]
pub struct Config {
    /// Tree fixture to load (built-in sample when absent)
    pub fixture: Option<PathBuf>,
    /// Keys to replay instead of running interactively
    pub replay: Option<String>,
    /// Write tracing output here
    pub log_file: Option<PathBuf>,
    /// Engine tunables (from config file)
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        Self::parse(env::args().skip(1))
    }

    /// Parse arguments (without the program name)
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let mut fixture: Option<PathBuf> = None;
        let mut replay: Option<String> = None;
        let mut log_file: Option<PathBuf> = None;
        let mut config_path: Option<PathBuf> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    if let Some(path) = args.next() {
                        config_path = Some(PathBuf::from(path));
                    } else {
                        anyhow::bail!("--config requires a file path");
                    }
                }
                "--replay" | "-r" => {
                    if let Some(keys) = args.next() {
                        replay = Some(keys);
                    } else {
                        anyhow::bail!("--replay requires a key sequence");
                    }
                }
                "--log" => {
                    if let Some(path) = args.next() {
                        log_file = Some(PathBuf::from(path));
                    } else {
                        anyhow::bail!("--log requires a file path");
                    }
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-V" => {
                    println!("tabnav {}", env!("CARGO_PKG_VERSION"));
                    std::process::exit(0);
                }
                s if s.starts_with('-') => {
                    anyhow::bail!("Unknown option: {}", s);
                }
                _ => {
                    if fixture.is_some() {
                        anyhow::bail!("Only one fixture file may be given");
                    }
                    fixture = Some(PathBuf::from(arg));
                }
            }
        }

        // An explicit --config must be readable; the default location is optional
        let config_file = match config_path {
            Some(path) => ConfigFile::load_from(&path)
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?,
            None => ConfigFile::load(),
        };

        Ok(Config {
            fixture,
            replay,
            log_file,
            engine: config_file.engine_config(),
        })
    }
}

fn print_help() {
    println!(
        r#"tabnav - modal, vim-style navigation for tabs and folders

USAGE:
    tabnav [OPTIONS] [FIXTURE.json]

OPTIONS:
    -c, --config FILE   Read settings from FILE instead of the default location
    -r, --replay KEYS   Replay space-separated keys (e.g. "ctrl+space g 3 <wait>")
                        and print the resulting tree instead of running interactively
    --log FILE          Write a debug log to FILE (filter with TABNAV_LOG)
    -h, --help          Show this help message
    -V, --version       Show version

KEYS:
    ctrl+space          Enter navigation
    j / k               Browse down / up (J / K extend the selection)
    g                   Go to position (digits, then wait or enter; g/G first/last)
    z                   Scroll: z center, t top, b bottom
    m / '               Set mark / go to mark
    ctrl+o / tab        Jump back / forward
    space y p P x       Select, yank, paste after/before, close (while browsing)
    esc                 Cancel
    q                   Quit (when not navigating)

CONFIG FILE:
    ~/.config/tabnav/config.toml    Timeouts, jump list size, navigation
    ~/.config/tabnav/keymap.toml    Key bindings per mode"#
    );
}
