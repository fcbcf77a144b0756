//! Keymap configuration and registry
//!
//! Loads key bindings from `~/.config/tabnav/keymap.toml`

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::key::Command;
use crate::app::ConfigFile;

/// Keymap configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KeymapFile {
    /// Bindings while navigation is off
    pub inactive: HashMap<String, String>,
    /// Bindings in root mode
    pub root: HashMap<String, String>,
    /// Bindings while browsing
    pub browse: HashMap<String, String>,
    /// Bindings in absolute jump mode
    pub jump: HashMap<String, String>,
    /// Bindings in scroll command mode
    pub scroll: HashMap<String, String>,
}

impl KeymapFile {
    /// Get the keymap file path (~/.config/tabnav/keymap.toml)
    pub fn keymap_path() -> Option<PathBuf> {
        ConfigFile::config_dir().map(|p| p.join("keymap.toml"))
    }

    /// Load keymap from file
    pub fn load() -> Self {
        Self::keymap_path()
            .and_then(|path| {
                if path.exists() {
                    fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load keymap from a specific path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Binding table selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Inactive,
    Root,
    Browse,
    Jump,
    Scroll,
}

/// Key binding registry: key string -> command name, per mode
pub struct KeyBindingRegistry {
    inactive: HashMap<String, String>,
    root: HashMap<String, String>,
    browse: HashMap<String, String>,
    jump: HashMap<String, String>,
    scroll: HashMap<String, String>,
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindingRegistry {
    /// Create a new registry with default bindings
    pub fn new() -> Self {
        let mut registry = Self {
            inactive: HashMap::new(),
            root: HashMap::new(),
            browse: HashMap::new(),
            jump: HashMap::new(),
            scroll: HashMap::new(),
        };
        registry.load_defaults();
        registry
    }

    /// Load registry from the keymap file, merging with defaults
    pub fn from_file() -> Self {
        let mut registry = Self::new();
        registry.merge(KeymapFile::load());
        registry
    }

    /// Override defaults with user bindings
    pub fn merge(&mut self, keymap: KeymapFile) {
        self.inactive.extend(keymap.inactive);
        self.root.extend(keymap.root);
        self.browse.extend(keymap.browse);
        self.jump.extend(keymap.jump);
        self.scroll.extend(keymap.scroll);
    }

    fn load_defaults(&mut self) {
        let bind = |table: &mut HashMap<String, String>, keys: &[&str], action: &str| {
            for key in keys {
                table.insert(key.to_string(), action.to_string());
            }
        };

        let inactive = &mut self.inactive;
        bind(inactive, &["ctrl+space", "alt+v"], "activate");

        let root = &mut self.root;
        bind(root, &["j", "down"], "move_down");
        bind(root, &["k", "up"], "move_up");
        bind(root, &["g"], "start_jump");
        bind(root, &["z"], "start_scroll");
        bind(root, &["m"], "set_mark");
        bind(root, &["'", "`"], "goto_mark");
        bind(root, &["ctrl+o"], "jump_back");
        bind(root, &["ctrl+i", "tab"], "jump_forward");
        bind(root, &["M"], "clear_marks");
        bind(root, &["esc", "q"], "cancel");

        let browse = &mut self.browse;
        bind(browse, &["j", "down"], "move_down");
        bind(browse, &["k", "up"], "move_up");
        bind(browse, &["J", "shift+down"], "extend_down");
        bind(browse, &["K", "shift+up"], "extend_up");
        bind(browse, &["space"], "toggle_select");
        bind(browse, &["enter"], "confirm");
        bind(browse, &["x", "d"], "close");
        bind(browse, &["y"], "yank");
        bind(browse, &["p"], "paste_after");
        bind(browse, &["P"], "paste_before");
        bind(browse, &["g"], "first");
        bind(browse, &["G"], "last");
        bind(browse, &["esc"], "cancel");

        let jump = &mut self.jump;
        bind(jump, &["enter"], "execute");
        bind(jump, &["g"], "first");
        bind(jump, &["G"], "last");
        bind(jump, &["esc"], "cancel");

        let scroll = &mut self.scroll;
        bind(scroll, &["z", "."], "scroll_center");
        bind(scroll, &["t"], "scroll_top");
        bind(scroll, &["b"], "scroll_bottom");
        bind(scroll, &["esc"], "cancel");
    }

    fn table(&self, context: KeyContext) -> &HashMap<String, String> {
        match context {
            KeyContext::Inactive => &self.inactive,
            KeyContext::Root => &self.root,
            KeyContext::Browse => &self.browse,
            KeyContext::Jump => &self.jump,
            KeyContext::Scroll => &self.scroll,
        }
    }

    /// Look up the command bound to a key in the given context
    pub fn lookup(&self, context: KeyContext, key: &KeyEvent) -> Option<Command> {
        let key_str = key_event_to_string(key);
        self.table(context)
            .get(&key_str)
            .and_then(|action| parse_command(action))
    }
}

/// Convert a KeyEvent to a string representation
pub fn key_event_to_string(key: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("alt");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        // Only add shift for non-character keys or when combined with ctrl/alt
        if !matches!(key.code, KeyCode::Char(_)) || !parts.is_empty() {
            parts.push("shift");
        }
    }

    let key_name = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Esc => "esc".to_string(),
        _ => return String::new(),
    };

    if parts.is_empty() {
        key_name
    } else {
        parts.push(&key_name);
        parts.join("+")
    }
}

/// Parse a key string (as written in keymap.toml) back into a KeyEvent
pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = spec;
    loop {
        if let Some(r) = rest.strip_prefix("ctrl+") {
            modifiers |= KeyModifiers::CONTROL;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("alt+") {
            modifiers |= KeyModifiers::ALT;
            rest = r;
        } else if let Some(r) = rest.strip_prefix("shift+") {
            modifiers |= KeyModifiers::SHIFT;
            rest = r;
        } else {
            break;
        }
    }

    let code = match rest {
        "space" => KeyCode::Char(' '),
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    if c.is_ascii_uppercase() {
                        modifiers |= KeyModifiers::SHIFT;
                    }
                    KeyCode::Char(c)
                }
                (Some('f'), Some(_)) => KeyCode::F(other[1..].parse().ok()?),
                _ => return None,
            }
        }
    };
    Some(KeyEvent::new(code, modifiers))
}

/// Parse a command name to a Command
fn parse_command(action: &str) -> Option<Command> {
    match action {
        "activate" => Some(Command::Activate),
        "cancel" => Some(Command::Cancel),
        "move_down" => Some(Command::MoveDown),
        "move_up" => Some(Command::MoveUp),
        "extend_down" => Some(Command::ExtendDown),
        "extend_up" => Some(Command::ExtendUp),
        "toggle_select" => Some(Command::ToggleSelect),
        "confirm" => Some(Command::Confirm),
        "close" => Some(Command::Close),
        "yank" => Some(Command::Yank),
        "paste_after" => Some(Command::PasteAfter),
        "paste_before" => Some(Command::PasteBefore),
        "first" => Some(Command::First),
        "last" => Some(Command::Last),
        "start_jump" => Some(Command::StartJump),
        "start_scroll" => Some(Command::StartScroll),
        "set_mark" => Some(Command::StartSetMark),
        "goto_mark" => Some(Command::StartGotoMark),
        "jump_back" => Some(Command::JumpBack),
        "jump_forward" => Some(Command::JumpForward),
        "clear_marks" => Some(Command::ClearMarks),
        "execute" => Some(Command::Execute),
        "scroll_center" => Some(Command::ScrollCenter),
        "scroll_top" => Some(Command::ScrollTop),
        "scroll_bottom" => Some(Command::ScrollBottom),
        _ => None,
    }
}
