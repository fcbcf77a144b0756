//! Keyboard event resolution

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::keymap::{KeyBindingRegistry, KeyContext};
use crate::core::Mode;

/// Logical commands a key can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Enter navigation (from inactive)
    Activate,
    /// Leave the current mode (two-stage in browse)
    Cancel,
    /// Move down (starts browsing from root)
    MoveDown,
    /// Move up (starts browsing from root)
    MoveUp,
    /// Move down, growing or shrinking the selection band
    ExtendDown,
    /// Move up, growing or shrinking the selection band
    ExtendUp,
    /// Add/remove the highlighted item from the selection
    ToggleSelect,
    /// Activate the highlighted tab or fold/unfold a folder
    Confirm,
    /// Close the selection or the highlighted item
    Close,
    /// Stage the selection for moving
    Yank,
    /// Move staged items after the highlighted item
    PasteAfter,
    /// Move staged items before the highlighted item
    PasteBefore,
    /// Jump to the first position
    First,
    /// Jump to the last position
    Last,
    /// Enter absolute jump
    StartJump,
    /// Enter scroll command
    StartScroll,
    /// Enter set-mark
    StartSetMark,
    /// Enter goto-mark
    StartGotoMark,
    /// Jump list back
    JumpBack,
    /// Jump list forward
    JumpForward,
    /// Forget every mark
    ClearMarks,
    /// Run the typed count now
    Execute,
    /// Center the current item
    ScrollCenter,
    /// Align the current item to the top
    ScrollTop,
    /// Align the current item to the bottom
    ScrollBottom,
    /// A count digit
    Digit(char),
    /// A raw character (mark names)
    Char(char),
}

/// Resolve a key for the given mode
///
/// `None` means the key means nothing here; sub-modes treat that as invalid input.
pub fn resolve(registry: &KeyBindingRegistry, mode: &Mode, key: &KeyEvent) -> Option<Command> {
    let plain = plain_char(key);
    match mode {
        Mode::Inactive => registry.lookup(KeyContext::Inactive, key),
        Mode::Root { .. } => registry.lookup(KeyContext::Root, key),
        Mode::Browse(_) => plain
            .filter(char::is_ascii_digit)
            .map(Command::Digit)
            .or_else(|| registry.lookup(KeyContext::Browse, key)),
        Mode::AbsoluteJump { .. } => plain
            .filter(char::is_ascii_digit)
            .map(Command::Digit)
            .or_else(|| registry.lookup(KeyContext::Jump, key)),
        Mode::ScrollCommand => registry.lookup(KeyContext::Scroll, key),
        Mode::SetMark | Mode::GotoMark => {
            if key.code == KeyCode::Esc {
                Some(Command::Cancel)
            } else {
                plain.map(Command::Char)
            }
        }
    }
}

/// Character typed without ctrl/alt
fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(c)
        }
        _ => None,
    }
}
