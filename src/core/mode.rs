//! Navigation mode definitions

use std::time::Instant;

use super::selection::Direction;
use super::timer::{CountBuffer, Deadline, DoublePress};
use crate::tree::ItemId;

/// Current navigation mode with embedded state
///
/// Timers live inside the variant that uses them, so replacing the mode
/// drops every timer of the mode being left.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Mode {
    /// Not navigating; only the enter trigger is consumed
    #[default]
    Inactive,
    /// Waiting for a sub-mode key
    Root { deadline: Deadline },
    /// Moving a highlight through the visible sequence
    Browse(BrowseState),
    /// Typing a 1-based absolute position
    AbsoluteJump { count: CountBuffer },
    /// Waiting for a center/top/bottom command
    ScrollCommand,
    /// Waiting for the mark character to set
    SetMark,
    /// Waiting for the mark character to jump to
    GotoMark,
}

/// State carried while browsing
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    /// Direction of the key that started browsing
    pub direction: Direction,
    /// Reference item for numeric distance jumps
    pub anchor: Option<ItemId>,
    /// Pending first press of the "first" key
    pub double_key: DoublePress,
    /// Distance being typed
    pub count: CountBuffer,
}

impl BrowseState {
    pub fn new(direction: Direction, anchor: Option<ItemId>) -> Self {
        Self {
            direction,
            anchor,
            double_key: DoublePress::default(),
            count: CountBuffer::default(),
        }
    }

    /// Whether a first cancel should only clear pending input
    pub fn has_pending(&self) -> bool {
        !self.count.is_empty() || self.double_key.is_pending()
    }

    pub fn clear_pending(&mut self) {
        self.count.clear();
        self.double_key.cancel();
    }
}

impl Mode {
    /// Short label for the status line
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Inactive => "",
            Mode::Root { .. } => "NAV",
            Mode::Browse(_) => "BROWSE",
            Mode::AbsoluteJump { .. } => "GOTO",
            Mode::ScrollCommand => "SCROLL",
            Mode::SetMark => "MARK",
            Mode::GotoMark => "JUMP-MARK",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Mode::Inactive)
    }

    /// Digits typed so far, if the mode accumulates a count
    pub fn pending_count(&self) -> Option<&str> {
        match self {
            Mode::AbsoluteJump { count } => Some(count.digits()),
            Mode::Browse(state) if !state.count.is_empty() => Some(state.count.digits()),
            _ => None,
        }
    }

    /// Earliest instant at which [`crate::core::Engine::tick`] has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match self {
            Mode::Root { deadline } => deadline.at(),
            Mode::AbsoluteJump { count } => count.deadline(),
            Mode::Browse(state) => [state.count.deadline(), state.double_key.deadline()]
                .into_iter()
                .flatten()
                .min(),
            Mode::Inactive | Mode::ScrollCommand | Mode::SetMark | Mode::GotoMark => None,
        }
    }
}
