//! Selection model - highlight index, selected items and the yank buffer

use std::collections::HashSet;

use crate::action::YankBuffer;
use crate::tree::{ItemId, TabTree};

/// Direction of travel through the visible sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Apply `distance` steps from `index`, clamped to `[0, len - 1]`
    pub fn offset(self, index: usize, distance: usize, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match self {
            Direction::Up => index.saturating_sub(distance),
            Direction::Down => index.saturating_add(distance).min(last),
        }
    }
}

/// Highlight, multi-select set and yank buffer
///
/// The highlight is `None` exactly when the visible sequence is empty.
#[derive(Debug, Default)]
pub struct Selection {
    highlight: Option<usize>,
    selected: HashSet<ItemId>,
    /// Items staged by the last yank
    pub yank: YankBuffer,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Put the highlight on `index`, clamped into a sequence of `len` items
    pub fn set_highlight(&mut self, index: usize, len: usize) -> Option<usize> {
        self.highlight = (len > 0).then(|| index.min(len - 1));
        self.highlight
    }

    /// Re-clamp the highlight after the sequence changed length
    pub fn clamp(&mut self, len: usize) -> Option<usize> {
        let index = self.highlight.unwrap_or(0);
        self.set_highlight(index, len)
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Move the highlight one step; returns `(from, to)` when it moved
    pub fn step(&mut self, direction: Direction, len: usize) -> Option<(usize, usize)> {
        let from = self.clamp(len)?;
        let to = direction.offset(from, 1, len);
        self.highlight = Some(to);
        (from != to).then_some((from, to))
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// Add or remove an item, returning whether it is now selected
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Grow or shrink a contiguous selection band after moving `from` → `to`
    ///
    /// Arriving on a selected item means the band is being walked back, so the
    /// item left behind is dropped. Otherwise both ends join the band.
    pub fn extend(&mut self, from: ItemId, to: ItemId) {
        if self.selected.contains(&to) {
            self.selected.remove(&from);
        } else {
            self.selected.insert(from);
            self.selected.insert(to);
        }
    }

    pub fn selected(&self) -> &HashSet<ItemId> {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn clear_selected(&mut self) {
        self.selected.clear();
    }

    /// Selected items, or the highlighted one when nothing is selected
    pub fn effective(&self, tree: &TabTree) -> Vec<ItemId> {
        if self.selected.is_empty() {
            self.highlight
                .and_then(|i| tree.visible_at(i))
                .into_iter()
                .collect()
        } else {
            self.selected.iter().copied().collect()
        }
    }

    /// Forget items that left the tree
    pub fn prune(&mut self, tree: &TabTree) {
        self.selected.retain(|id| tree.contains(*id));
    }

    /// Whether a first cancel has something to clear
    pub fn has_transient(&self) -> bool {
        !self.selected.is_empty() || !self.yank.is_empty()
    }

    /// Drop selection and yank buffer (highlight is kept)
    pub fn clear_transient(&mut self) {
        self.selected.clear();
        self.yank.clear();
    }
}
