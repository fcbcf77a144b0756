//! Jump list - bounded back/forward history of previously current items

use tracing::debug;

use crate::tree::{ItemId, TabTree};

/// Default maximum number of entries
pub const DEFAULT_JUMPLIST_SIZE: usize = 100;

/// History of items that were current before a jump
///
/// `cursor` indexes the entry the user is "on"; at the live edge it is the
/// last entry.
#[derive(Debug)]
pub struct JumpList {
    entries: Vec<ItemId>,
    cursor: usize,
    max_size: usize,
    suspended: bool,
}

impl Default for JumpList {
    fn default() -> Self {
        Self::new(DEFAULT_JUMPLIST_SIZE)
    }
}

impl JumpList {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_size: max_size.max(1),
            suspended: false,
        }
    }

    pub fn entries(&self) -> &[ItemId] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Stop recording until [`JumpList::resume`]
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Append a position, discarding any forward history
    pub fn record(&mut self, item: ItemId, tree: &TabTree) {
        if self.suspended {
            return;
        }
        self.prune(tree);
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        if self.entries.last() == Some(&item) {
            self.cursor = self.entries.len() - 1;
            return;
        }
        self.entries.push(item);
        if self.entries.len() > self.max_size {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry, returning the item to make current
    ///
    /// Leaving the live edge records `current` first so forward can return to it.
    pub fn back(&mut self, current: Option<ItemId>, tree: &TabTree) -> Option<ItemId> {
        self.prune(tree);
        if let Some(current) = current {
            let at_live_edge = !self.entries.is_empty() && self.cursor == self.entries.len() - 1;
            if at_live_edge && self.entries.get(self.cursor) != Some(&current) {
                self.record(current, tree);
            }
        }
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).copied()
    }

    /// Step forward one entry
    pub fn forward(&mut self, tree: &TabTree) -> Option<ItemId> {
        self.prune(tree);
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).copied()
    }

    /// Drop entries whose item left the tree
    ///
    /// The cursor keeps pointing at the same surviving entry, or is clamped
    /// to the new end when its entry was dropped.
    pub fn prune(&mut self, tree: &TabTree) {
        if self.entries.iter().all(|id| tree.contains(*id)) {
            return;
        }
        let cursor = self.cursor.min(self.entries.len());
        let survivors_before = self.entries[..cursor]
            .iter()
            .filter(|id| tree.contains(**id))
            .count();
        let pointed_alive = self
            .entries
            .get(self.cursor)
            .is_some_and(|id| tree.contains(*id));

        let before = self.entries.len();
        self.entries.retain(|id| tree.contains(*id));
        debug!(dropped = before - self.entries.len(), "pruned jump list");

        self.cursor = if pointed_alive {
            survivors_before
        } else {
            self.entries.len().saturating_sub(1)
        };
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
