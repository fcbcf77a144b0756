//! Marks registry - single-character labels bound to items
//!
//! A character maps to one item and an item carries at most one mark.
//! Marks whose item has left the tree are dropped the next time they are read.

use std::collections::BTreeMap;

use tracing::debug;

use crate::tree::{ItemId, TabTree};

/// Outcome of [`Marks::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkChange {
    /// The mark now points at the item; `moved_from` is the item's previous mark
    Set { moved_from: Option<char> },
    /// The same mark was already on the item and has been removed
    Cleared,
}

/// Character → item map
#[derive(Debug, Default)]
pub struct Marks {
    marks: BTreeMap<char, ItemId>,
}

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters accepted as mark names
    pub fn is_mark_char(c: char) -> bool {
        c.is_ascii_alphanumeric()
    }

    /// Bind `c` to `item`, or toggle it off when that exact binding exists
    pub fn set(&mut self, c: char, item: ItemId) -> MarkChange {
        if self.marks.get(&c) == Some(&item) {
            self.marks.remove(&c);
            return MarkChange::Cleared;
        }
        let moved_from = self.mark_of(item);
        if let Some(old) = moved_from {
            self.marks.remove(&old);
        }
        self.marks.insert(c, item);
        MarkChange::Set { moved_from }
    }

    /// Resolve a mark to a live item, dropping it if the item is gone
    pub fn goto(&mut self, c: char, tree: &TabTree) -> Option<ItemId> {
        let item = *self.marks.get(&c)?;
        if tree.contains(item) {
            Some(item)
        } else {
            debug!(mark = %c, item = %item, "dropping stale mark");
            self.marks.remove(&c);
            None
        }
    }

    pub fn get(&self, c: char) -> Option<ItemId> {
        self.marks.get(&c).copied()
    }

    /// Reverse lookup, for display
    pub fn mark_of(&self, item: ItemId) -> Option<char> {
        self.marks
            .iter()
            .find_map(|(c, id)| (*id == item).then_some(*c))
    }

    /// Drop every mark whose item is no longer in the tree
    pub fn prune(&mut self, tree: &TabTree) -> usize {
        let before = self.marks.len();
        self.marks.retain(|_, id| tree.contains(*id));
        before - self.marks.len()
    }

    pub fn clear_all(&mut self) {
        self.marks.clear();
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Marks in character order
    pub fn iter(&self) -> impl Iterator<Item = (char, ItemId)> + '_ {
        self.marks.iter().map(|(c, id)| (*c, *id))
    }
}
