//! Yank buffer - items staged for relocation

use std::collections::HashSet;

use crate::tree::{ItemId, TabTree};

/// Ordered set of items captured by a yank
#[derive(Debug, Default, Clone)]
pub struct YankBuffer {
    items: Vec<ItemId>,
}

impl YankBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with `candidates`
    ///
    /// Items are sorted by document order. An item whose enclosing container
    /// is also captured is dropped, since it travels with the container.
    pub fn capture(&mut self, candidates: impl IntoIterator<Item = ItemId>, tree: &TabTree) -> usize {
        let picked: HashSet<ItemId> = candidates
            .into_iter()
            .filter(|id| tree.contains(*id))
            .collect();
        let positions = tree.document_positions();

        let mut items: Vec<ItemId> = picked
            .iter()
            .copied()
            .filter(|id| !tree.ancestors(*id).any(|a| picked.contains(&a)))
            .collect();
        items.sort_by_key(|id| positions.get(id).copied().unwrap_or(usize::MAX));

        self.items = items;
        self.items.len()
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Take the buffered items, leaving the buffer empty
    pub fn take(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::GroupId;

    const WS: GroupId = GroupId(0);

    #[test]
    fn test_capture_sorts_by_document_order() {
        let mut tree = TabTree::new();
        let a = tree.add_leaf(None, "a", WS, false).unwrap();
        let b = tree.add_leaf(None, "b", WS, false).unwrap();
        let c = tree.add_leaf(None, "c", WS, false).unwrap();

        let mut yank = YankBuffer::new();
        assert_eq!(yank.capture([c, a, b], &tree), 3);
        assert_eq!(yank.items(), &[a, b, c]);
    }

    #[test]
    fn test_capture_drops_descendants_of_captured_container() {
        let mut tree = TabTree::new();
        let folder = tree.add_container(None, "folder", WS).unwrap();
        let inner = tree.add_leaf(Some(folder), "inner", WS, true).unwrap();
        let loose = tree.add_leaf(None, "loose", WS, false).unwrap();

        let mut yank = YankBuffer::new();
        yank.capture([inner, folder, loose], &tree);
        assert_eq!(yank.items(), &[folder, loose]);
    }

    #[test]
    fn test_capture_ignores_dead_items() {
        let mut tree = TabTree::new();
        let a = tree.add_leaf(None, "a", WS, false).unwrap();
        let b = tree.add_leaf(None, "b", WS, false).unwrap();
        tree.remove(b).unwrap();

        let mut yank = YankBuffer::new();
        yank.capture([a, b], &tree);
        assert_eq!(yank.items(), &[a]);
    }

    #[test]
    fn test_take_empties() {
        let mut tree = TabTree::new();
        let a = tree.add_leaf(None, "a", WS, false).unwrap();
        let mut yank = YankBuffer::new();
        yank.capture([a], &tree);
        assert_eq!(yank.take(), vec![a]);
        assert!(yank.is_empty());
    }
}
