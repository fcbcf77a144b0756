//! Tree item (node) definition

use std::fmt;

/// Stable identity of an item in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Workspace tag partitioning the top-level items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ws{}", self.0)
    }
}

/// Which side of an anchor an item is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// Leaf or container payload
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// An addressable tab
    Leaf { pinned: bool },
    /// A folder of tabs and nested folders
    Container {
        collapsed: bool,
        children: Vec<ItemId>,
    },
}

/// A single item in the tree
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Stable identity
    pub id: ItemId,
    /// Display title (tab title or folder name)
    pub title: String,
    /// Owning workspace
    pub group: GroupId,
    /// Enclosing container, `None` at top level
    pub(crate) parent: Option<ItemId>,
    /// Leaf/container payload
    pub kind: ItemKind,
}

impl Item {
    pub(crate) fn leaf(id: ItemId, title: String, group: GroupId, pinned: bool) -> Self {
        Self {
            id,
            title,
            group,
            parent: None,
            kind: ItemKind::Leaf { pinned },
        }
    }

    pub(crate) fn container(id: ItemId, title: String, group: GroupId) -> Self {
        Self {
            id,
            title,
            group,
            parent: None,
            kind: ItemKind::Container {
                collapsed: false,
                children: Vec::new(),
            },
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ItemKind::Container { .. })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, ItemKind::Leaf { .. })
    }

    /// Pin flag; containers are never pinned themselves
    pub fn is_pinned(&self) -> bool {
        matches!(self.kind, ItemKind::Leaf { pinned: true })
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self.kind, ItemKind::Container { collapsed: true, .. })
    }

    /// Enclosing container, if any
    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    /// Children in order (empty for leaves)
    pub fn children(&self) -> &[ItemId] {
        match &self.kind {
            ItemKind::Container { children, .. } => children,
            ItemKind::Leaf { .. } => &[],
        }
    }

    /// Whether the item lives in the pinned area (pinned leaves and containers)
    pub fn in_pinned_area(&self) -> bool {
        match self.kind {
            ItemKind::Leaf { pinned } => pinned,
            ItemKind::Container { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_flags() {
        let leaf = Item::leaf(ItemId(1), "a".into(), GroupId(0), true);
        assert!(leaf.is_leaf());
        assert!(!leaf.is_container());
        assert!(leaf.is_pinned());
        assert!(!leaf.is_collapsed());
        assert!(leaf.children().is_empty());
        assert!(leaf.in_pinned_area());
    }

    #[test]
    fn test_container_flags() {
        let mut folder = Item::container(ItemId(2), "docs".into(), GroupId(0));
        assert!(folder.is_container());
        assert!(!folder.is_pinned());
        assert!(folder.in_pinned_area());
        if let ItemKind::Container { collapsed, .. } = &mut folder.kind {
            *collapsed = true;
        }
        assert!(folder.is_collapsed());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ItemId(42).to_string(), "#42");
        assert_eq!(GroupId(3).to_string(), "ws3");
    }
}
