//! Item tree - owns items and flattens them into the visible sequence

use std::cell::OnceCell;
use std::collections::HashMap;

use tracing::debug;

use super::{GroupId, Item, ItemId, ItemKind, Side};
use crate::error::{NavError, Result};

/// Deepest level a container may sit at (0 = top level)
pub const MAX_NESTING_DEPTH: usize = 4;

/// Owns the item tree, the current item and the cached visible sequence
#[derive(Debug, Default)]
pub struct TabTree {
    /// All live items by id
    items: HashMap<ItemId, Item>,
    /// Top-level items in order (all workspaces)
    roots: Vec<ItemId>,
    /// Next id to hand out
    next_id: u64,
    /// The item the host considers active
    current: Option<ItemId>,
    /// When set, only top-level items of this workspace are visible
    active_group: Option<GroupId>,
    /// Flattened, collapse-aware ordering; reset on every mutation
    visible: OnceCell<Vec<ItemId>>,
}

impl TabTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a leaf to `parent` (or to the top level, respecting the pinned area)
    ///
    /// Leaves inside a container are always pinned.
    pub fn add_leaf(
        &mut self,
        parent: Option<ItemId>,
        title: impl Into<String>,
        group: GroupId,
        pinned: bool,
    ) -> Result<ItemId> {
        let id = self.alloc_id();
        let pinned = pinned || parent.is_some();
        self.attach(Item::leaf(id, title.into(), group, pinned), parent)?;
        Ok(id)
    }

    /// Append an empty, expanded container
    pub fn add_container(
        &mut self,
        parent: Option<ItemId>,
        title: impl Into<String>,
        group: GroupId,
    ) -> Result<ItemId> {
        let id = self.alloc_id();
        if let Some(p) = parent {
            let depth = self.depth(p) + 1;
            if depth > MAX_NESTING_DEPTH {
                return Err(NavError::NestingTooDeep { item: id, depth });
            }
        }
        self.attach(Item::container(id, title.into(), group), parent)?;
        Ok(id)
    }

    fn alloc_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId(self.next_id)
    }

    fn attach(&mut self, mut item: Item, parent: Option<ItemId>) -> Result<()> {
        let id = item.id;
        match parent {
            Some(p) => {
                match self.items.get_mut(&p) {
                    Some(Item {
                        kind: ItemKind::Container { children, .. },
                        ..
                    }) => children.push(id),
                    Some(_) => return Err(NavError::NotAContainer(p)),
                    None => return Err(NavError::NotFound(p)),
                }
                item.parent = Some(p);
            }
            None => {
                let at = if item.in_pinned_area() {
                    self.pinned_boundary(item.group)
                } else {
                    self.roots.len()
                };
                self.roots.insert(at, id);
            }
        }
        self.items.insert(id, item);
        self.invalidate();
        Ok(())
    }

    /// Get an item by id
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Get an item by id, reporting a missing one as an error
    pub fn item(&self, id: ItemId) -> Result<&Item> {
        self.items.get(&id).ok_or(NavError::NotFound(id))
    }

    fn item_mut(&mut self, id: ItemId) -> Result<&mut Item> {
        self.items.get_mut(&id).ok_or(NavError::NotFound(id))
    }

    /// Whether the item is still part of the tree
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Total number of live items (visible or not)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top-level items of every workspace, in order
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    /// First item with the given title, in document order
    pub fn find_by_title(&self, title: &str) -> Option<ItemId> {
        self.document_order()
            .into_iter()
            .find(|id| self.items.get(id).is_some_and(|i| i.title == title))
    }

    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.items.get(&id).and_then(|i| i.parent)
    }

    /// Enclosing containers from innermost outward
    ///
    /// The walk is capped one level past the deepest legal container.
    pub fn ancestors(&self, id: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        std::iter::successors(self.parent_of(id), move |p| self.parent_of(*p))
            .take(MAX_NESTING_DEPTH + 1)
    }

    /// Number of enclosing containers
    pub fn depth(&self, id: ItemId) -> usize {
        self.ancestors(id).count()
    }

    /// Whether `ancestor` encloses `id`
    pub fn is_ancestor(&self, ancestor: ItemId, id: ItemId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Levels of nested containers below `id` (0 when none)
    fn container_height(&self, id: ItemId) -> usize {
        self.items
            .get(&id)
            .map(|item| {
                item.children()
                    .iter()
                    .filter(|c| self.items.get(*c).is_some_and(Item::is_container))
                    .map(|c| 1 + self.container_height(*c))
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }

    // ------------------------------------------------------------------
    // Visible sequence
    // ------------------------------------------------------------------

    /// Flatten the tree into the list of navigable items
    ///
    /// Contents of collapsed containers are skipped. The result is cached
    /// until the next structural mutation.
    pub fn visible_sequence(&self) -> &[ItemId] {
        self.visible.get_or_init(|| {
            let mut out = Vec::new();
            for id in &self.roots {
                if let Some(item) = self.items.get(id) {
                    if self.active_group.is_none_or(|g| g == item.group) {
                        self.collect_visible(item, &mut out);
                    }
                }
            }
            out
        })
    }

    fn collect_visible(&self, item: &Item, out: &mut Vec<ItemId>) {
        out.push(item.id);
        if let ItemKind::Container {
            collapsed: false,
            children,
        } = &item.kind
        {
            for child in children {
                if let Some(child) = self.items.get(child) {
                    self.collect_visible(child, out);
                }
            }
        }
    }

    fn invalidate(&mut self) {
        self.visible.take();
    }

    pub fn visible_len(&self) -> usize {
        self.visible_sequence().len()
    }

    /// Position of an item in the visible sequence
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.visible_sequence().iter().position(|v| *v == id)
    }

    pub fn visible_at(&self, index: usize) -> Option<ItemId> {
        self.visible_sequence().get(index).copied()
    }

    /// Position of the item, or of its closest visible ancestor when hidden
    pub fn nearest_visible_index(&self, id: ItemId) -> Option<usize> {
        self.index_of(id)
            .or_else(|| self.ancestors(id).find_map(|a| self.index_of(a)))
    }

    /// Every item in depth-first order, ignoring collapse and workspaces
    pub fn document_order(&self) -> Vec<ItemId> {
        fn walk(tree: &TabTree, id: ItemId, out: &mut Vec<ItemId>) {
            if let Some(item) = tree.items.get(&id) {
                out.push(id);
                for child in item.children() {
                    walk(tree, *child, out);
                }
            }
        }
        let mut out = Vec::with_capacity(self.items.len());
        for id in &self.roots {
            walk(self, *id, &mut out);
        }
        out
    }

    /// Document-order position of every item
    pub fn document_positions(&self) -> HashMap<ItemId, usize> {
        self.document_order()
            .into_iter()
            .enumerate()
            .map(|(pos, id)| (id, pos))
            .collect()
    }

    // ------------------------------------------------------------------
    // Collapse / workspace / current
    // ------------------------------------------------------------------

    /// Toggle a container, returning the new collapsed state
    pub fn toggle_collapsed(&mut self, id: ItemId) -> Result<bool> {
        let collapsed = match &mut self.item_mut(id)?.kind {
            ItemKind::Container { collapsed, .. } => {
                *collapsed = !*collapsed;
                *collapsed
            }
            ItemKind::Leaf { .. } => return Err(NavError::NotAContainer(id)),
        };
        self.invalidate();
        debug!(item = %id, collapsed, "toggled container");
        Ok(collapsed)
    }

    pub fn set_collapsed(&mut self, id: ItemId, value: bool) -> Result<()> {
        match &mut self.item_mut(id)?.kind {
            ItemKind::Container { collapsed, .. } => *collapsed = value,
            ItemKind::Leaf { .. } => return Err(NavError::NotAContainer(id)),
        }
        self.invalidate();
        Ok(())
    }

    pub fn current(&self) -> Option<ItemId> {
        self.current
    }

    pub fn set_current(&mut self, id: ItemId) -> Result<()> {
        self.item(id)?;
        self.current = Some(id);
        Ok(())
    }

    pub fn active_group(&self) -> Option<GroupId> {
        self.active_group
    }

    /// Restrict the visible sequence to one workspace (`None` shows all)
    pub fn set_active_group(&mut self, group: Option<GroupId>) {
        self.active_group = group;
        self.invalidate();
    }

    // ------------------------------------------------------------------
    // Host primitives used by close and paste
    // ------------------------------------------------------------------

    /// Remove an item together with its subtree, returning every removed id
    ///
    /// If the current item goes away, the item that slides into its visible
    /// position becomes current.
    pub fn remove(&mut self, id: ItemId) -> Result<Vec<ItemId>> {
        self.item(id)?;
        let current_index = self.current.and_then(|c| self.nearest_visible_index(c));
        self.detach(id)?;

        let mut removed = Vec::new();
        self.drop_subtree(id, &mut removed);
        self.invalidate();

        if self.current.is_some_and(|c| !self.items.contains_key(&c)) {
            let next = current_index.and_then(|i| {
                let seq = self.visible_sequence();
                seq.get(i.min(seq.len().saturating_sub(1))).copied()
            });
            self.current = next;
        }
        debug!(item = %id, count = removed.len(), "removed subtree");
        Ok(removed)
    }

    fn drop_subtree(&mut self, id: ItemId, removed: &mut Vec<ItemId>) {
        if let Some(item) = self.items.remove(&id) {
            removed.push(id);
            if let ItemKind::Container { children, .. } = item.kind {
                for child in children {
                    self.drop_subtree(child, removed);
                }
            }
        }
    }

    fn siblings_mut(&mut self, parent: Option<ItemId>) -> Result<&mut Vec<ItemId>> {
        match parent {
            None => Ok(&mut self.roots),
            Some(p) => match self.items.get_mut(&p) {
                Some(Item {
                    kind: ItemKind::Container { children, .. },
                    ..
                }) => Ok(children),
                Some(_) => Err(NavError::NotAContainer(p)),
                None => Err(NavError::NotFound(p)),
            },
        }
    }

    fn detach(&mut self, id: ItemId) -> Result<()> {
        let parent = self.item(id)?.parent;
        self.siblings_mut(parent)?.retain(|c| *c != id);
        self.item_mut(id)?.parent = None;
        Ok(())
    }

    /// Reassign an item (and a container's whole subtree) to a workspace
    pub fn set_group(&mut self, id: ItemId, group: GroupId) -> Result<()> {
        let item = self.item_mut(id)?;
        item.group = group;
        let children = item.children().to_vec();
        for child in children {
            self.set_group(child, group)?;
        }
        self.invalidate();
        Ok(())
    }

    /// Pin or unpin a leaf
    ///
    /// Top-level leaves move to the pinned-area boundary: the end of the
    /// pinned area when pinned, the start of the unpinned area otherwise.
    pub fn set_pinned(&mut self, id: ItemId, value: bool) -> Result<()> {
        let item = self.item_mut(id)?;
        match &mut item.kind {
            ItemKind::Leaf { pinned } if *pinned == value => return Ok(()),
            ItemKind::Leaf { pinned } => *pinned = value,
            ItemKind::Container { .. } => return Err(NavError::NotALeaf(id)),
        }
        let (parent, group) = (item.parent, item.group);
        if parent.is_none() {
            self.roots.retain(|r| *r != id);
            let at = self.pinned_boundary(group);
            self.roots.insert(at, id);
        }
        self.invalidate();
        Ok(())
    }

    /// Index in `roots` right after the workspace's pinned area
    fn pinned_boundary(&self, group: GroupId) -> usize {
        let mut end_of_pinned = None;
        for (i, id) in self.roots.iter().enumerate() {
            let Some(item) = self.items.get(id) else {
                continue;
            };
            if item.group != group {
                continue;
            }
            if !item.in_pinned_area() {
                return i;
            }
            end_of_pinned = Some(i + 1);
        }
        end_of_pinned.unwrap_or(self.roots.len())
    }

    /// Move `id` next to `anchor`, joining the anchor's container (if any)
    ///
    /// Moving a container is rejected when the target would sit inside the
    /// container itself or exceed [`MAX_NESTING_DEPTH`]; the tree is left
    /// untouched on error.
    pub fn move_relative(&mut self, id: ItemId, anchor: ItemId, side: Side) -> Result<()> {
        if id == anchor {
            return Ok(());
        }
        let target_parent = self.item(anchor)?.parent;
        if self.item(id)?.is_container() {
            if let Some(p) = target_parent {
                if p == id || self.is_ancestor(id, p) {
                    return Err(NavError::CircularNesting { item: id, target: p });
                }
                let depth = self.depth(p) + 1 + self.container_height(id);
                if depth > MAX_NESTING_DEPTH {
                    return Err(NavError::NestingTooDeep { item: id, depth });
                }
            }
        }

        self.detach(id)?;
        let siblings = self.siblings_mut(target_parent)?;
        let at = siblings
            .iter()
            .position(|c| *c == anchor)
            .map(|i| match side {
                Side::Before => i,
                Side::After => i + 1,
            })
            .unwrap_or(siblings.len());
        siblings.insert(at, id);
        self.item_mut(id)?.parent = target_parent;
        self.invalidate();
        Ok(())
    }

    /// Take an item out of its container, placing it right after that container
    pub fn detach_from_container(&mut self, id: ItemId) -> Result<()> {
        match self.item(id)?.parent {
            Some(container) => self.move_relative(id, container, Side::After),
            None => Ok(()),
        }
    }

    /// Move a top-level-bound item to the edge of its workspace's pinned area
    pub fn move_to_pinned_boundary(&mut self, id: ItemId, group: GroupId) -> Result<()> {
        self.detach(id)?;
        let at = self.pinned_boundary(group);
        self.roots.insert(at, id);
        self.invalidate();
        Ok(())
    }
}
