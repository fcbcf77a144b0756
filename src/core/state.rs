//! Engine state - the single owner of every piece of navigation state

use std::collections::HashSet;
use std::time::Instant;

use crossterm::event::KeyEvent;
use tracing::{debug, warn};

use super::config::EngineConfig;
use super::jumplist::JumpList;
use super::marks::{MarkChange, Marks};
use super::mode::Mode;
use super::selection::Selection;
use super::status::StatusLine;
use crate::action::relocate::{self, PasteReport};
use crate::error::Result;
use crate::handler::{self, KeyBindingRegistry};
use crate::tree::{ItemId, Side, TabTree};

/// How the host should align an item when scrolling to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Center,
    Top,
    Bottom,
}

/// A pending scroll the host should perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub item: ItemId,
    pub align: ScrollAlign,
}

/// Modal navigator over a [`TabTree`]
///
/// Input arrives through [`Engine::handle_key`] and timers fire through
/// [`Engine::tick`]; both take the current instant so the engine never reads
/// a clock itself.
pub struct Engine {
    pub(crate) tree: TabTree,
    pub(crate) mode: Mode,
    pub(crate) selection: Selection,
    pub(crate) marks: Marks,
    pub(crate) jumps: JumpList,
    pub(crate) config: EngineConfig,
    pub(crate) keymap: KeyBindingRegistry,
    /// Item that was current when navigation started
    pub(crate) origin: Option<ItemId>,
    pub(crate) scroll_request: Option<ScrollRequest>,
    pub(crate) message: Option<String>,
}

impl Engine {
    pub fn new(tree: TabTree, config: EngineConfig) -> Self {
        Self {
            tree,
            mode: Mode::Inactive,
            selection: Selection::new(),
            marks: Marks::new(),
            jumps: JumpList::new(config.jumplist_max),
            config,
            keymap: KeyBindingRegistry::new(),
            origin: None,
            scroll_request: None,
            message: None,
        }
    }

    /// Replace the default key bindings
    pub fn with_keymap(mut self, keymap: KeyBindingRegistry) -> Self {
        self.keymap = keymap;
        self
    }

    // --- input ---

    /// Feed one key event; returns whether the engine consumed it
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        handler::handle_key(self, key, now)
    }

    /// Fire any deadline that has passed; returns whether state changed
    pub fn tick(&mut self, now: Instant) -> bool {
        handler::tick(self, now)
    }

    /// When the host should call [`Engine::tick`] next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.mode.next_deadline()
    }

    // --- observation ---

    pub fn tree(&self) -> &TabTree {
        &self.tree
    }

    /// Mutable access for host-side changes (new tabs, external closes)
    pub fn tree_mut(&mut self) -> &mut TabTree {
        &mut self.tree
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn highlight(&self) -> Option<usize> {
        self.selection.highlight()
    }

    /// Item under the highlight
    pub fn highlighted(&self) -> Option<ItemId> {
        self.selection
            .highlight()
            .and_then(|i| self.tree.visible_at(i))
    }

    pub fn visible_sequence(&self) -> &[ItemId] {
        self.tree.visible_sequence()
    }

    pub fn selected(&self) -> &HashSet<ItemId> {
        self.selection.selected()
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn yank_len(&self) -> usize {
        self.selection.yank.len()
    }

    pub fn yanked(&self) -> &[ItemId] {
        self.selection.yank.items()
    }

    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    pub fn jumps(&self) -> &JumpList {
        &self.jumps
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Set status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Hand the pending scroll to the host
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }

    /// Snapshot for a status line renderer
    pub fn status(&self) -> StatusLine {
        StatusLine {
            mode: self.mode.label(),
            pending: self.mode.pending_count().map(str::to_string),
            selected: self.selection.selected_count(),
            yanked: self.selection.yank.len(),
            highlighted: self
                .highlighted()
                .and_then(|id| self.tree.get(id))
                .map(|item| item.title.clone()),
            message: self.message.clone(),
        }
    }

    // --- operations ---

    /// Item the navigation session is about: the origin while it is alive,
    /// otherwise whatever the host has current
    pub fn focus_item(&self) -> Option<ItemId> {
        self.origin
            .filter(|id| self.tree.contains(*id))
            .or_else(|| self.tree.current())
    }

    /// Make `item` current, recording the previous current item in the jump list
    ///
    /// Returns whether the current item changed.
    pub fn activate(&mut self, item: ItemId) -> Result<bool> {
        self.tree.item(item)?;
        let previous = self.tree.current();
        if previous == Some(item) {
            return Ok(false);
        }
        if let Some(previous) = previous {
            self.jumps.record(previous, &self.tree);
        }
        self.tree.set_current(item)?;
        debug!(from = ?previous, to = %item, "current item changed");
        Ok(true)
    }

    /// Activate the visible item at `index` (clamped)
    pub fn move_to_index(&mut self, index: usize) -> Option<ItemId> {
        let len = self.tree.visible_len();
        if len == 0 {
            return None;
        }
        let target = self.tree.visible_at(index.min(len - 1))?;
        match self.activate(target) {
            Ok(_) => Some(target),
            Err(e) => {
                warn!(error = %e, "cannot activate item");
                None
            }
        }
    }

    /// Index of the "first" position
    pub fn first_index(&self) -> usize {
        if !self.config.first_skips_pinned {
            return 0;
        }
        self.tree
            .visible_sequence()
            .iter()
            .position(|id| self.tree.get(*id).is_some_and(|item| !item.in_pinned_area()))
            .unwrap_or(0)
    }

    /// Add or remove an item from the selection
    pub fn toggle_select(&mut self, item: ItemId) -> bool {
        self.tree.contains(item) && self.selection.toggle(item)
    }

    /// Stage the selection (or the highlighted item) for moving
    pub fn yank(&mut self) -> usize {
        let candidates = self.selection.effective(&self.tree);
        let count = self.selection.yank.capture(candidates, &self.tree);
        self.selection.clear_selected();
        count
    }

    /// Move the staged items next to `anchor`
    ///
    /// Selection and yank buffer are empty afterwards whatever happened to the
    /// individual items.
    pub fn paste(&mut self, anchor: ItemId, side: Side) -> PasteReport {
        let items = self.selection.yank.take();
        let report = relocate::paste(&mut self.tree, items, anchor, side);
        self.selection.clear_selected();

        if self.selection.highlight().is_some() {
            let len = self.tree.visible_len();
            match report
                .placed
                .first()
                .and_then(|id| self.tree.nearest_visible_index(*id))
            {
                Some(index) => {
                    self.selection.set_highlight(index, len);
                }
                None => {
                    self.selection.clamp(len);
                }
            }
        }
        report
    }

    /// Close every selected item, or the highlighted one when nothing is selected
    ///
    /// Returns the number of items that left the tree (subtrees included).
    pub fn close_effective(&mut self) -> usize {
        let mut removed = 0;
        for id in self.selection.effective(&self.tree) {
            // Already gone with an enclosing container
            if !self.tree.contains(id) {
                continue;
            }
            match self.tree.remove(id) {
                Ok(gone) => removed += gone.len(),
                Err(e) => warn!(item = %id, error = %e, "close failed"),
            }
        }
        self.selection.clear_selected();
        if self.selection.highlight().is_some() {
            self.selection.clamp(self.tree.visible_len());
        }
        removed
    }

    /// Step back through the jump list without recording the traversal
    pub fn jump_back(&mut self) -> Option<ItemId> {
        let current = self.tree.current();
        let target = self.jumps.back(current, &self.tree)?;
        self.traverse_to(target);
        Some(target)
    }

    /// Step forward through the jump list without recording the traversal
    pub fn jump_forward(&mut self) -> Option<ItemId> {
        let target = self.jumps.forward(&self.tree)?;
        self.traverse_to(target);
        Some(target)
    }

    fn traverse_to(&mut self, target: ItemId) {
        self.jumps.suspend();
        let result = self.activate(target);
        self.jumps.resume();
        if let Err(e) = result {
            warn!(item = %target, error = %e, "jump target vanished");
            return;
        }
        self.origin = Some(target);
        if let Some(index) = self.tree.nearest_visible_index(target) {
            self.selection.set_highlight(index, self.tree.visible_len());
        }
    }

    /// Set or toggle mark `c` on the focused item
    pub fn set_mark(&mut self, c: char) -> Option<MarkChange> {
        let item = self.focus_item()?;
        Some(self.marks.set(c, item))
    }

    /// Activate the item marked `c`
    pub fn goto_mark(&mut self, c: char) -> Option<ItemId> {
        let item = self.marks.goto(c, &self.tree)?;
        self.activate(item).ok()?;
        Some(item)
    }

    /// Ask the host to scroll the focused item into view
    pub fn request_scroll(&mut self, align: ScrollAlign) -> bool {
        self.scroll_request = self
            .focus_item()
            .map(|item| ScrollRequest { item, align });
        self.scroll_request.is_some()
    }

    /// Reconcile selection and highlight with the tree at the start of a turn
    pub(crate) fn sync(&mut self) {
        self.selection.prune(&self.tree);
        if self.mode.is_active() {
            self.selection.clamp(self.tree.visible_len());
        }
    }

    /// Drop everything that only lives for one navigation session
    pub(crate) fn reset_session(&mut self) {
        self.selection.clear_transient();
        self.selection.clear_highlight();
        self.origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::GroupId;

    fn engine(titles: &[&str]) -> Engine {
        let mut tree = TabTree::new();
        for title in titles {
            tree.add_leaf(None, *title, GroupId(0), false).unwrap();
        }
        let first = tree.visible_at(0).unwrap();
        tree.set_current(first).unwrap();
        Engine::new(tree, EngineConfig::default())
    }

    fn id(engine: &Engine, title: &str) -> ItemId {
        engine.tree().find_by_title(title).unwrap()
    }

    #[test]
    fn test_activate_records_previous() {
        let mut e = engine(&["a", "b", "c"]);
        let b = id(&e, "b");
        assert!(e.activate(b).unwrap());
        assert!(!e.activate(b).unwrap());
        assert_eq!(e.jumps().entries(), &[id(&e, "a")]);
    }

    #[test]
    fn test_activate_missing_item_fails() {
        let mut e = engine(&["a"]);
        assert!(e.activate(ItemId(999)).is_err());
    }

    #[test]
    fn test_move_to_index_clamps() {
        let mut e = engine(&["a", "b", "c"]);
        assert_eq!(e.move_to_index(50), Some(id(&e, "c")));
        assert_eq!(e.tree().current(), Some(id(&e, "c")));
    }

    #[test]
    fn test_jump_back_and_forward_do_not_record() {
        let mut e = engine(&["a", "b", "c"]);
        let (a, b, c) = (id(&e, "a"), id(&e, "b"), id(&e, "c"));
        e.activate(b).unwrap();
        e.activate(c).unwrap();
        assert_eq!(e.jumps().entries(), &[a, b]);

        assert_eq!(e.jump_back(), Some(b));
        assert_eq!(e.jumps().entries(), &[a, b, c]);
        assert_eq!(e.jump_back(), Some(a));
        assert_eq!(e.jump_back(), None);
        assert_eq!(e.jump_forward(), Some(b));
        assert_eq!(e.tree().current(), Some(b));
        assert_eq!(e.jumps().entries(), &[a, b, c]);
    }

    #[test]
    fn test_first_index_skips_pinned_when_configured() {
        let mut tree = TabTree::new();
        tree.add_leaf(None, "pin", GroupId(0), true).unwrap();
        tree.add_leaf(None, "free", GroupId(0), false).unwrap();
        let config = EngineConfig {
            first_skips_pinned: true,
            ..EngineConfig::default()
        };
        let e = Engine::new(tree, config);
        assert_eq!(e.first_index(), 1);

        let e = Engine::new(TabTree::new(), EngineConfig::default());
        assert_eq!(e.first_index(), 0);
    }

    #[test]
    fn test_set_mark_needs_focus() {
        let mut e = Engine::new(TabTree::new(), EngineConfig::default());
        assert_eq!(e.set_mark('a'), None);
    }

    #[test]
    fn test_request_scroll_targets_focus() {
        let mut e = engine(&["a", "b"]);
        assert!(e.request_scroll(ScrollAlign::Top));
        assert_eq!(
            e.take_scroll_request(),
            Some(ScrollRequest {
                item: id(&e, "a"),
                align: ScrollAlign::Top
            })
        );
        assert_eq!(e.take_scroll_request(), None);
    }

    #[test]
    fn test_status_reflects_state() {
        let mut e = engine(&["a", "b"]);
        e.set_message("hello");
        let status = e.status();
        assert_eq!(status.mode, "");
        assert_eq!(status.selected, 0);
        assert_eq!(status.message.as_deref(), Some("hello"));
        e.clear_message();
        assert_eq!(e.message(), None);
    }
}
