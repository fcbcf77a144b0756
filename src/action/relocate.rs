//! Relocation - placing yanked items next to an anchor
//!
//! Leaves are placed first, then containers. Within each kind the buffer
//! order is kept by chaining every item after the previously placed one.
//! A failed step is logged and skipped; the remaining items still move.

use tracing::{debug, warn};

use crate::error::{NavError, Result};
use crate::tree::{GroupId, Item, ItemId, Side, TabTree};

/// What a paste managed to do
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PasteReport {
    /// Items that reached their new position, in placement order
    pub placed: Vec<ItemId>,
    /// Items whose relocation failed
    pub failed: Vec<ItemId>,
}

/// Snapshot of the anchor taken before anything moves
#[derive(Debug, Clone, Copy)]
struct Anchor {
    id: ItemId,
    group: GroupId,
    parent: Option<ItemId>,
    is_container: bool,
    pinned: bool,
}

impl Anchor {
    fn of(item: &Item) -> Self {
        Self {
            id: item.id,
            group: item.group,
            parent: item.parent(),
            is_container: item.is_container(),
            pinned: item.is_pinned(),
        }
    }
}

/// Move `items` before or after `anchor`
pub fn paste(tree: &mut TabTree, items: Vec<ItemId>, anchor: ItemId, side: Side) -> PasteReport {
    let mut report = PasteReport::default();
    let anchor = match tree.item(anchor) {
        Ok(item) => Anchor::of(item),
        Err(e) => {
            warn!(anchor = %anchor, error = %e, "paste anchor is gone");
            report.failed = items;
            return report;
        }
    };

    let (containers, leaves): (Vec<ItemId>, Vec<ItemId>) = items
        .into_iter()
        .partition(|id| tree.get(*id).is_some_and(Item::is_container));

    let mut prev = None;
    for leaf in leaves {
        match place_leaf(tree, leaf, &anchor, side, prev) {
            Ok(()) => {
                prev = Some(leaf);
                report.placed.push(leaf);
            }
            Err(e) => {
                warn!(item = %leaf, error = %e, "failed to relocate leaf");
                report.failed.push(leaf);
            }
        }
    }

    let mut prev = None;
    for container in containers {
        match place_container(tree, container, &anchor, side, prev) {
            Ok(()) => {
                prev = Some(container);
                report.placed.push(container);
            }
            Err(e) => {
                warn!(item = %container, error = %e, "failed to relocate container");
                report.failed.push(container);
            }
        }
    }

    debug!(
        placed = report.placed.len(),
        failed = report.failed.len(),
        "paste finished"
    );
    report
}

fn place_leaf(
    tree: &mut TabTree,
    id: ItemId,
    anchor: &Anchor,
    side: Side,
    prev: Option<ItemId>,
) -> Result<()> {
    let item = tree.item(id)?;
    let (group, parent, pinned) = (item.group, item.parent(), item.is_pinned());

    if group != anchor.group {
        tree.set_group(id, anchor.group)?;
    }
    if parent.is_some() && parent != anchor.parent {
        tree.detach_from_container(id)?;
    }
    if !anchor.is_container {
        if anchor.pinned && !pinned {
            tree.set_pinned(id, true)?;
        } else if !anchor.pinned && anchor.parent.is_none() && pinned {
            tree.set_pinned(id, false)?;
        }
    }

    match prev {
        Some(prev) => tree.move_relative(id, prev, Side::After)?,
        None => tree.move_relative(id, anchor.id, side)?,
    }

    // Container members must be pinned
    if tree.parent_of(id).is_some() {
        tree.set_pinned(id, true)?;
    } else if ahead_of_pinned_area(tree, id) {
        debug!(item = %id, "unpinned leaf moved out of the pinned area");
        tree.move_to_pinned_boundary(id, anchor.group)?;
    }
    Ok(())
}

/// A top-level unpinned leaf with pinned leaves or containers after it
fn ahead_of_pinned_area(tree: &TabTree, id: ItemId) -> bool {
    let Some(item) = tree.get(id) else {
        return false;
    };
    if item.in_pinned_area() {
        return false;
    }
    let roots = tree.roots();
    let Some(at) = roots.iter().position(|r| *r == id) else {
        return false;
    };
    roots[at + 1..]
        .iter()
        .filter_map(|r| tree.get(*r))
        .any(|other| other.group == item.group && other.in_pinned_area())
}

fn place_container(
    tree: &mut TabTree,
    id: ItemId,
    anchor: &Anchor,
    side: Side,
    prev: Option<ItemId>,
) -> Result<()> {
    if tree.item(id)?.group != anchor.group {
        tree.set_group(id, anchor.group)?;
    }

    if let Some(prev) = prev {
        return tree.move_relative(id, prev, Side::After);
    }

    match (anchor.is_container, anchor.parent) {
        (true, _) => tree.move_relative(id, anchor.id, side),
        (false, Some(outer)) => match tree.move_relative(id, anchor.id, side) {
            Err(e @ (NavError::CircularNesting { .. } | NavError::NestingTooDeep { .. })) => {
                debug!(item = %id, reason = %e, "nesting refused, placing beside container");
                tree.move_relative(id, outer, side)
            }
            other => other,
        },
        (false, None) if anchor.pinned => tree.move_relative(id, anchor.id, side),
        (false, None) => tree.move_to_pinned_boundary(id, anchor.group),
    }
}
