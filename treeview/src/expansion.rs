//! Expand/collapse with a single open path.
//!
//! At most one chain of nested containers is expanded at any time. Opening
//! an item collapses every expanded container that is not on the path from
//! the top level down to that item.

use crate::element::{NodeId, VisualTree};

/// Enclosing containers of `id`, nearest first. Empty for absent or stale
/// ids.
pub fn ancestor_containers<T>(tree: &VisualTree<T>, id: Option<NodeId>) -> Vec<NodeId> {
    id.map(|id| tree.ancestors(id)).unwrap_or_default()
}

/// Every expanded container, in document order.
pub fn expanded_containers<T>(tree: &VisualTree<T>) -> Vec<NodeId> {
    tree.document_order()
        .into_iter()
        .filter(|id| tree.get(*id).is_some_and(|node| node.is_expanded()))
        .collect()
}

/// Collapse every expanded container not listed in `except`.
///
/// Scans the whole tree. Returns true if anything was collapsed.
pub fn close_all<T>(tree: &mut VisualTree<T>, except: &[NodeId]) -> bool {
    let mut any_closed = false;
    for id in expanded_containers(tree) {
        if except.contains(&id) {
            continue;
        }
        any_closed |= tree.set_expanded(id, false);
    }
    if any_closed {
        log::trace!("[expand] close_all collapsed containers (kept {})", except.len());
    }
    any_closed
}

/// Open (or close) the path down to `target`.
///
/// `force` of `None` toggles based on the target's current state, `Some`
/// sets it outright. Returns whether the path ended up open.
///
/// An absent target collapses everything and returns false. A leaf target
/// has no expanded state of its own and counts as collapsed, so toggling it
/// reveals the path to it.
pub fn open_to_item<T>(tree: &mut VisualTree<T>, target: Option<NodeId>, force: Option<bool>) -> bool {
    let target = target.filter(|id| tree.contains(*id));
    let ancestors = ancestor_containers(tree, target);

    let mut keep = ancestors.clone();
    keep.extend(target);
    close_all(tree, &keep);

    let opening = match (force, target) {
        (Some(value), _) => value,
        (None, None) => false,
        (None, Some(id)) => !tree.get(id).is_some_and(|node| node.is_expanded()),
    };

    // Outermost first, so the path opens top down.
    for &id in ancestors.iter().rev() {
        tree.set_expanded(id, opening);
    }
    if let Some(id) = target {
        tree.set_expanded(id, opening);
    }

    log::debug!(
        "[expand] open_to_item target={:?} force={:?} -> {}",
        target.map(|id| id.to_string()),
        force,
        opening
    );
    opening
}
