//! Which items are currently on screen, and in what order.

use crate::element::{NodeId, VisualTree};

/// Items whose every enclosing container is expanded, in document order.
///
/// Recomputed from the arena on each call.
pub fn visible_items<T>(tree: &VisualTree<T>) -> Vec<NodeId> {
    let mut result = Vec::new();
    for &root in tree.roots() {
        collect_visible(tree, root, &mut result);
    }
    result
}

// Descends only into expanded containers, which is the same as filtering
// the document order by `is_visible`.
fn collect_visible<T>(tree: &VisualTree<T>, id: NodeId, result: &mut Vec<NodeId>) {
    let Some(node) = tree.get(id) else {
        return;
    };
    result.push(id);
    if node.is_expanded() {
        for &child in node.children() {
            collect_visible(tree, child, result);
        }
    }
}

/// True if no collapsed container sits between `id` and the top level.
/// False for absent or stale ids.
pub fn is_visible<T>(tree: &VisualTree<T>, id: Option<NodeId>) -> bool {
    let Some(id) = id else {
        return false;
    };
    if !tree.contains(id) {
        return false;
    }

    let mut current = tree.parent(id);
    while let Some(parent_id) = current {
        let Some(parent) = tree.get(parent_id) else {
            // Detached from the arena mid-walk.
            return false;
        };
        if !parent.is_expanded() {
            return false;
        }
        current = parent.parent;
    }
    true
}
