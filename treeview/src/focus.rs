use crate::element::{NodeId, VisualTree};
use crate::visibility::visible_items;

/// Tracks which item is currently focused.
///
/// There is no way to clear focus once set; it only moves to another item.
/// A focused item that has since been removed reads as no focus.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused item, if it still exists.
    pub fn current<T>(&self, tree: &VisualTree<T>) -> Option<NodeId> {
        self.focused.filter(|id| tree.contains(*id))
    }

    /// Focus `id` and mark it and its enclosing containers.
    ///
    /// Clears the marker from every node in the tree first, not only the
    /// previous focus. `None` and stale ids are ignored.
    /// Returns true if focus was applied.
    pub fn set_focus<T>(&mut self, tree: &mut VisualTree<T>, id: Option<NodeId>) -> bool {
        let Some(id) = id else {
            return false;
        };
        if !tree.contains(id) {
            log::debug!("[focus] ignoring stale focus target {}", id);
            return false;
        }

        if self.focused != Some(id) {
            log::debug!("[focus] Changing focus from {:?} to {}", self.focused.map(|f| f.to_string()), id);
        }
        self.focused = Some(id);

        for marked in tree.marked_focused() {
            tree.set_focused(marked, false);
        }
        tree.set_focused(id, true);
        for ancestor in tree.ancestors(id) {
            tree.set_focused(ancestor, true);
        }
        true
    }

    /// Focus the next visible item, wrapping to the first.
    /// Returns the newly focused item if there was anywhere to go.
    pub fn focus_next<T>(&mut self, tree: &mut VisualTree<T>) -> Option<NodeId> {
        let next = find_next_item(tree, self.current(tree), true)?;
        self.set_focus(tree, Some(next));
        Some(next)
    }

    /// Focus the previous visible item, wrapping to the last.
    pub fn focus_prev<T>(&mut self, tree: &mut VisualTree<T>) -> Option<NodeId> {
        let prev = find_previous_item(tree, self.current(tree), true)?;
        self.set_focus(tree, Some(prev));
        Some(prev)
    }
}

/// The visible item after `from`.
///
/// With no `from`, or a `from` that is not visible, the search starts before
/// the first item. Past the end, wraps to the first item if `wrap` is set.
pub fn find_next_item<T>(tree: &VisualTree<T>, from: Option<NodeId>, wrap: bool) -> Option<NodeId> {
    let visible = visible_items(tree);
    if visible.is_empty() {
        return None;
    }

    let next = match from.and_then(|id| visible.iter().position(|v| *v == id)) {
        Some(i) => visible.get(i + 1).copied(),
        None => visible.first().copied(),
    };

    match next {
        Some(id) => Some(id),
        None if wrap => visible.first().copied(),
        None => None,
    }
}

/// The visible item before `from`. Mirror of [`find_next_item`].
pub fn find_previous_item<T>(tree: &VisualTree<T>, from: Option<NodeId>, wrap: bool) -> Option<NodeId> {
    let visible = visible_items(tree);
    if visible.is_empty() {
        return None;
    }

    let prev = match from.and_then(|id| visible.iter().position(|v| *v == id)) {
        Some(0) => None,
        Some(i) => visible.get(i - 1).copied(),
        None => visible.last().copied(),
    };

    match prev {
        Some(id) => Some(id),
        None if wrap => visible.last().copied(),
        None => None,
    }
}
