mod node;

use std::collections::HashMap;

pub use node::{NodeId, NodeKind, VisualNode};

use crate::model::TreeItem;

/// Arena of visual nodes materialized from tree data.
///
/// This is the renderer side of the widget: it is the only place that
/// creates or destroys [`VisualNode`]s. The engines in [`crate::expansion`]
/// and [`crate::focus`] only flip flags on nodes that already exist.
#[derive(Debug, Clone)]
pub struct VisualTree<T> {
    nodes: HashMap<NodeId, VisualNode<T>>,
    roots: Vec<NodeId>,
    dirty: bool,
}

impl<T> Default for VisualTree<T> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            dirty: false,
        }
    }
}

impl<T: TreeItem> VisualTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a whole top-level list.
    pub fn from_items(items: &[T]) -> Self {
        let mut tree = Self::new();
        tree.materialize(None, items, &mut |_, _| {});
        tree
    }

    /// Create one visual node per item, nesting a child list under every
    /// item that has children.
    ///
    /// With `parent == None` the items are appended to the top-level list,
    /// otherwise to the child list of `parent` (a leaf parent becomes a
    /// container). `on_rendered` fires once per created node. Returns the
    /// ids created for `items` themselves, in order.
    pub fn materialize<F>(&mut self, parent: Option<NodeId>, items: &[T], on_rendered: &mut F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &T),
    {
        let depth = match parent {
            None => 0,
            Some(parent_id) => match self.nodes.get(&parent_id) {
                Some(node) => node.depth + 1,
                None => {
                    log::debug!("[treeview] materialize under stale parent {}", parent_id);
                    return Vec::new();
                }
            },
        };

        let ids: Vec<NodeId> = items
            .iter()
            .map(|item| self.materialize_node(parent, item, depth, on_rendered))
            .collect();

        if ids.is_empty() {
            return ids;
        }

        match parent {
            None => self.roots.extend(ids.iter().copied()),
            Some(parent_id) => {
                if let Some(node) = self.nodes.get_mut(&parent_id) {
                    if let NodeKind::Container { children, .. } = &mut node.kind {
                        children.extend(ids.iter().copied());
                    } else {
                        node.kind = NodeKind::Container {
                            children: ids.clone(),
                            expanded: false,
                        };
                    }
                }
            }
        }

        self.dirty = true;
        ids
    }

    fn materialize_node<F>(&mut self, parent: Option<NodeId>, item: &T, depth: u16, on_rendered: &mut F) -> NodeId
    where
        F: FnMut(NodeId, &T),
    {
        let id = NodeId::generate();
        self.nodes.insert(
            id,
            VisualNode {
                id,
                parent,
                item: item.clone(),
                kind: NodeKind::Leaf,
                focused: false,
                depth,
            },
        );
        on_rendered(id, item);

        let children: Vec<NodeId> = item
            .children()
            .iter()
            .map(|child| self.materialize_node(Some(id), child, depth + 1, on_rendered))
            .collect();

        if !children.is_empty() {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.kind = NodeKind::Container {
                    children,
                    expanded: false,
                };
            }
        }

        id
    }

    /// Replace the child list of `id` with freshly materialized items.
    /// Old child ids become stale. Returns the new ids.
    pub fn replace_children<F>(&mut self, id: NodeId, items: &[T], on_rendered: &mut F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &T),
    {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let old: Vec<NodeId> = node.children().to_vec();
        for child in old {
            self.remove(child);
        }
        self.materialize(Some(id), items, on_rendered)
    }

    /// Drop every node. All previously issued ids become stale.
    pub fn clear(&mut self) {
        if !self.nodes.is_empty() {
            self.dirty = true;
        }
        self.nodes.clear();
        self.roots.clear();
    }
}

impl<T> VisualTree<T> {
    pub fn get(&self, id: NodeId) -> Option<&VisualNode<T>> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// The data node a visual node was materialized from.
    pub fn item(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(&id).map(|node| &node.item)
    }

    /// Top-level item ids in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Enclosing containers of `id`, nearest first.
    ///
    /// Stops at the top level, or at the first link that points to a node
    /// no longer in the arena. Stale ids have no ancestors.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            let Some(parent) = self.nodes.get(&parent_id) else {
                break;
            };
            result.push(parent_id);
            current = parent.parent;
        }
        result
    }

    /// All item ids in document order (parents before children, siblings in
    /// list order).
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut result = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.collect_preorder(root, &mut result);
        }
        result
    }

    fn collect_preorder(&self, id: NodeId, result: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        result.push(id);
        for &child in node.children() {
            self.collect_preorder(child, result);
        }
    }

    /// Set the expanded flag of a container. Leaves and stale ids are
    /// ignored. Returns true if the flag changed.
    pub fn set_expanded(&mut self, id: NodeId, value: bool) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        let NodeKind::Container { expanded, .. } = &mut node.kind else {
            return false;
        };
        if *expanded == value {
            return false;
        }
        *expanded = value;
        self.dirty = true;
        true
    }

    /// Set the focus marker. Returns true if it changed.
    pub fn set_focused(&mut self, id: NodeId, value: bool) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.focused == value {
            return false;
        }
        node.focused = value;
        self.dirty = true;
        true
    }

    /// Ids of every node currently carrying the focus marker, in no
    /// particular order.
    pub fn marked_focused(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.focused)
            .map(|node| node.id)
            .collect()
    }

    /// Remove a node and its whole subtree. A container left without
    /// children turns into a leaf. Returns false if `id` was already gone.
    ///
    /// If the subtree held the focused item, the focus marker is cleared
    /// from the containers above it as well.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.remove(&id) else {
            return false;
        };

        if node.focused {
            let mut cursor = node.parent;
            while let Some(ancestor) = cursor.and_then(|parent| self.nodes.get_mut(&parent)) {
                ancestor.focused = false;
                cursor = ancestor.parent;
            }
        }

        let mut pending: Vec<NodeId> = node.children().to_vec();
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&child) {
                pending.extend_from_slice(removed.children());
            }
        }

        match node.parent {
            None => self.roots.retain(|&root| root != id),
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    if let NodeKind::Container { children, .. } = &mut parent.kind {
                        children.retain(|&child| child != id);
                        if children.is_empty() {
                            parent.kind = NodeKind::Leaf;
                        }
                    }
                }
            }
        }

        self.dirty = true;
        true
    }

    /// Whether any flag or structure changed since the last call, resetting
    /// the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl<T: TreeItem> VisualTree<T> {
    /// First node, in document order, whose data id equals `item_id`.
    pub fn find_by_item_id(&self, item_id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|id| self.item(*id).is_some_and(|item| item.id() == item_id))
    }
}
