use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a materialized visual node.
///
/// Ids come from a process-wide counter and are never reused, so an id that
/// outlives its node stays recognizably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn generate() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// Leaf or container, decided when the node is materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    /// An item that owns a nested, non-empty list of child items.
    Container { children: Vec<NodeId>, expanded: bool },
}

/// The rendered counterpart of one data node.
#[derive(Debug, Clone)]
pub struct VisualNode<T> {
    pub id: NodeId,
    /// Enclosing container, `None` for top-level items.
    pub parent: Option<NodeId>,
    /// The data node this visual represents.
    pub item: T,
    pub kind: NodeKind,
    /// Focus marker. Set on the focused item and on each of its ancestors.
    pub focused: bool,
    /// Nesting level, 0 for top-level items.
    pub depth: u16,
}

impl<T> VisualNode<T> {
    pub fn is_expandable(&self) -> bool {
        matches!(self.kind, NodeKind::Container { .. })
    }

    /// Leaves are never expanded.
    pub fn is_expanded(&self) -> bool {
        matches!(self.kind, NodeKind::Container { expanded: true, .. })
    }

    /// Child item ids, empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Container { children, .. } => children,
            NodeKind::Leaf => &[],
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}
