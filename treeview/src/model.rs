//! Read-only adapter over caller-supplied hierarchical data.
//!
//! The tree view never mutates the data it displays. It only needs an
//! identity, a label and an ordered list of children for every node.

use serde::{Deserialize, Serialize};

/// A node of the data shown by a [`TreeView`](crate::TreeView).
///
/// Implementations must not be their own ancestors. Nothing in this crate
/// checks for cycles; traversal of a cyclic structure will not terminate.
pub trait TreeItem: Clone {
    /// Stable identity of this node.
    fn id(&self) -> String;

    /// Text used by the default item template.
    fn label(&self) -> String {
        self.id()
    }

    /// Ordered children. Empty for leaves.
    fn children(&self) -> &[Self];

    /// Whether this node gets a nested child list (and can be expanded).
    fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}

/// Plain data node, the shape accepted by [`DataSource`](crate::DataSource).
///
/// ```json
/// { "id": "src", "label": "src/", "children": [ { "id": "main.rs" } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DataNode>>,
}

impl DataNode {
    /// Create a leaf node.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            children: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a child node.
    pub fn child(mut self, child: DataNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Append several child nodes.
    pub fn with_children(mut self, children: impl IntoIterator<Item = DataNode>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(children);
        self
    }
}

impl TreeItem for DataNode {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.id.clone())
    }

    fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or(&[])
    }
}
