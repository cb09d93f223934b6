//! Widget configuration and data sources.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::DataNode;
use crate::types::TreeTheme;

/// Per-widget configuration.
#[derive(Debug, Clone)]
pub struct TreeViewConfig {
    /// Widget id, used to register with the input host.
    pub id: String,

    /// Keyboard tab index. When unset, mounting assigns one past the largest
    /// index the host knows about.
    pub tab_index: Option<i32>,

    /// Columns of indentation per nesting level.
    pub indent: u16,

    pub theme: TreeTheme,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            id: "tree-view".to_string(),
            tab_index: None,
            indent: 2,
            theme: TreeTheme::default(),
        }
    }
}

impl TreeViewConfig {
    /// Create a new config with the given widget id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set an explicit tab index.
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    /// Set the indentation width.
    pub fn indent(mut self, columns: u16) -> Self {
        self.indent = columns;
        self
    }

    pub fn theme(mut self, theme: TreeTheme) -> Self {
        self.theme = theme;
        self
    }
}

/// Loads the top-level node list from JSON.
///
/// Accepts either an array of nodes or a single root object whose children
/// become the top-level list.
pub struct DataSource;

impl DataSource {
    pub fn from_json_str(json: &str) -> Result<Vec<DataNode>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            return Ok(serde_json::from_value(value)?);
        }
        let root: DataNode = serde_json::from_value(value)?;
        Ok(root.children.unwrap_or_default())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<DataNode>> {
        let path = path.as_ref();
        log::debug!("[treeview] loading data from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
