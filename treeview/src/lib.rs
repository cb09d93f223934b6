//! Interactive tree view for terminal interfaces.
//!
//! A [`TreeView`] shows hierarchical data as nested, collapsible items.
//! At most one item has focus and at most one path from a top-level item
//! down is expanded at any time. Activating a leaf fires a
//! [`Selected`] notification.

pub mod buffer;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod expansion;
pub mod focus;
pub mod hit;
pub mod input;
pub mod layout;
pub mod model;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;
pub mod view;
pub mod visibility;

pub use buffer::{Buffer, Cell};
pub use config::{DataSource, TreeViewConfig};
pub use element::{NodeId, NodeKind, VisualNode, VisualTree};
pub use error::{Error, Result};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use expansion::{ancestor_containers, close_all, expanded_containers, open_to_item};
pub use focus::{find_next_item, find_previous_item, FocusState};
pub use hit::hit_test;
pub use input::{Document, InputHost, ListenerId, ListenerKind, Phase};
pub use layout::{LayoutResult, Rect};
pub use model::{DataNode, TreeItem};
pub use render::{DefaultTemplate, ItemState, ItemTemplate, Span};
pub use terminal::Terminal;
pub use types::*;
pub use view::{EventResult, Selected, TreeView, WidgetState};
pub use visibility::{is_visible, visible_items};
