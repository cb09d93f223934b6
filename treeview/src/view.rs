//! The tree view widget: input dispatch over the focus and expansion engines.

use crate::buffer::Buffer;
use crate::config::TreeViewConfig;
use crate::element::{NodeId, VisualTree};
use crate::error::{Error, Result};
use crate::event::{Event, Key, Modifiers};
use crate::expansion;
use crate::focus::FocusState;
use crate::hit::hit_test;
use crate::input::{InputHost, ListenerId, ListenerKind, Phase};
use crate::layout::{layout, scroll_into_view, LayoutResult, Rect};
use crate::model::TreeItem;
use crate::render::{render_to_buffer, DefaultTemplate, ItemTemplate, RenderContext};
use crate::visibility;

/// Payload of the "selected" notification, fired when a leaf is activated.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected<T> {
    /// Visual node that was activated.
    pub node: NodeId,
    /// The data node it represents.
    pub item: T,
}

/// Whether the widget handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Handled; should not propagate further.
    Consumed,
    Ignored,
}

/// Coarse widget state, derived from focus and expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Nothing focused.
    Idle,
    FocusedLeaf,
    FocusedCollapsed,
    FocusedExpanded,
}

#[derive(Debug, Clone, Copy)]
struct Listeners {
    click: ListenerId,
    key_down: ListenerId,
}

type SelectedHandler<T> = Box<dyn FnMut(&Selected<T>)>;
type RenderedHandler<T> = Box<dyn FnMut(NodeId, &T)>;

/// Interactive tree of collapsible items with a single focused item and a
/// single open path.
pub struct TreeView<T: TreeItem> {
    config: TreeViewConfig,
    data: Vec<T>,
    tree: VisualTree<T>,
    focus: FocusState,
    template: Box<dyn ItemTemplate<T>>,
    listeners: Option<Listeners>,
    area: Rect,
    scroll: usize,
    layout: LayoutResult,
    on_selected: Vec<SelectedHandler<T>>,
    on_item_rendered: Vec<RenderedHandler<T>>,
}

impl<T: TreeItem> TreeView<T> {
    pub fn new(config: TreeViewConfig) -> Self {
        Self {
            config,
            data: Vec::new(),
            tree: VisualTree::new(),
            focus: FocusState::new(),
            template: Box::new(DefaultTemplate),
            listeners: None,
            area: Rect::default(),
            scroll: 0,
            layout: LayoutResult::new(),
            on_selected: Vec::new(),
            on_item_rendered: Vec::new(),
        }
    }

    /// Create a view and materialize `items` as its top-level list.
    pub fn with_data(config: TreeViewConfig, items: Vec<T>) -> Self {
        let mut view = Self::new(config);
        view.set_data(items);
        view
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &TreeViewConfig {
        &self.config
    }

    /// The materialized visual nodes.
    pub fn tree(&self) -> &VisualTree<T> {
        &self.tree
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    // -------------------------------------------------------------------------
    // Renderer boundary
    // -------------------------------------------------------------------------

    /// Rebind the data source. Every visual node is recreated, so ids handed
    /// out before are stale afterwards.
    pub fn set_data(&mut self, items: Vec<T>) {
        self.data = items;
        self.tree.clear();
        self.materialize_top_level();
        self.relayout();
    }

    fn materialize_top_level(&mut self) {
        let handlers = &mut self.on_item_rendered;
        let created = self.tree.materialize(None, &self.data, &mut |id, item: &T| {
            for handler in handlers.iter_mut() {
                handler(id, item);
            }
        });
        log::debug!("[treeview] {} materialized {} top-level items", self.config.id, created.len());
    }

    /// Replace the children shown under `id` (for example after loading them
    /// lazily). Returns the new child ids.
    pub fn set_item_children(&mut self, id: NodeId, items: &[T]) -> Vec<NodeId> {
        let handlers = &mut self.on_item_rendered;
        let created = self.tree.replace_children(id, items, &mut |child, item: &T| {
            for handler in handlers.iter_mut() {
                handler(child, item);
            }
        });
        self.relayout();
        created
    }

    /// Remove an item and its subtree from the visual tree.
    pub fn remove_item(&mut self, id: NodeId) -> bool {
        let removed = self.tree.remove(id);
        self.relayout();
        removed
    }

    /// Replace the built-in item template.
    pub fn set_item_template(&mut self, template: Box<dyn ItemTemplate<T>>) {
        self.template = template;
    }

    /// Called once per materialized visual node with the data node it
    /// represents.
    pub fn on_item_rendered(&mut self, handler: impl FnMut(NodeId, &T) + 'static) {
        self.on_item_rendered.push(Box::new(handler));
    }

    /// Called when a leaf item is activated.
    pub fn on_selected(&mut self, handler: impl FnMut(&Selected<T>) + 'static) {
        self.on_selected.push(Box::new(handler));
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Attach to `host`: register the click and key listeners, take a tab
    /// index and make sure the top-level list is materialized.
    pub fn mount<H: InputHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if self.listeners.is_some() {
            return Err(Error::AlreadyMounted(self.config.id.clone()));
        }

        let tab_index = match self.config.tab_index.or_else(|| host.tab_index(&self.config.id)) {
            Some(index) => index,
            None => host.largest_tab_index() + 1,
        };
        host.set_tab_index(&self.config.id, tab_index);
        self.config.tab_index = Some(tab_index);

        self.listeners = Some(Listeners {
            click: host.add_listener(&self.config.id, ListenerKind::Click, Phase::Bubble),
            key_down: host.add_listener(&self.config.id, ListenerKind::KeyDown, Phase::Capture),
        });

        if self.tree.is_empty() && !self.data.is_empty() {
            self.materialize_top_level();
        }

        log::debug!("[treeview] mounted {} (tab index {})", self.config.id, tab_index);
        Ok(())
    }

    /// Detach from `host`, removing exactly the listeners `mount` added.
    pub fn unmount<H: InputHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let Some(listeners) = self.listeners.take() else {
            return Err(Error::NotMounted(self.config.id.clone()));
        };
        host.remove_listener(listeners.key_down);
        host.remove_listener(listeners.click);
        log::debug!("[treeview] unmounted {}", self.config.id);
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.listeners.is_some()
    }

    // -------------------------------------------------------------------------
    // Engines
    // -------------------------------------------------------------------------

    pub fn current_focus(&self) -> Option<NodeId> {
        self.focus.current(&self.tree)
    }

    /// Move focus to `id`. `None` and stale ids leave focus untouched.
    pub fn set_focus(&mut self, id: Option<NodeId>) -> bool {
        let applied = self.focus.set_focus(&mut self.tree, id);
        self.relayout();
        applied
    }

    pub fn visible_items(&self) -> Vec<NodeId> {
        visibility::visible_items(&self.tree)
    }

    pub fn is_visible(&self, id: Option<NodeId>) -> bool {
        visibility::is_visible(&self.tree, id)
    }

    /// See [`expansion::open_to_item`].
    pub fn open_to_item(&mut self, target: Option<NodeId>, force: Option<bool>) -> bool {
        let opened = expansion::open_to_item(&mut self.tree, target, force);
        self.relayout();
        opened
    }

    /// Collapse every expanded container. Returns true if anything changed.
    pub fn close_all(&mut self) -> bool {
        let closed = expansion::close_all(&mut self.tree, &[]);
        self.relayout();
        closed
    }

    pub fn is_expandable_item(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(|node| node.is_expandable())
    }

    pub fn is_top_level_item(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(|node| node.is_top_level())
    }

    /// Focus `id`, then toggle it open if it is expandable, or announce it
    /// as selected and collapse the whole tree if it is a leaf.
    pub fn activate_item(&mut self, id: NodeId) {
        let Some(node) = self.tree.get(id) else {
            log::debug!("[treeview] ignoring activation of stale item {}", id);
            return;
        };
        let expandable = node.is_expandable();
        let item = node.item.clone();

        self.focus.set_focus(&mut self.tree, Some(id));

        if expandable {
            expansion::open_to_item(&mut self.tree, Some(id), None);
        } else {
            log::debug!("[treeview] {} selected {}", self.config.id, item.id());
            let selected = Selected { node: id, item };
            for handler in self.on_selected.iter_mut() {
                handler(&selected);
            }
            expansion::close_all(&mut self.tree, &[]);
        }
        self.relayout();
    }

    pub fn state(&self) -> WidgetState {
        let Some(node) = self.current_focus().and_then(|id| self.tree.get(id)) else {
            return WidgetState::Idle;
        };
        match (node.is_expandable(), node.is_expanded()) {
            (false, _) => WidgetState::FocusedLeaf,
            (true, false) => WidgetState::FocusedCollapsed,
            (true, true) => WidgetState::FocusedExpanded,
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Route one input event. Only acts while mounted on `host`.
    pub fn handle_event<H: InputHost + ?Sized>(&mut self, host: &mut H, event: &Event) -> EventResult {
        let Some(listeners) = self.listeners else {
            return EventResult::Ignored;
        };

        match *event {
            Event::Click { x, y, .. } if host.is_listening(listeners.click) => self.on_click(host, x, y),
            Event::Key { key, modifiers } if host.is_listening(listeners.key_down) => {
                self.on_key_down(host, key, modifiers)
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_click<H: InputHost + ?Sized>(&mut self, host: &mut H, x: u16, y: u16) -> EventResult {
        if !self.area.contains(x, y) {
            return EventResult::Ignored;
        }

        host.focus_widget(&self.config.id);

        if let Some(id) = hit_test(&self.layout, x, y) {
            self.activate_item(id);
        }
        EventResult::Consumed
    }

    fn on_key_down<H: InputHost + ?Sized>(&mut self, host: &mut H, key: Key, modifiers: Modifiers) -> EventResult {
        if !host.has_focus(&self.config.id) || modifiers.is_command() {
            return EventResult::Ignored;
        }

        match key {
            Key::Down => {
                self.focus.focus_next(&mut self.tree);
                self.relayout();
                EventResult::Consumed
            }
            Key::Up => {
                self.focus.focus_prev(&mut self.tree);
                self.relayout();
                EventResult::Consumed
            }
            Key::Enter | Key::SPACE => match self.current_focus() {
                Some(id) => {
                    self.activate_item(id);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Layout and painting
    // -------------------------------------------------------------------------

    /// Lay out visible items inside `area` and remember the result for
    /// pointer hit testing.
    pub fn layout(&mut self, area: Rect) -> &LayoutResult {
        self.area = area;
        self.relayout();
        &self.layout
    }

    /// Recompute rows, scrolling so the focused item stays inside the area.
    fn relayout(&mut self) {
        let visible = visibility::visible_items(&self.tree);
        let focus_row = self
            .current_focus()
            .and_then(|focus| visible.iter().position(|&id| id == focus));
        self.scroll = scroll_into_view(self.scroll, focus_row, visible.len(), self.area.height as usize);
        self.layout = layout(&self.tree, self.area, self.scroll);
    }

    /// Number of visible items scrolled off the top of the area.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// The item drawn at a screen position, if any.
    pub fn item_at(&self, x: u16, y: u16) -> Option<NodeId> {
        hit_test(&self.layout, x, y)
    }

    /// Lay out and paint into `buf`.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.layout(area);
        let cx = RenderContext {
            tree: &self.tree,
            layout: &self.layout,
            focus: self.current_focus(),
            template: self.template.as_ref(),
            theme: &self.config.theme,
            indent: self.config.indent,
        };
        render_to_buffer(&cx, buf);
        self.tree.take_dirty();
    }

    /// Whether anything visible changed since the last render.
    pub fn needs_redraw(&self) -> bool {
        self.tree.is_dirty()
    }
}
