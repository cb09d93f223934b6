//! Platform input abstraction.
//!
//! Widgets never reach for a global event source. They register listeners
//! with an [`InputHost`] when mounted and remove them when unmounted, and ask
//! the host about keyboard focus.

use std::collections::HashMap;

/// Kind of input a listener wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Click,
    KeyDown,
}

/// Dispatch phase. Capture listeners run before bubble listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    Capture,
    #[default]
    Bubble,
}

/// Handle returned by [`InputHost::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Host-side services a widget needs from its environment.
pub trait InputHost {
    /// Register a listener owned by widget `owner`.
    fn add_listener(&mut self, owner: &str, kind: ListenerKind, phase: Phase) -> ListenerId;

    /// Remove a listener. Returns false if it was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    fn is_listening(&self, id: ListenerId) -> bool;

    /// Give keyboard focus to a widget.
    fn focus_widget(&mut self, widget: &str);

    /// Whether `widget` currently receives key events.
    fn has_focus(&self, widget: &str) -> bool;

    fn tab_index(&self, widget: &str) -> Option<i32>;

    fn set_tab_index(&mut self, widget: &str, index: i32);

    /// Largest tab index registered so far, 0 if none.
    fn largest_tab_index(&self) -> i32;
}

#[derive(Debug, Clone)]
struct Registration {
    owner: String,
    kind: ListenerKind,
    phase: Phase,
}

/// In-process [`InputHost`]: a listener registry, the id of the widget
/// holding keyboard focus, and tab order.
#[derive(Debug, Default)]
pub struct Document {
    listeners: HashMap<ListenerId, Registration>,
    next_listener: u64,
    focused: Option<String>,
    tab_indices: HashMap<String, i32>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners `owner` has registered.
    pub fn listener_count_for(&self, owner: &str) -> usize {
        self.listeners.values().filter(|reg| reg.owner == owner).count()
    }

    /// Owners listening for `kind` in dispatch order: capture phase first,
    /// then registration order.
    pub fn listeners_for(&self, kind: ListenerKind) -> Vec<(ListenerId, String)> {
        let mut matching: Vec<_> = self
            .listeners
            .iter()
            .filter(|(_, reg)| reg.kind == kind)
            .map(|(id, reg)| (reg.phase != Phase::Capture, *id, reg.owner.clone()))
            .collect();
        matching.sort();
        matching.into_iter().map(|(_, id, owner)| (id, owner)).collect()
    }

    /// Widget holding keyboard focus.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Clear keyboard focus. Returns true if a widget was focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Move keyboard focus to the widget with the next tab index, wrapping.
    /// Returns the newly focused widget id if focus changed.
    pub fn focus_next_widget(&mut self) -> Option<String> {
        let order = self.tab_order();
        if order.is_empty() {
            return None;
        }

        let new_focus = match &self.focused {
            None => order[0].clone(),
            Some(current) => match order.iter().position(|id| id == current) {
                Some(i) => order[(i + 1) % order.len()].clone(),
                None => order[0].clone(),
            },
        };

        if self.focused.as_ref() != Some(&new_focus) {
            self.focused = Some(new_focus.clone());
            Some(new_focus)
        } else {
            None
        }
    }

    fn tab_order(&self) -> Vec<String> {
        let mut entries: Vec<(i32, &String)> = self
            .tab_indices
            .iter()
            .map(|(id, index)| (*index, id))
            .collect();
        entries.sort();
        entries.into_iter().map(|(_, id)| id.clone()).collect()
    }
}

impl InputHost for Document {
    fn add_listener(&mut self, owner: &str, kind: ListenerKind, phase: Phase) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(
            id,
            Registration {
                owner: owner.to_string(),
                kind,
                phase,
            },
        );
        log::debug!("[input] {} listening for {:?} ({:?})", owner, kind, phase);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    fn focus_widget(&mut self, widget: &str) {
        if self.focused.as_deref() != Some(widget) {
            self.focused = Some(widget.to_string());
        }
    }

    fn has_focus(&self, widget: &str) -> bool {
        self.focused.as_deref() == Some(widget)
    }

    fn tab_index(&self, widget: &str) -> Option<i32> {
        self.tab_indices.get(widget).copied()
    }

    fn set_tab_index(&mut self, widget: &str, index: i32) {
        self.tab_indices.insert(widget.to_string(), index);
    }

    fn largest_tab_index(&self) -> i32 {
        self.tab_indices.values().copied().max().unwrap_or(0)
    }
}
