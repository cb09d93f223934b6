use crate::model::TreeItem;
use crate::types::Style;

/// Per-item state handed to an [`ItemTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemState {
    pub depth: u16,
    pub expandable: bool,
    pub expanded: bool,
    /// Carries the focus marker (focused item or one of its containers).
    pub has_focus: bool,
    /// Is the focused item itself.
    pub is_focus: bool,
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Turns one data node into the spans of its row.
///
/// Indentation is applied by the renderer, templates only produce the
/// content after it.
pub trait ItemTemplate<T> {
    fn render(&self, item: &T, state: &ItemState) -> Vec<Span>;
}

impl<T, F> ItemTemplate<T> for F
where
    F: Fn(&T, &ItemState) -> Vec<Span>,
{
    fn render(&self, item: &T, state: &ItemState) -> Vec<Span> {
        self(item, state)
    }
}

/// Disclosure triangle followed by the item label.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTemplate;

impl DefaultTemplate {
    pub const COLLAPSED: &'static str = "▸ ";
    pub const EXPANDED: &'static str = "▾ ";
    pub const LEAF: &'static str = "  ";
}

impl<T: TreeItem> ItemTemplate<T> for DefaultTemplate {
    fn render(&self, item: &T, state: &ItemState) -> Vec<Span> {
        let glyph = match (state.expandable, state.expanded) {
            (false, _) => Self::LEAF,
            (true, false) => Self::COLLAPSED,
            (true, true) => Self::EXPANDED,
        };
        let label_style = if state.expandable {
            Style::new().bold()
        } else {
            Style::new()
        };
        vec![Span::raw(glyph), Span::styled(item.label(), label_style)]
    }
}
