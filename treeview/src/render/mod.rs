//! Paints visible items into a [`Buffer`].

mod template;

pub use template::{DefaultTemplate, ItemState, ItemTemplate, Span};

use crate::buffer::{Buffer, Cell};
use crate::element::{NodeId, VisualTree};
use crate::layout::LayoutResult;
use crate::text::truncate_to_width;
use crate::types::{Color, Rgb, Style, TreeTheme};

/// Everything needed to paint one frame of a tree.
pub struct RenderContext<'a, T> {
    pub tree: &'a VisualTree<T>,
    pub layout: &'a LayoutResult,
    pub focus: Option<NodeId>,
    pub template: &'a dyn ItemTemplate<T>,
    pub theme: &'a TreeTheme,
    /// Columns of indentation per nesting level.
    pub indent: u16,
}

/// State of one item as the template sees it.
pub fn item_state<T>(tree: &VisualTree<T>, id: NodeId, focus: Option<NodeId>) -> Option<ItemState> {
    let node = tree.get(id)?;
    Some(ItemState {
        depth: node.depth,
        expandable: node.is_expandable(),
        expanded: node.is_expanded(),
        has_focus: node.focused,
        is_focus: focus == Some(id),
    })
}

pub fn render_to_buffer<T>(cx: &RenderContext<'_, T>, buf: &mut Buffer) {
    for (&id, rect) in cx.layout {
        let Some(node) = cx.tree.get(id) else {
            continue;
        };
        let Some(state) = item_state(cx.tree, id, cx.focus) else {
            continue;
        };

        let mut row_style = Style::new()
            .background(cx.theme.background)
            .foreground(cx.theme.foreground);
        if state.is_focus {
            row_style = row_style.patch(cx.theme.focused);
        } else if state.has_focus {
            row_style = row_style.patch(cx.theme.focus_path);
        }

        let bg = resolve(row_style.background, cx.theme.background);
        buf.fill_bg(rect.x, rect.y, rect.right(), bg);

        let mut x = rect.x.saturating_add(state.depth.saturating_mul(cx.indent));
        let spans = cx.template.render(&node.item, &state);
        for (i, span) in spans.iter().enumerate() {
            let mut style = row_style.patch(span.style);
            if i == 0 && state.expandable {
                style = style.patch(cx.theme.expandable);
            }
            let pen = Cell {
                fg: resolve(style.foreground, cx.theme.foreground),
                bg: resolve(style.background, cx.theme.background),
                style: style.text_style,
                ..Cell::default()
            };
            let room = rect.right().saturating_sub(x) as usize;
            if room == 0 {
                break;
            }
            let text = truncate_to_width(&span.text, room);
            x = buf.put_str(x, rect.y, &text, rect.right(), pen);
        }
    }
}

fn resolve(color: Option<Color>, fallback: Color) -> Rgb {
    color.unwrap_or(fallback).to_rgb()
}
