use std::collections::HashMap;

use crate::element::{NodeId, VisualTree};
use crate::visibility::visible_items;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Row rectangle of every laid-out item.
pub type LayoutResult = HashMap<NodeId, Rect>;

/// Stack visible items one per row inside `area`, top to bottom, skipping
/// the first `scroll` of them. Items past the bottom edge get no row.
pub fn layout<T>(tree: &VisualTree<T>, area: Rect, scroll: usize) -> LayoutResult {
    let mut result = LayoutResult::new();
    if area.is_empty() {
        return result;
    }

    for (row, id) in visible_items(tree).into_iter().skip(scroll).enumerate() {
        if row >= area.height as usize {
            break;
        }
        let Some(y) = area.y.checked_add(row as u16) else {
            break;
        };
        result.insert(id, Rect::new(area.x, y, area.width, 1));
    }
    result
}

/// Adjust a vertical scroll offset so row `target` of `total` rows lands
/// inside a viewport `height` rows tall. The offset never scrolls past the
/// last row.
pub fn scroll_into_view(offset: usize, target: Option<usize>, total: usize, height: usize) -> usize {
    let max_offset = total.saturating_sub(height);
    let mut offset = offset.min(max_offset);

    if let Some(row) = target {
        if row < offset {
            offset = row;
        } else if height > 0 && row >= offset + height {
            offset = row + 1 - height;
        }
    }
    offset
}
