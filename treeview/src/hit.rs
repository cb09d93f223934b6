use crate::element::NodeId;
use crate::layout::LayoutResult;

/// Find the item whose row contains the given coordinates.
/// Returns None if the point is not on any laid-out item.
pub fn hit_test(layout: &LayoutResult, x: u16, y: u16) -> Option<NodeId> {
    layout
        .iter()
        .find(|(_, rect)| rect.contains(x, y))
        .map(|(id, _)| *id)
}
