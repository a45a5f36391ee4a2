use crate::dom::{Dom, NodeId};

/// Find the root child under the given viewport row.
/// Rows below the content or inside zero-height children resolve to nothing.
pub fn hit_test(dom: &Dom, row: u16) -> Option<NodeId> {
    let target = dom.scroll_top().saturating_add(u32::from(row));
    let mut top = 0u32;
    for &child in dom.children(dom.root()) {
        let bottom = top.saturating_add(dom.preferred_height(child));
        if target >= top && target < bottom {
            return Some(hit_test_descendant(dom, child, target - top));
        }
        top = bottom;
    }
    None
}

/// Descend into stacked children to find the deepest node at `row`
/// (relative to `node`'s top edge).
fn hit_test_descendant(dom: &Dom, node: NodeId, row: u32) -> NodeId {
    let Some(element) = dom.get(node) else {
        return node;
    };
    let mut top = element.text_rows();
    for &child in element.children() {
        let bottom = top.saturating_add(dom.preferred_height(child));
        if row >= top && row < bottom {
            return hit_test_descendant(dom, child, row - top);
        }
        top = bottom;
    }
    node
}

/// Walk up from `node` to the ancestor that is a direct child of the root.
/// Returns `None` for the root itself and for nodes not attached under it.
pub fn top_level_child(dom: &Dom, node: NodeId) -> Option<NodeId> {
    let root = dom.root();
    let mut current = node;
    loop {
        let parent = dom.parent(current)?;
        if parent == root {
            return Some(current);
        }
        current = parent;
    }
}
