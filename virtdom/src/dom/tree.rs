use super::{Node, NodeId};

/// An arena-backed node tree whose root is a vertically scrolling container.
///
/// The root behaves like a block-level scroll box: its children are stacked
/// top to bottom, `scroll_top` is clamped to the scrollable range and the
/// viewport height is whatever the host last reported.
#[derive(Debug)]
pub struct Dom {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
    scroll_top: u32,
    viewport_height: u32,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Node::box_())],
            free: Vec::new(),
            root: NodeId(0),
            scroll_top: 0,
            viewport_height: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Store a detached node and return its handle.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(node);
            NodeId(slot)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Detach `id` and free it together with its descendants.
    /// The root cannot be destroyed.
    pub fn destroy(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }
        self.remove(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.slots.get_mut(next.0).and_then(Option::take) {
                pending.extend(node.children);
                self.free.push(next.0);
            }
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` into `parent` before `reference`, or at the end when
    /// `reference` is `None` or not a child of `parent`. An attached child is
    /// moved.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if child == parent || child == self.root || !self.contains(parent) || !self.contains(child) {
            log::warn!("insert_before: rejected {child} into {parent}");
            return;
        }
        self.remove(child);
        let Some(parent_node) = self.get_mut(parent) else {
            return;
        };
        let position = reference
            .and_then(|r| parent_node.children.iter().position(|&c| c == r))
            .unwrap_or(parent_node.children.len());
        parent_node.children.insert(position, child);
        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = Some(parent);
        }
    }

    /// Detach `id` from its parent. The node stays alive and can be reinserted.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    pub fn clear_children(&mut self, parent: NodeId) {
        let Some(parent_node) = self.get_mut(parent) else {
            return;
        };
        let children = std::mem::take(&mut parent_node.children);
        for child in children {
            if let Some(node) = self.get_mut(child) {
                node.parent = None;
            }
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn set_height(&mut self, id: NodeId, height: u32) {
        if let Some(node) = self.get_mut(id) {
            node.height = Some(height);
        }
    }

    /// Height the node would occupy if laid out: the explicit height if any,
    /// otherwise its text rows plus the stacked heights of its children.
    pub fn preferred_height(&self, id: NodeId) -> u32 {
        let Some(node) = self.get(id) else {
            return 0;
        };
        if let Some(height) = node.height {
            return height;
        }
        node.children
            .iter()
            .fold(node.text_rows(), |acc, &child| acc.saturating_add(self.preferred_height(child)))
    }

    /// Total height of the root's stacked children.
    pub fn content_height(&self) -> u32 {
        self.children(self.root)
            .iter()
            .fold(0u32, |acc, &child| acc.saturating_add(self.preferred_height(child)))
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    pub fn max_scroll_top(&self) -> u32 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// Set the scroll position, clamped to the scrollable range.
    pub fn set_scroll_top(&mut self, scroll_top: u32) {
        self.scroll_top = scroll_top.min(self.max_scroll_top());
    }

    /// Scroll by a delta. Returns true if the position changed.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let current = self.scroll_top;
        let target = (i64::from(current) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32;
        self.set_scroll_top(target);
        self.scroll_top != current
    }

    /// Top edge of a root child within the scroll content.
    pub fn offset_top(&self, id: NodeId) -> Option<u32> {
        if self.parent(id) != Some(self.root) {
            return None;
        }
        let mut offset = 0u32;
        for &child in self.children(self.root) {
            if child == id {
                return Some(offset);
            }
            offset = offset.saturating_add(self.preferred_height(child));
        }
        None
    }

    /// Scroll the minimal amount needed to bring a root child fully into view.
    pub fn scroll_into_view_if_needed(&mut self, id: NodeId) {
        let Some(top) = self.offset_top(id) else {
            return;
        };
        let bottom = top.saturating_add(self.preferred_height(id));
        if top < self.scroll_top {
            self.set_scroll_top(top);
        } else if bottom > self.scroll_top.saturating_add(self.viewport_height) {
            self.set_scroll_top(bottom.saturating_sub(self.viewport_height));
        }
    }
}
