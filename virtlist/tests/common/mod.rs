//! Shared test delegate and invariant checks.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashSet;

use virtdom::{Dom, Node, NodeId};
use virtlist::{ListControl, ListDelegate, ListMode};

/// One `selected_item_changed` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub from_element: Option<NodeId>,
    pub to_element: Option<NodeId>,
}

/// Records every callback. Items are plain numbers; the node it builds is
/// a text row tagged with `item = <n>` and an explicit height.
pub struct Recorder {
    pub height: fn(u32) -> u32,
    pub unselectable: HashSet<u32>,
    pub created: Vec<u32>,
    pub changes: Vec<Change>,
    pub height_calls: Cell<usize>,
}

/// `7 + item % 10`, so every ten items add up to 115.
pub fn variable_height(item: u32) -> u32 {
    7 + item % 10
}

impl Recorder {
    pub fn new(height: fn(u32) -> u32) -> Self {
        Self {
            height,
            unselectable: HashSet::new(),
            created: Vec::new(),
            changes: Vec::new(),
            height_calls: Cell::new(0),
        }
    }

    pub fn variable() -> Self {
        Self::new(variable_height)
    }

    pub fn unit() -> Self {
        Self::new(|_| 1)
    }

    pub fn unselectable(mut self, items: impl IntoIterator<Item = u32>) -> Self {
        self.unselectable.extend(items);
        self
    }
}

impl ListDelegate<u32> for Recorder {
    fn create_element_for_item(&mut self, dom: &mut Dom, item: &u32) -> NodeId {
        self.created.push(*item);
        dom.insert(
            Node::text(format!("item {item}"))
                .height((self.height)(*item))
                .data("item", item.to_string()),
        )
    }

    fn height_for_item(&self, item: &u32) -> u32 {
        self.height_calls.set(self.height_calls.get() + 1);
        (self.height)(*item)
    }

    fn is_item_selectable(&self, item: &u32) -> bool {
        !self.unselectable.contains(item)
    }

    fn selected_item_changed(
        &mut self,
        from: Option<&u32>,
        to: Option<&u32>,
        from_element: Option<NodeId>,
        to_element: Option<NodeId>,
    ) {
        self.changes.push(Change {
            from: from.copied(),
            to: to.copied(),
            from_element,
            to_element,
        });
    }
}

pub type List = ListControl<u32, Recorder>;

pub fn list(delegate: Recorder, mode: ListMode, viewport_height: u32) -> List {
    let mut list = ListControl::new(delegate, mode);
    list.element_mut().set_viewport_height(viewport_height);
    list
}

/// Item numbers of the attached item nodes, in container order.
pub fn attached_items(list: &List) -> Vec<u32> {
    let dom = list.element();
    dom.children(dom.root())
        .iter()
        .filter_map(|&child| dom.get(child)?.get_data("item")?.parse().ok())
        .collect()
}

/// Sum of the delegate heights of every item in the list.
pub fn expected_total(list: &List) -> u32 {
    list.items().map(|&item| (list.delegate().height)(item)).sum()
}

/// Spacers plus attached items must account for the whole content, and the
/// attached items must be exactly the render window.
pub fn assert_window_consistent(list: &mut List) {
    let total = list.total_height();
    assert_eq!(total, expected_total(list), "total height");

    let window = list.render_window();
    let expected: Vec<u32> = window
        .clone()
        .filter_map(|i| list.item_at_index(i).copied())
        .collect();
    assert_eq!(attached_items(list), expected, "attached nodes match window {window:?}");

    let (top, bottom) = list.spacer_heights();
    let dom = list.element();
    assert_eq!(dom.content_height(), top + bottom + attached_height(list), "container content");
    assert_eq!(top + attached_height(list) + bottom, total, "spacers + rendered == total");
    if total > 0 {
        assert_eq!(list.rendered_height(), total, "rendered height");
    }
}

fn attached_height(list: &List) -> u32 {
    let dom = list.element();
    dom.children(dom.root())
        .iter()
        .filter(|&&child| dom.get(child).is_some_and(|n| n.get_data("item").is_some()))
        .map(|&child| dom.preferred_height(child))
        .sum()
}
