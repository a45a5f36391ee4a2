//! The virtualized list control.

use std::collections::HashMap;
use std::ops::Range;

use log::{debug, trace, warn};
use virtdom::{Dom, Event, Key, Node, NodeId};

use crate::delegate::ListDelegate;
use crate::error::ListError;
use crate::mode::{Geometry, ListMode};

/// Identity of an item for the lifetime of its stay in the list.
///
/// Items are positional: pushing the same value twice yields two keys and two
/// rows, so the node cache is keyed by this rather than by the item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ItemKey(u64);

#[derive(Debug)]
struct Entry<T> {
    key: ItemKey,
    item: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// A list that realizes item nodes on demand inside a scroll container.
///
/// In the viewport modes only the items around the visible region are
/// attached to the container, bracketed by two spacer nodes whose heights
/// stand in for everything above and below. In [`ListMode::Grow`] every item
/// is attached.
///
/// The container is the root of the [`Dom`] returned by [`element`]. The host
/// keeps its viewport height current, forwards input through
/// [`handle_event`], and calls [`viewport_resized`] when the viewport changes
/// size.
///
/// [`element`]: Self::element
/// [`handle_event`]: Self::handle_event
/// [`viewport_resized`]: Self::viewport_resized
pub struct ListControl<T, D: ListDelegate<T>> {
    dom: Dom,
    top_element: NodeId,
    bottom_element: NodeId,
    first_index: usize,
    last_index: usize,
    rendered_height: u32,
    top_height: u32,
    bottom_height: u32,

    items: Vec<Entry<T>>,
    item_to_element: HashMap<ItemKey, NodeId>,
    next_key: u64,
    selected_index: Option<usize>,
    handle_input: bool,

    delegate: D,
    mode: ListMode,
    geometry: Geometry,
}

impl<T, D: ListDelegate<T>> ListControl<T, D> {
    pub fn new(delegate: D, mode: ListMode) -> Self {
        let mut dom = Dom::new();
        let top_element = dom.insert(Node::spacer().data("role", "top-spacer"));
        let bottom_element = dom.insert(Node::spacer().data("role", "bottom-spacer"));
        let mut list = Self {
            dom,
            top_element,
            bottom_element,
            first_index: 0,
            last_index: 0,
            rendered_height: 0,
            top_height: 0,
            bottom_height: 0,
            items: Vec::new(),
            item_to_element: HashMap::new(),
            next_key: 0,
            selected_index: None,
            handle_input: false,
            delegate,
            mode,
            geometry: Geometry::for_mode(mode),
        };
        list.clear_contents();
        list
    }

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    /// The scroll container the list renders into.
    pub fn element(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access for the host, e.g. to report a new viewport height.
    /// Children of the root must not be touched while the list is alive.
    pub fn element_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// Enable or disable keyboard and click handling in [`handle_event`].
    /// Scrolling is always handled.
    ///
    /// [`handle_event`]: Self::handle_event
    pub fn set_handle_input(&mut self, handle_input: bool) {
        self.handle_input = handle_input;
    }

    pub fn length(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_at_index(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(|entry| &entry.item)
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|entry| &entry.item)
    }

    /// The cached node for the item at `index`, if it has been realized.
    pub fn element_for_index(&self, index: usize) -> Option<NodeId> {
        let entry = self.items.get(index)?;
        self.item_to_element.get(&entry.key).copied()
    }

    /// Index range of items currently attached in a viewport mode.
    pub fn render_window(&self) -> Range<usize> {
        self.first_index..self.last_index
    }

    /// Heights of the top and bottom spacers.
    pub fn spacer_heights(&self) -> (u32, u32) {
        (self.top_height, self.bottom_height)
    }

    /// Content height accounted for by the last viewport update.
    pub fn rendered_height(&self) -> u32 {
        self.rendered_height
    }

    /// Total height of all items.
    pub fn total_height(&mut self) -> u32 {
        if self.mode == ListMode::Grow {
            return self.dom.content_height();
        }
        self.offset_at_index(self.items.len())
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    pub fn push_item(&mut self, item: T) {
        let len = self.items.len();
        self.replace_items_in_range(len, len, [item]);
    }

    pub fn pop_item(&mut self) -> Option<T> {
        let index = self.items.len().checked_sub(1)?;
        self.remove_item_at_index(index)
    }

    pub fn insert_item_at_index(&mut self, index: usize, item: T) {
        self.replace_items_in_range(index, index, [item]);
    }

    pub fn remove_item_at_index(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        self.replace_items_in_range(index, index + 1, []).pop()
    }

    pub fn replace_all_items(&mut self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let len = self.items.len();
        self.replace_items_in_range(0, len, items)
    }

    /// Replace items `[from, to)` with `items` and return the removed ones.
    ///
    /// Cached nodes of removed items are dropped, the rendered region is
    /// patched, and a selection inside the replaced span moves to the nearest
    /// selectable item after it (or before it if there is none after).
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to > self.length()`.
    pub fn replace_items_in_range(
        &mut self,
        from: usize,
        to: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Vec<T> {
        let old_selected_element = self.selected_index.and_then(|index| self.element_for_index(index));

        let mut released = Vec::new();
        for entry in &self.items[from..to] {
            if let Some(element) = self.item_to_element.remove(&entry.key) {
                released.push(element);
            }
        }

        let mut entries = Vec::new();
        for item in items {
            entries.push(Entry {
                key: ItemKey(self.next_key),
                item,
            });
            self.next_key += 1;
        }
        let inserted = entries.len();
        let removed: Vec<Entry<T>> = self.items.splice(from..to, entries).collect();
        self.invalidate(from, to, inserted);

        match self.selected_index {
            Some(selected) if selected >= to => {
                self.selected_index = Some(selected - (to - from) + inserted);
            }
            Some(selected) if selected >= from => {
                let index = self
                    .find_first_selectable(from as isize + inserted as isize, Direction::Down, false)
                    .or_else(|| self.find_first_selectable(from as isize - 1, Direction::Up, false));
                let old_item = removed.get(selected - from).map(|entry| &entry.item);
                self.select_replacing(index, old_item, old_selected_element);
            }
            _ => {}
        }

        for element in released {
            self.dom.destroy(element);
        }
        removed.into_iter().map(|entry| entry.item).collect()
    }

    /// Re-derive heights and nodes for `[from, to)` after the items changed
    /// in place. Length and selection are untouched.
    pub fn invalidate_range(&mut self, from: usize, to: usize) {
        self.invalidate(from, to, to - from);
    }

    /// Redraw for the current scroll position after the viewport changed
    /// size. Does nothing in grow mode.
    pub fn viewport_resized(&mut self) {
        if self.mode == ListMode::Grow {
            return;
        }
        let scroll_top = self.dom.scroll_top();
        let viewport_height = self.dom.viewport_height();
        self.clear_viewport();
        let total_height = self.total_height();
        self.update_viewport(
            scroll_top.min(total_height.saturating_sub(viewport_height)),
            viewport_height,
        );
    }

    /// Forget the shared item height so it is measured again, and re-render.
    pub fn fixed_height_changed(&mut self) -> Result<(), ListError> {
        let Geometry::Fixed { height, .. } = &mut self.geometry else {
            warn!("fixed_height_changed called in {} mode", self.mode);
            return Err(ListError::FixedHeightOnly { mode: self.mode });
        };
        *height = 0;
        if !self.items.is_empty() {
            let released: Vec<NodeId> = self.item_to_element.drain().map(|(_, element)| element).collect();
            let len = self.items.len();
            self.invalidate(0, len, len);
            for element in released {
                if self.dom.parent(element).is_none() {
                    self.dom.destroy(element);
                }
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Scrolling and selection
    // -------------------------------------------------------------------------

    /// Scroll the minimal amount needed to show the item at `index`.
    pub fn scroll_item_at_index_into_view(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        if self.mode == ListMode::Grow {
            let element = self.element_at_index(index);
            self.dom.scroll_into_view_if_needed(element);
            return;
        }
        let top = self.offset_at_index(index);
        let bottom = self.offset_at_index(index + 1);
        let scroll_top = self.dom.scroll_top();
        let viewport_height = self.dom.viewport_height();
        if top < scroll_top {
            self.update_viewport(top, viewport_height);
        } else if bottom > scroll_top.saturating_add(viewport_height) {
            self.update_viewport(bottom.saturating_sub(viewport_height), viewport_height);
        }
    }

    /// Select the item at `index`, or clear the selection with `None`.
    pub fn select_item_at_index(
        &mut self,
        index: Option<usize>,
        scroll_into_view: bool,
    ) -> Result<(), ListError> {
        if let Some(index) = index {
            let Some(entry) = self.items.get(index) else {
                return Err(ListError::IndexOutOfRange {
                    index,
                    len: self.items.len(),
                });
            };
            if !self.delegate.is_item_selectable(&entry.item) {
                warn!("attempt to select non-selectable item {index}");
                return Err(ListError::NotSelectable { index });
            }
        }
        self.select(index);
        if let (Some(index), true) = (index, scroll_into_view) {
            self.scroll_item_at_index_into_view(index);
        }
        Ok(())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected_index.and_then(|index| self.item_at_index(index))
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Dispatch a host event. Returns true if the list consumed it.
    ///
    /// Scroll events always move the container; outside grow mode they also
    /// re-render the window. Keys and clicks are only handled while input
    /// handling is enabled.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key { key, .. } if self.handle_input => self.on_key_down(*key),
            Event::Click {
                target: Some(target),
                ..
            } if self.handle_input => self.on_click(*target),
            Event::Scroll { delta } => {
                let moved = self.dom.scroll_by(*delta);
                self.on_scroll();
                moved
            }
            _ => false,
        }
    }

    /// Re-render for the container's current scroll position.
    pub fn on_scroll(&mut self) {
        if self.mode == ListMode::Grow {
            return;
        }
        let scroll_top = self.dom.scroll_top();
        let viewport_height = self.dom.viewport_height();
        self.update_viewport(scroll_top, viewport_height);
    }

    /// Move the selection with arrow and page keys. Returns false for keys
    /// the list does not handle, which the caller must not consume.
    pub fn on_key_down(&mut self, key: Key) -> bool {
        let len = self.items.len() as isize;
        let index = match key {
            Key::Up => {
                let start = self.selected_index.map_or(len - 1, |s| s as isize - 1);
                self.find_first_selectable(start, Direction::Up, true)
            }
            Key::Down => {
                let start = self.selected_index.map_or(0, |s| s as isize + 1);
                self.find_first_selectable(start, Direction::Down, true)
            }
            Key::PageUp if self.mode.is_virtualized() => {
                let Some(last) = self.items.len().checked_sub(1) else {
                    return false;
                };
                let start = self.selected_index.unwrap_or(last);
                self.find_page_selectable(start, Direction::Up)
            }
            Key::PageDown if self.mode.is_virtualized() => {
                if self.items.is_empty() {
                    return false;
                }
                let start = self.selected_index.unwrap_or(0);
                self.find_page_selectable(start, Direction::Down)
            }
            _ => return false,
        };
        let Some(index) = index else {
            return false;
        };
        self.scroll_item_at_index_into_view(index);
        self.select(Some(index));
        true
    }

    /// Select the item whose node contains `target`. Returns false if the
    /// node does not belong to a selectable item.
    pub fn on_click(&mut self, target: NodeId) -> bool {
        let Some(node) = virtdom::top_level_child(&self.dom, target) else {
            return false;
        };
        let Some(key) = self
            .item_to_element
            .iter()
            .find_map(|(key, &element)| (element == node).then_some(*key))
        else {
            return false;
        };
        let Some(index) = self.items.iter().position(|entry| entry.key == key) else {
            return false;
        };
        if !self.delegate.is_item_selectable(&self.items[index].item) {
            return false;
        }
        self.select(Some(index));
        true
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn element_at_index(&mut self, index: usize) -> NodeId {
        let entry = &self.items[index];
        if let Some(&element) = self.item_to_element.get(&entry.key) {
            return element;
        }
        let element = self.delegate.create_element_for_item(&mut self.dom, &entry.item);
        self.item_to_element.insert(entry.key, element);
        element
    }

    fn select(&mut self, index: Option<usize>) {
        let old_index = self.selected_index;
        let old_element = old_index.and_then(|i| self.element_for_index(i));
        self.selected_index = index;
        let new_element = index.map(|i| self.element_at_index(i));
        let from = old_index.map(|i| &self.items[i].item);
        let to = index.map(|i| &self.items[i].item);
        self.delegate
            .selected_item_changed(from, to, old_element, new_element);
    }

    /// Like [`select`](Self::select), but the previous item is no longer in
    /// the list and is passed in explicitly.
    fn select_replacing(&mut self, index: Option<usize>, old_item: Option<&T>, old_element: Option<NodeId>) {
        self.selected_index = index;
        let new_element = index.map(|i| self.element_at_index(i));
        let to = index.map(|i| &self.items[i].item);
        self.delegate
            .selected_item_changed(old_item, to, old_element, new_element);
    }

    fn find_first_selectable(&self, mut index: isize, direction: Direction, can_wrap: bool) -> Option<usize> {
        let len = self.items.len() as isize;
        if len == 0 {
            return None;
        }
        for _ in 0..=len {
            if index < 0 || index >= len {
                if !can_wrap {
                    return None;
                }
                index = index.rem_euclid(len);
            }
            if self.delegate.is_item_selectable(&self.items[index as usize].item) {
                return Some(index as usize);
            }
            index += direction.step();
        }
        None
    }

    /// First selectable item at least a viewport away from `index`, or the
    /// farthest selectable one if none is that far.
    fn find_page_selectable(&mut self, index: usize, direction: Direction) -> Option<usize> {
        let mut last_selectable = None;
        let start_offset = self.offset_at_index(index);
        // One row short to absorb rounding in the reported viewport height.
        let viewport_height = self.dom.viewport_height().saturating_sub(1);
        let mut index = index as isize;
        while index >= 0 && (index as usize) < self.items.len() {
            let i = index as usize;
            if self.delegate.is_item_selectable(&self.items[i].item) {
                if self.offset_at_index(i).abs_diff(start_offset) >= viewport_height {
                    return Some(i);
                }
                last_selectable = Some(i);
            }
            index += direction.step();
        }
        last_selectable
    }

    fn fixed_height(&mut self) -> u32 {
        let Geometry::Fixed { measured, height } = self.geometry else {
            unreachable!("fixed height requested outside fixed modes");
        };
        if height != 0 || self.items.is_empty() {
            return height;
        }
        let height = if measured {
            let element = self.element_at_index(0);
            self.dom.preferred_height(element)
        } else {
            self.delegate.height_for_item(&self.items[0].item)
        };
        debug!("measured fixed item height {height}");
        if let Geometry::Fixed { height: cached, .. } = &mut self.geometry {
            *cached = height;
        }
        height
    }

    fn offset_at_index(&mut self, index: usize) -> u32 {
        if self.items.is_empty() {
            return 0;
        }
        match &self.geometry {
            Geometry::Grow => unreachable!("there should be no offset conversions in grow mode"),
            Geometry::Variable(offsets) => return offsets.get(index),
            Geometry::Fixed { .. } => {}
        }
        (index as u32).saturating_mul(self.fixed_height())
    }

    fn index_at_offset(&mut self, offset: i64) -> usize {
        let len = self.items.len();
        if len == 0 || offset < 0 {
            return 0;
        }
        let offset = offset.min(i64::from(u32::MAX)) as u32;
        match &self.geometry {
            Geometry::Grow => unreachable!("there should be no offset conversions in grow mode"),
            Geometry::Variable(offsets) => return offsets.lower_bound(offset, len).min(len - 1),
            Geometry::Fixed { .. } => {}
        }
        offset
            .checked_div(self.fixed_height())
            .map_or(len - 1, |index| (index as usize).min(len - 1))
    }

    fn invalidate(&mut self, from: usize, to: usize, inserted: usize) {
        if self.mode == ListMode::Grow {
            self.invalidate_grow_mode(from, to - from, inserted);
            return;
        }

        if let Geometry::Variable(offsets) = &mut self.geometry {
            let delegate = &self.delegate;
            offsets.reallocate(self.items.len() + 1, from + 1);
            offsets.rebuild_from(
                from,
                self.items[from..]
                    .iter()
                    .map(|entry| delegate.height_for_item(&entry.item)),
            );
        }

        let viewport_height = self.dom.viewport_height();
        let total_height = self.total_height();
        let scroll_top = self.dom.scroll_top();

        if self.rendered_height < viewport_height || total_height < viewport_height {
            debug!("invalidate [{from}, {to}): content does not fill viewport, re-rendering");
            self.clear_viewport();
            self.update_viewport(
                scroll_top.min(total_height.saturating_sub(viewport_height)),
                viewport_height,
            );
            return;
        }

        let height_delta = i64::from(total_height) - i64::from(self.rendered_height);
        if to <= self.first_index {
            let top_height = apply_delta(self.top_height, height_delta);
            self.dom.set_height(self.top_element, top_height);
            self.dom.set_scroll_top(apply_delta(scroll_top, height_delta));
            self.top_height = top_height;
            self.rendered_height = total_height;
            self.first_index = self.first_index - (to - from) + inserted;
            self.last_index = self.last_index - (to - from) + inserted;
            return;
        }

        if from >= self.last_index {
            let bottom_height = apply_delta(self.bottom_height, height_delta);
            self.dom.set_height(self.bottom_element, bottom_height);
            self.bottom_height = bottom_height;
            self.rendered_height = total_height;
            return;
        }

        debug!(
            "invalidate [{from}, {to}) overlaps window [{}, {}), re-rendering",
            self.first_index, self.last_index
        );
        self.clear_viewport();
        self.update_viewport(
            scroll_top.min(total_height.saturating_sub(viewport_height)),
            viewport_height,
        );
    }

    /// Splice attached nodes directly: the item at index `i` is the `i + 1`th
    /// child, after the top spacer.
    fn invalidate_grow_mode(&mut self, start: usize, remove: usize, add: usize) {
        let root = self.dom.root();
        for _ in 0..remove {
            let Some(&element) = self.dom.children(root).get(start + 1) else {
                break;
            };
            self.dom.remove(element);
        }
        let reference = self.dom.children(root).get(start + 1).copied();
        for index in start..start + add {
            let element = self.element_at_index(index);
            self.dom.insert_before(root, element, reference);
        }
    }

    fn clear_viewport(&mut self) {
        self.first_index = 0;
        self.last_index = 0;
        self.rendered_height = 0;
        self.top_height = 0;
        self.bottom_height = 0;
        self.clear_contents();
    }

    fn clear_contents(&mut self) {
        let root = self.dom.root();
        self.dom.set_height(self.top_element, 0);
        self.dom.set_height(self.bottom_element, 0);
        self.dom.clear_children(root);
        self.dom.append_child(root, self.top_element);
        self.dom.append_child(root, self.bottom_element);
    }

    /// Attach the items within one viewport above and two below `scroll_top`,
    /// reusing already attached nodes where the old and new windows overlap.
    fn update_viewport(&mut self, scroll_top: u32, viewport_height: u32) {
        let total_height = self.total_height();
        if total_height == 0 {
            self.clear_viewport();
            return;
        }

        let first_index = self.index_at_offset(i64::from(scroll_top) - i64::from(viewport_height));
        let last_index = self.index_at_offset(i64::from(scroll_top) + 2 * i64::from(viewport_height)) + 1;
        trace!(
            "viewport {scroll_top}+{viewport_height}: window [{}, {}) -> [{first_index}, {last_index})",
            self.first_index, self.last_index
        );

        while self.first_index < first_index.min(self.last_index) {
            let element = self.element_at_index(self.first_index);
            self.dom.remove(element);
            self.first_index += 1;
        }
        while self.last_index > last_index.max(self.first_index) {
            let element = self.element_at_index(self.last_index - 1);
            self.dom.remove(element);
            self.last_index -= 1;
        }

        self.first_index = self.first_index.min(last_index);
        self.last_index = self.last_index.max(first_index);
        let root = self.dom.root();
        for index in (first_index..self.first_index).rev() {
            let element = self.element_at_index(index);
            let reference = self.dom.next_sibling(self.top_element);
            self.dom.insert_before(root, element, reference);
        }
        for index in self.last_index..last_index {
            let element = self.element_at_index(index);
            self.dom.insert_before(root, element, Some(self.bottom_element));
        }

        self.first_index = first_index;
        self.last_index = last_index;
        self.top_height = self.offset_at_index(first_index);
        self.dom.set_height(self.top_element, self.top_height);
        self.bottom_height = total_height - self.offset_at_index(last_index);
        self.dom.set_height(self.bottom_element, self.bottom_height);
        self.rendered_height = total_height;
        self.dom.set_scroll_top(scroll_top);
    }
}

fn apply_delta(value: u32, delta: i64) -> u32 {
    (i64::from(value) + delta).clamp(0, i64::from(u32::MAX)) as u32
}
