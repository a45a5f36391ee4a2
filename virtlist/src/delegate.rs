use virtdom::{Dom, NodeId};

/// Application callbacks the list uses to realize and describe its items.
pub trait ListDelegate<T> {
    /// Build a fresh, detached node for `item` in `dom`.
    ///
    /// Called at most once per item while the item's node stays cached.
    fn create_element_for_item(&mut self, dom: &mut Dom, item: &T) -> NodeId;

    /// Height of `item` in rows.
    ///
    /// Queried per item in [`ListMode::ViewportVariableItems`] and once, for
    /// the first item, in [`ListMode::ViewportFixedItems`].
    ///
    /// [`ListMode::ViewportVariableItems`]: crate::ListMode::ViewportVariableItems
    /// [`ListMode::ViewportFixedItems`]: crate::ListMode::ViewportFixedItems
    fn height_for_item(&self, item: &T) -> u32;

    fn is_item_selectable(&self, item: &T) -> bool;

    /// Notified on every selection change, including to and from no selection.
    fn selected_item_changed(
        &mut self,
        from: Option<&T>,
        to: Option<&T>,
        from_element: Option<NodeId>,
        to_element: Option<NodeId>,
    );
}
