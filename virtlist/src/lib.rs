//! Virtualized list control.
//!
//! [`ListControl`] renders only the slice of a possibly huge item sequence
//! that is near the visible part of a scroll container, keeps a single
//! selection, and drives keyboard/click navigation. Items are turned into
//! nodes lazily by a [`ListDelegate`].
//!
//! # Example
//!
//! ```ignore
//! use virtlist::{ListControl, ListDelegate, ListMode};
//! use virtdom::{Dom, Node, NodeId};
//!
//! struct Lines;
//!
//! impl ListDelegate<String> for Lines {
//!     fn create_element_for_item(&mut self, dom: &mut Dom, item: &String) -> NodeId {
//!         dom.insert(Node::text(item.clone()))
//!     }
//!     fn height_for_item(&self, _item: &String) -> u32 {
//!         1
//!     }
//!     fn is_item_selectable(&self, _item: &String) -> bool {
//!         true
//!     }
//!     fn selected_item_changed(
//!         &mut self,
//!         _from: Option<&String>,
//!         _to: Option<&String>,
//!         _from_element: Option<NodeId>,
//!         _to_element: Option<NodeId>,
//!     ) {
//!     }
//! }
//!
//! let mut list = ListControl::new(Lines, ListMode::ViewportFixedItems);
//! list.element_mut().set_viewport_height(24);
//! list.replace_all_items((0..100_000).map(|i| format!("line {i}")));
//! ```

mod control;
mod delegate;
mod error;
mod mode;
mod offsets;

pub use control::ListControl;
pub use delegate::ListDelegate;
pub use error::ListError;
pub use mode::ListMode;
pub use offsets::OffsetTable;
