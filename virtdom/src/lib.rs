pub mod buffer;
pub mod dom;
pub mod event;
pub mod hit;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell, Ink};
pub use dom::{Content, Dom, Node, NodeId};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use hit::{hit_test, top_level_child};
pub use layout::Rect;
pub use terminal::Terminal;
pub use types::*;
