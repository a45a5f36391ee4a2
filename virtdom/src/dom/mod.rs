mod node;
mod tree;

pub use node::{Content, Node, NodeId};
pub use tree::Dom;
