use std::collections::HashMap;

use crate::types::Style;

/// Handle to a node stored in a [`Dom`](super::Dom).
///
/// Handles are only meaningful for the document that issued them. A handle
/// whose node was destroyed may later be reissued for a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    None,
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub content: Content,
    /// Explicit height in rows. Overrides the measured height when set.
    pub height: Option<u32>,
    pub style: Style,
    pub data: HashMap<String, String>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn box_() -> Self {
        Self::default()
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    /// A zero-height placeholder whose height is driven externally.
    pub fn spacer() -> Self {
        Self {
            height: Some(0),
            ..Default::default()
        }
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of text rows this node's own content occupies.
    pub fn text_rows(&self) -> u32 {
        match &self.content {
            Content::None => 0,
            Content::Text(text) => text.lines().count().max(1) as u32,
        }
    }
}
