//! Demo row model and the delegate that turns rows into nodes.

use virtdom::{Dom, Node, NodeId, Rgb, Style};
use virtlist::ListDelegate;

/// Every seventh row is a section header.
const HEADER_EVERY: u64 = 7;

const HEADER_FG: Rgb = Rgb::new(0xe5, 0xc0, 0x7b);
const SELECTED_BG: Rgb = Rgb::new(0x3e, 0x44, 0x51);
const MUTED_FG: Rgb = Rgb::new(0x7f, 0x84, 0x8e);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Entry { height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u64,
    pub kind: RowKind,
}

impl Row {
    pub fn is_header(&self) -> bool {
        self.kind == RowKind::Header
    }

    pub fn height(&self) -> u32 {
        match self.kind {
            RowKind::Header => 1,
            RowKind::Entry { height } => height,
        }
    }
}

/// Hands out rows with increasing ids and heights spread over
/// `min_height..=max_height`.
#[derive(Debug)]
pub struct RowSource {
    next_id: u64,
    min_height: u32,
    max_height: u32,
}

impl RowSource {
    pub fn new(min_height: u32, max_height: u32) -> Self {
        Self {
            next_id: 0,
            min_height,
            max_height: max_height.max(min_height),
        }
    }

    pub fn next_row(&mut self) -> Row {
        let id = self.next_id;
        self.next_id += 1;
        let kind = if id % HEADER_EVERY == 0 {
            RowKind::Header
        } else {
            let span = u64::from(self.max_height - self.min_height) + 1;
            // Multiplicative hash so neighbouring rows differ in height.
            let spread = id.wrapping_mul(0x9e37_79b9_7f4a_7c15) >> 32;
            RowKind::Entry {
                height: self.min_height + (spread % span) as u32,
            }
        };
        Row { id, kind }
    }

    pub fn take(&mut self, count: usize) -> Vec<Row> {
        (0..count).map(|_| self.next_row()).collect()
    }
}

/// A node whose selection highlight still has to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restyle {
    pub element: NodeId,
    pub row: u64,
    pub selected: bool,
}

#[derive(Debug, Default)]
pub struct RowDelegate {
    pending: Vec<Restyle>,
    created: usize,
}

impl RowDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes realized so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Highlight changes queued since the last call.
    pub fn take_restyles(&mut self) -> Vec<Restyle> {
        std::mem::take(&mut self.pending)
    }
}

/// Apply queued highlight changes. Nodes that were released or reissued for
/// another row since the change was queued are skipped.
pub fn apply_restyles(dom: &mut Dom, restyles: Vec<Restyle>) {
    for restyle in restyles {
        let row = restyle.row.to_string();
        let Some(node) = dom.get_mut(restyle.element) else {
            continue;
        };
        if node.get_data("row") != Some(&row) {
            continue;
        }
        node.style = if restyle.selected {
            entry_style().background(SELECTED_BG)
        } else {
            entry_style()
        };
    }
}

fn entry_style() -> Style {
    Style::new()
}

fn header_style() -> Style {
    Style::new().foreground(HEADER_FG).bold()
}

impl ListDelegate<Row> for RowDelegate {
    fn create_element_for_item(&mut self, dom: &mut Dom, item: &Row) -> NodeId {
        self.created += 1;
        let data = item.id.to_string();
        match item.kind {
            RowKind::Header => dom.insert(
                Node::text(format!("── section {} ──", item.id / HEADER_EVERY))
                    .style(header_style())
                    .height(1)
                    .data("row", data),
            ),
            RowKind::Entry { height } => {
                let element = dom.insert(
                    Node::text(format!("row {:>7}", item.id))
                        .style(entry_style())
                        .height(height)
                        .data("row", data),
                );
                if height > 1 {
                    let details = (1..height)
                        .map(|line| format!("    detail {line} of {}", height - 1))
                        .collect::<Vec<_>>()
                        .join("\n");
                    let child = dom.insert(Node::text(details).style(Style::new().foreground(MUTED_FG)));
                    dom.append_child(element, child);
                }
                element
            }
        }
    }

    fn height_for_item(&self, item: &Row) -> u32 {
        item.height()
    }

    fn is_item_selectable(&self, item: &Row) -> bool {
        !item.is_header()
    }

    fn selected_item_changed(
        &mut self,
        from: Option<&Row>,
        to: Option<&Row>,
        from_element: Option<NodeId>,
        to_element: Option<NodeId>,
    ) {
        if let (Some(row), Some(element)) = (from, from_element) {
            self.pending.push(Restyle {
                element,
                row: row.id,
                selected: false,
            });
        }
        if let (Some(row), Some(element)) = (to, to_element) {
            self.pending.push(Restyle {
                element,
                row: row.id,
                selected: true,
            });
        }
    }
}
