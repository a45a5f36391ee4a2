use crate::buffer::{Buffer, Ink};
use crate::dom::{Content, Dom, NodeId};
use crate::layout::Rect;
use crate::types::{Rgb, Style};

/// Paint the visible slice of the root's children into `area`.
///
/// Children are stacked top to bottom starting at `-scroll_top`; anything
/// outside `area` is clipped.
pub fn render_viewport(dom: &Dom, area: Rect, buf: &mut Buffer) {
    let mut top = -i64::from(dom.scroll_top());
    for &child in dom.children(dom.root()) {
        if top >= i64::from(area.height) {
            break;
        }
        let height = i64::from(dom.preferred_height(child));
        if top + height > 0 {
            render_node(dom, child, top, area, buf, &Style::default());
        }
        top += height;
    }
}

/// Render `node` with its top edge at `top` rows relative to `area.y`.
fn render_node(dom: &Dom, node: NodeId, top: i64, area: Rect, buf: &mut Buffer, inherited: &Style) {
    let Some(element) = dom.get(node) else {
        return;
    };
    let height = i64::from(dom.preferred_height(node));
    let style = Style {
        background: element.style.background.or(inherited.background),
        foreground: element.style.foreground.or(inherited.foreground),
        text_style: element.style.text_style,
    };

    if let Some(bg) = element.style.background {
        for row in top..top + height {
            if let Some(y) = visible_row(area, row) {
                fill_row(buf, area, y, bg);
            }
        }
    }

    let mut cursor = top;
    if let Content::Text(text) = &element.content {
        for line in text.lines() {
            if let Some(y) = visible_row(area, cursor) {
                render_line(line, area, y, &style, buf);
            }
            cursor += 1;
        }
        if text.is_empty() {
            cursor += 1;
        }
    }

    for &child in element.children() {
        if cursor >= top + height || cursor >= i64::from(area.height) {
            break;
        }
        render_node(dom, child, cursor, area, buf, &style);
        cursor += i64::from(dom.preferred_height(child));
    }
}

fn visible_row(area: Rect, row: i64) -> Option<u16> {
    if row < 0 || row >= i64::from(area.height) {
        return None;
    }
    Some(area.y + row as u16)
}

fn fill_row(buf: &mut Buffer, area: Rect, y: u16, bg: Rgb) {
    buf.fill_background(y, area.x, area.right(), bg);
}

fn render_line(line: &str, area: Rect, y: u16, style: &Style, buf: &mut Buffer) {
    let ink = Ink {
        fg: style.foreground,
        bg: style.background,
        style: style.text_style,
    };
    buf.put_line(area.x, y, area.width, line, ink);
}
