//! Terminal column widths.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Columns taken by `c`; control characters count as zero.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cut `s` to at most `max_width` columns, ending in `…` when anything was
/// dropped. Borrows when `s` already fits.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let room = max_width - 1;
    let mut used = 0;
    let end = s
        .char_indices()
        .find_map(|(i, ch)| {
            used += char_width(ch);
            (used > room).then_some(i)
        })
        .unwrap_or(s.len());
    let mut cut = String::with_capacity(end + ELLIPSIS.len_utf8());
    cut.push_str(&s[..end]);
    cut.push(ELLIPSIS);
    Cow::Owned(cut)
}
