//! Cell grid the renderer paints into and the terminal diffs against.

use crate::text::{char_width, truncate_to_width};
use crate::types::{Rgb, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Second column of a double-width character; never printed itself.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            style: TextStyle::new(),
            wide_continuation: false,
        }
    }
}

/// Pen used by [`Buffer::put_line`]. `bg: None` keeps the background
/// already in the cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ink {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub style: TextStyle,
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|idx| &mut self.cells[idx])
    }

    /// Set the background of columns `[from, to)` on row `y`.
    pub fn fill_background(&mut self, y: u16, from: u16, to: u16, bg: Rgb) {
        for x in from..to.min(self.width) {
            if let Some(cell) = self.get_mut(x, y) {
                cell.bg = bg;
            }
        }
    }

    /// Write `text` on row `y` starting at column `x`, clipped to
    /// `max_width` columns with an ellipsis. Returns the columns used.
    pub fn put_line(&mut self, x: u16, y: u16, max_width: u16, text: &str, ink: Ink) -> u16 {
        let limit = x.saturating_add(max_width).min(self.width);
        let mut column = x;
        for ch in truncate_to_width(text, usize::from(max_width)).chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            if column + width > limit {
                break;
            }
            let Some(cell) = self.get_mut(column, y) else {
                break;
            };
            *cell = Cell {
                char: ch,
                fg: ink.fg.unwrap_or(Rgb::WHITE),
                bg: ink.bg.unwrap_or(cell.bg),
                style: ink.style,
                wide_continuation: false,
            };
            for offset in 1..width {
                if let Some(cell) = self.get_mut(column + offset, y) {
                    cell.wide_continuation = true;
                }
            }
            column += width;
        }
        column - x
    }

    /// Row `y` as a string, skipping wide-character continuation cells.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    /// Cells of `self` that differ from `previous`, as `(x, y, cell)`.
    /// Both buffers must have the same size.
    pub fn diff<'a>(&'a self, previous: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        let width = usize::from(self.width.max(1));
        self.cells
            .iter()
            .zip(&previous.cells)
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(move |(i, (cell, _))| ((i % width) as u16, (i / width) as u16, cell))
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}
