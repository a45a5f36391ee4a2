use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, Cell};
use crate::layout::Rect;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// Raw-mode alternate-screen terminal with double-buffered diff flushing.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Wait for input. With `None` this blocks until at least one event arrives.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                events.push(event::read()?);
                true
            }
        };

        if has_event {
            if events.is_empty() {
                events.push(event::read()?);
            }
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Paint a frame. `paint` receives a cleared buffer covering the whole screen.
    pub fn draw(&mut self, paint: impl FnOnce(Rect, &mut Buffer)) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            log::debug!("terminal resized to {width}x{height}");
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.current_buffer.clear();
        paint(Rect::from_size(width, height), &mut self.current_buffer);
        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);
        Ok(())
    }

    /// Write the cells that changed since the last frame.
    fn flush_diff(&mut self) -> io::Result<()> {
        let mut pen = Pen::default();
        let mut next: Option<(u16, u16)> = None;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }
            if next != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            pen.apply(&mut self.stdout, cell)?;
            queue!(self.stdout, Print(cell.char))?;
            next = Some((x + char_width(cell.char).max(1) as u16, y));
        }
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

/// Colors and attributes last sent to the terminal.
struct Pen {
    fg: Rgb,
    bg: Rgb,
    style: TextStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            style: TextStyle::new(),
        }
    }
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, cell: &Cell) -> io::Result<()> {
        if cell.style != self.style {
            // Reset clears colors too, so they are re-sent below.
            queue!(out, SetAttribute(Attribute::Reset))?;
            let attributes = [
                (cell.style.bold, Attribute::Bold),
                (cell.style.dim, Attribute::Dim),
                (cell.style.italic, Attribute::Italic),
                (cell.style.underline, Attribute::Underlined),
            ];
            for (on, attribute) in attributes {
                if on {
                    queue!(out, SetAttribute(attribute))?;
                }
            }
            queue!(out, SetForegroundColor(cell.fg.into()), SetBackgroundColor(cell.bg.into()))?;
            *self = Self {
                fg: cell.fg,
                bg: cell.bg,
                style: cell.style,
            };
            return Ok(());
        }
        if cell.fg != self.fg {
            queue!(out, SetForegroundColor(cell.fg.into()))?;
            self.fg = cell.fg;
        }
        if cell.bg != self.bg {
            queue!(out, SetBackgroundColor(cell.bg.into()))?;
            self.bg = cell.bg;
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
