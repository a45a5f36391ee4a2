use crate::dom::{Dom, NodeId};
use crate::hit::hit_test;

/// High-level events with node targeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, delivered to the focused surface
    Key { key: Key, modifiers: Modifiers },
    /// Mouse click, targeted at the node under the pointer
    Click {
        target: Option<NodeId>,
        x: u16,
        y: u16,
        button: MouseButton,
    },
    /// Wheel scroll in rows (positive scrolls content up)
    Scroll { delta: i32 },
    /// Terminal resized
    Resize { width: u16, height: u16 },
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl Event {
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::new(),
        }
    }

    /// Translate a raw crossterm event, resolving mouse targets against `dom`.
    /// `origin_y` is the terminal row where the scroll container starts.
    pub fn from_crossterm(event: &crossterm::event::Event, dom: &Dom, origin_y: u16) -> Option<Self> {
        use crossterm::event::{Event as CtEvent, KeyEventKind, MouseEventKind};
        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key {
                key: Key::try_from(key.code).ok()?,
                modifiers: key.modifiers.into(),
            }),
            CtEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(button) => {
                    let target = mouse
                        .row
                        .checked_sub(origin_y)
                        .and_then(|row| hit_test(dom, row));
                    Some(Self::Click {
                        target,
                        x: mouse.column,
                        y: mouse.row,
                        button: button.into(),
                    })
                }
                MouseEventKind::ScrollDown => Some(Self::Scroll { delta: 3 }),
                MouseEventKind::ScrollUp => Some(Self::Scroll { delta: -3 }),
                _ => None,
            },
            CtEvent::Resize(width, height) => Some(Self::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

impl TryFrom<crossterm::event::KeyCode> for Key {
    type Error = ();

    fn try_from(code: crossterm::event::KeyCode) -> Result<Self, Self::Error> {
        use crossterm::event::KeyCode;
        Ok(match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => return Err(()),
        })
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
