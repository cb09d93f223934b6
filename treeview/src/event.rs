use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

/// Platform-neutral input events consumed by the tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Key press
    Key { key: Key, modifiers: Modifiers },
    /// Mouse button press at a screen position
    Click { x: u16, y: u16, button: MouseButton },
    /// Terminal resized
    Resize { width: u16, height: u16 },
}

impl Event {
    /// Key press without modifiers.
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::new(),
        }
    }

    /// Left click at the given cell.
    pub fn click(x: u16, y: u16) -> Self {
        Self::Click {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    /// Translate a raw crossterm event.
    ///
    /// Only key presses (not releases or repeats), mouse button presses and
    /// resizes have a counterpart; everything else maps to `None`.
    pub fn from_crossterm(raw: &CrosstermEvent) -> Option<Self> {
        match raw {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(Self::Key {
                    key: key_event.code.into(),
                    modifiers: key_event.modifiers.into(),
                })
            }
            CrosstermEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::Down(button) => Some(Self::Click {
                    x: mouse_event.column,
                    y: mouse_event.row,
                    button: button.into(),
                }),
                _ => None,
            },
            CrosstermEvent::Resize(width, height) => Some(Self::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
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
    Other,
}

impl Key {
    pub const SPACE: Key = Key::Char(' ');
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

    /// Ctrl or Alt held. Widgets leave such chords to the application.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
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
            _ => Key::Other,
        }
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
