use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Keys the prompts care about. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Esc,
    /// Ctrl+C. Raw mode swallows the signal, so prompts surface it as an error.
    Interrupt,
    Other,
}

impl Key {
    /// The character a key would print, if any.
    pub fn printable(self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// Block until a key press arrives (mouse, resize and release events are skipped).
///
/// Expects raw mode to be enabled by the caller.
pub fn read_key() -> std::io::Result<Key> {
    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind == KeyEventKind::Release {
            continue;
        }
        log::debug!(
            "Key event: {:?} with modifiers {:?}",
            key_event.code,
            key_event.modifiers
        );
        let key = match (key_event.modifiers, key_event.code) {
            // Ctrl+H is backspace on terminals that send it as a control character
            (KeyModifiers::CONTROL, KeyCode::Char('h')) => Key::Backspace,
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Key::Interrupt,
            (KeyModifiers::CONTROL, KeyCode::Char(_)) => Key::Other,
            (_, KeyCode::Char(c)) => Key::Char(c),
            (_, KeyCode::Backspace) => Key::Backspace,
            (_, KeyCode::Enter) => Key::Enter,
            (_, KeyCode::Esc) => Key::Esc,
            (_, KeyCode::Up) => Key::Up,
            (_, KeyCode::Down) => Key::Down,
            (_, KeyCode::Left) => Key::Left,
            (_, KeyCode::Right) => Key::Right,
            _ => Key::Other,
        };
        return Ok(key);
    }
}

/// Error returned by a prompt when the user presses Ctrl+C.
pub fn interrupted() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Interrupted, "input interrupted")
}
