//! # Prompts
//!
//! Colored console prompts. The centerpiece is [`ask_validated`], a line
//! editor that re-checks the input after every keystroke and only returns
//! once the text satisfies the caller's predicate and parses into `T`.
//!
//! ## Session Layout
//!
//! ```text
//! >> Age: 2▌            question color, then the anchor
//!         └─ anchor     input is redrawn here after every key,
//!                       valid color while the predicate holds (or the
//!                       buffer is empty), invalid color otherwise
//! ```
//!
//! ## Rejection
//!
//! Enter on text that fails the predicate or the parse hands an
//! [`InvalidInput`] to the caller's adapter. `Some(e)` ends the session with
//! [`PromptError::Rejected`]; `None` asks the question again.
//!
//! The foreground color is restored on every exit path through
//! [`ColorScope`]. Raw mode is held for the whole session through
//! [`RawScope`], so nothing typed mid-redraw is echoed by the terminal.

use std::fmt;
use std::io;
use std::str::FromStr;

use crossterm::style::Color;
use log::{debug, warn};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::config::PromptSettings;
use crate::core::record::InvalidInput;
use crate::tui::console::{ColorScope, Console, Point, RawScope};
use crate::tui::event::{Key, interrupted};

pub const QUESTION_PREFIX: &str = ">> ";

/// How a question and its answer are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptStyle {
    /// Put the answer on the line below the question.
    pub newline: bool,
    pub question: Color,
    pub valid: Color,
    pub invalid: Color,
}

impl Default for PromptStyle {
    fn default() -> Self {
        Self {
            newline: false,
            question: Color::DarkBlue,
            valid: Color::Green,
            invalid: Color::Red,
        }
    }
}

impl PromptStyle {
    /// Builds a style from configured color names. Missing or unknown names
    /// keep the default color.
    pub fn from_settings(settings: &PromptSettings) -> Self {
        let defaults = Self::default();
        Self {
            newline: settings.newline,
            question: resolve_color(settings.question_color.as_deref(), defaults.question),
            valid: resolve_color(settings.valid_color.as_deref(), defaults.valid),
            invalid: resolve_color(settings.invalid_color.as_deref(), defaults.invalid),
        }
    }
}

fn resolve_color(name: Option<&str>, default: Color) -> Color {
    match name {
        None => default,
        Some(name) => parse_color(name).unwrap_or_else(|| {
            warn!("Unknown color '{}', using {:?}", name, default);
            default
        }),
    }
}

/// Maps a snake_case color name to a terminal color.
pub fn parse_color(name: &str) -> Option<Color> {
    let color = match name.trim().to_lowercase().as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        _ => return None,
    };
    Some(color)
}

// ============================================================================
// Errors
// ============================================================================

/// Why [`ask_validated`] returned without a value.
#[derive(Debug)]
pub enum PromptError<E> {
    /// The terminal failed, or the user pressed Ctrl+C (`ErrorKind::Interrupted`).
    Io(io::Error),
    /// The error adapter turned a rejection into a domain error.
    Rejected(E),
}

impl<E: fmt::Display> fmt::Display for PromptError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Io(e) => write!(f, "terminal error: {e}"),
            PromptError::Rejected(e) => write!(f, "{e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for PromptError<E> {}

impl<E> From<io::Error> for PromptError<E> {
    fn from(e: io::Error) -> Self {
        PromptError::Io(e)
    }
}

// ============================================================================
// Edit Buffer
// ============================================================================

/// What a key did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Confirm,
    Interrupt,
    Appended(char),
    Erased(char),
    Unchanged,
}

/// The text typed so far in one session.
#[derive(Debug, Default)]
pub struct EditBuffer {
    text: String,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.text.width()
    }

    pub fn apply(&mut self, key: Key) -> Edit {
        match key {
            Key::Enter => Edit::Confirm,
            Key::Interrupt => Edit::Interrupt,
            Key::Backspace => self.text.pop().map_or(Edit::Unchanged, Edit::Erased),
            _ => match key.printable() {
                Some(c) => {
                    self.text.push(c);
                    Edit::Appended(c)
                }
                None => Edit::Unchanged,
            },
        }
    }
}

// ============================================================================
// Rendering helpers
// ============================================================================

fn render_question<C: Console + ?Sized>(
    console: &mut C,
    question: &str,
    style: &PromptStyle,
) -> io::Result<()> {
    console.set_foreground(style.question)?;
    console.write(QUESTION_PREFIX)?;
    console.write(question)?;
    if style.newline {
        console.newline()?;
    }
    Ok(())
}

/// Step back over the last cell, blank it, and leave the cursor on it.
fn erase_cell<C: Console + ?Sized>(console: &mut C, width: u16) -> io::Result<()> {
    let at = console.cursor()?.retreat(width);
    console.move_to(at)?;
    console.write(" ")?;
    console.move_to(at)
}

/// Rewrite the whole buffer at the anchor and park the cursor after it.
///
/// `pad` blank cells follow the text to cover whatever was there before.
fn redraw<C: Console + ?Sized>(
    console: &mut C,
    anchor: Point,
    buffer: &EditBuffer,
    pad: usize,
    width: u16,
) -> io::Result<()> {
    console.move_to(anchor)?;
    console.write(&format!("{}{}", buffer.as_str(), " ".repeat(pad)))?;
    console.move_to(anchor.advance(buffer.width(), width))
}

/// Read keys until Enter, echoing as they are typed. No validation.
fn read_line<C: Console + ?Sized>(console: &mut C) -> io::Result<String> {
    let width = console.width()?;
    let mut buffer = EditBuffer::new();
    loop {
        match buffer.apply(console.read_key()?) {
            Edit::Confirm => return Ok(buffer.text),
            Edit::Interrupt => return Err(interrupted()),
            Edit::Appended(c) => console.write(c.encode_utf8(&mut [0; 4]))?,
            Edit::Erased(_) => erase_cell(console, width)?,
            Edit::Unchanged => {}
        }
    }
}

// ============================================================================
// Prompts
// ============================================================================

/// Ask a question and parse whatever line comes back.
///
/// Returns `Ok(None)` if the answer does not parse into `T`.
pub fn ask<T, C>(console: &mut C, question: &str, style: &PromptStyle) -> io::Result<Option<T>>
where
    T: FromStr,
    C: Console + ?Sized,
{
    let mut raw = RawScope::new(console)?;
    let mut console = ColorScope::new(&mut *raw);
    render_question(&mut *console, question, style)?;
    console.set_foreground(style.valid)?;
    let line = read_line(&mut *console)?;
    console.newline()?;
    Ok(line.parse().ok())
}

/// Ask a question answered by a single key press.
///
/// With `echo` set, a printable key is written after the question.
pub fn ask_key<C: Console + ?Sized>(
    console: &mut C,
    question: &str,
    style: &PromptStyle,
    echo: bool,
) -> io::Result<Key> {
    let mut console = ColorScope::new(console);
    render_question(&mut *console, question, style)?;
    console.set_foreground(style.valid)?;
    let key = console.read_key()?;
    if key == Key::Interrupt {
        return Err(interrupted());
    }
    if echo && let Some(c) = key.printable() {
        console.write(c.encode_utf8(&mut [0; 4]))?;
    }
    console.newline()?;
    Ok(key)
}

/// Ask a question and keep editing until the answer is accepted.
///
/// `predicate` is re-run after every keystroke to pick the answer color and
/// once more on Enter. The answer is accepted only if `predicate` holds and
/// the text parses into `T`. Otherwise `adapter` decides: `Some(e)` returns
/// `PromptError::Rejected(e)`, `None` asks again from the top.
///
/// # Errors
///
/// `PromptError::Io` if the terminal fails or the user presses Ctrl+C, and
/// `PromptError::Rejected` as described above.
pub fn ask_validated<T, E, C, P, A>(
    console: &mut C,
    question: &str,
    style: &PromptStyle,
    predicate: P,
    mut adapter: A,
) -> Result<T, PromptError<E>>
where
    T: FromStr,
    C: Console + ?Sized,
    P: Fn(&str) -> bool,
    A: FnMut(&InvalidInput) -> Option<E>,
{
    let mut raw = RawScope::new(console)?;
    let mut console = ColorScope::new(&mut *raw);

    loop {
        render_question(&mut *console, question, style)?;
        let anchor = console.cursor()?;
        let width = console.width()?;
        console.set_foreground(style.valid)?;

        let mut buffer = EditBuffer::new();
        loop {
            let mut pad = 1;
            match buffer.apply(console.read_key()?) {
                Edit::Confirm => break,
                Edit::Interrupt => return Err(interrupted().into()),
                Edit::Appended(c) => console.write(c.encode_utf8(&mut [0; 4]))?,
                Edit::Erased(c) => {
                    erase_cell(&mut *console, width)?;
                    pad = pad.max(c.width().unwrap_or(1));
                }
                Edit::Unchanged => {}
            }

            let color = if buffer.is_empty() || predicate(buffer.as_str()) {
                style.valid
            } else {
                style.invalid
            };
            console.set_foreground(color)?;
            redraw(&mut *console, anchor, &buffer, pad, width)?;
        }

        let candidate = buffer.as_str();
        console.newline()?;
        if predicate(candidate)
            && let Ok(value) = candidate.parse::<T>()
        {
            debug!("Accepted answer to {:?}", question);
            return Ok(value);
        }

        debug!("Rejected answer to {:?}: {:?}", question, candidate);
        if let Some(e) = adapter(&InvalidInput::new(candidate)) {
            return Err(PromptError::Rejected(e));
        }
        let original = console.original();
        console.set_foreground(original)?;
    }
}
