//! # Console Handle
//!
//! Everything the prompts need from a terminal, behind one trait so the
//! editing logic never touches global terminal state directly.
//!
//! - `Console`: read a key, query and move the cursor, write text, change
//!   the foreground color.
//! - `CrosstermConsole`: the real terminal. Raw mode is held for one whole
//!   input session (a `RawScope`), or just around a single key read outside
//!   of one, so ordinary `println!` output keeps working between prompts.
//! - `ColorScope`: borrows a console and puts the foreground color back when
//!   dropped, on every exit path.
//! - `RawScope`: keeps the console in raw mode until dropped, so keys typed
//!   during a redraw are never echoed by the terminal itself.

use std::io::{self, Stdout, Write, stdout};
use std::ops::{Deref, DerefMut};

use crossterm::cursor::{self, MoveTo};
use crossterm::style::{Color, SetForegroundColor};
use crossterm::{execute, terminal};
use log::debug;

use crate::tui::event::{Key, read_key};

/// A terminal cell address. `x` is the column, `y` the row, both 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The cell `cells` positions after this one, wrapping at `width` columns.
    pub fn advance(self, cells: usize, width: u16) -> Point {
        let width = usize::from(width.max(1));
        let linear = usize::from(self.x) + cells;
        let rows = linear / width;
        Point {
            x: (linear % width) as u16,
            y: self.y.saturating_add(rows as u16),
        }
    }

    /// The cell before this one, wrapping to the last column of the previous
    /// row when at column 0. Stays put at the origin.
    pub fn retreat(self, width: u16) -> Point {
        match (self.x, self.y) {
            (0, 0) => self,
            (0, y) => Point::new(width.saturating_sub(1), y - 1),
            (x, y) => Point::new(x - 1, y),
        }
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// The terminal operations used by prompts and menus.
pub trait Console {
    /// Block until the next key press. Keys are not echoed.
    fn read_key(&mut self) -> io::Result<Key>;

    fn cursor(&mut self) -> io::Result<Point>;

    fn move_to(&mut self, at: Point) -> io::Result<()>;

    /// Current foreground color.
    fn foreground(&self) -> Color;

    fn set_foreground(&mut self, color: Color) -> io::Result<()>;

    /// Write text at the cursor, advancing it.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Move to the start of the next row.
    fn newline(&mut self) -> io::Result<()>;

    /// Terminal width in columns.
    fn width(&mut self) -> io::Result<u16>;

    /// Enter (`true`) or leave (`false`) raw mode. Calls nest.
    fn hold_raw(&mut self, _hold: bool) -> io::Result<()> {
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.newline()
    }
}

/// Restores the foreground color of the wrapped console when dropped.
pub struct ColorScope<'a, C: Console + ?Sized> {
    console: &'a mut C,
    restore: Color,
}

impl<'a, C: Console + ?Sized> ColorScope<'a, C> {
    pub fn new(console: &'a mut C) -> Self {
        let restore = console.foreground();
        Self { console, restore }
    }

    /// The color that will be put back on drop.
    pub fn original(&self) -> Color {
        self.restore
    }
}

impl<C: Console + ?Sized> Deref for ColorScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.console
    }
}

impl<C: Console + ?Sized> DerefMut for ColorScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.console
    }
}

impl<C: Console + ?Sized> Drop for ColorScope<'_, C> {
    fn drop(&mut self) {
        let _ = self.console.set_foreground(self.restore);
    }
}

/// Holds the wrapped console in raw mode until dropped.
pub struct RawScope<'a, C: Console + ?Sized> {
    console: &'a mut C,
}

impl<'a, C: Console + ?Sized> RawScope<'a, C> {
    pub fn new(console: &'a mut C) -> io::Result<Self> {
        console.hold_raw(true)?;
        Ok(Self { console })
    }
}

impl<C: Console + ?Sized> Deref for RawScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.console
    }
}

impl<C: Console + ?Sized> DerefMut for RawScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.console
    }
}

impl<C: Console + ?Sized> Drop for RawScope<'_, C> {
    fn drop(&mut self) {
        let _ = self.console.hold_raw(false);
    }
}

// ============================================================================
// Crossterm
// ============================================================================

struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// `Console` backed by the process's real terminal.
pub struct CrosstermConsole {
    out: Stdout,
    color: Color,
    raw: Option<RawModeGuard>,
    raw_depth: usize,
}

impl CrosstermConsole {
    pub fn new() -> Self {
        Self {
            out: stdout(),
            color: Color::Reset,
            raw: None,
            raw_depth: 0,
        }
    }
}

impl Default for CrosstermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for CrosstermConsole {
    fn read_key(&mut self) -> io::Result<Key> {
        if self.raw.is_some() {
            return read_key();
        }
        let _raw = RawModeGuard::acquire()?;
        read_key()
    }

    fn cursor(&mut self) -> io::Result<Point> {
        cursor::position().map(Point::from)
    }

    fn move_to(&mut self, at: Point) -> io::Result<()> {
        execute!(self.out, MoveTo(at.x, at.y))
    }

    fn foreground(&self) -> Color {
        self.color
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        execute!(self.out, SetForegroundColor(color))?;
        self.color = color;
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn newline(&mut self) -> io::Result<()> {
        // Raw mode turns off the newline translation
        if self.raw.is_some() {
            self.write("\r\n")
        } else {
            self.write("\n")
        }
    }

    fn width(&mut self) -> io::Result<u16> {
        let (cols, rows) = terminal::size()?;
        debug!("Terminal size: {}x{}", cols, rows);
        Ok(cols)
    }

    fn hold_raw(&mut self, hold: bool) -> io::Result<()> {
        if hold {
            if self.raw.is_none() {
                self.raw = Some(RawModeGuard::acquire()?);
                debug!("Raw mode on");
            }
            self.raw_depth += 1;
        } else {
            self.raw_depth = self.raw_depth.saturating_sub(1);
            if self.raw_depth == 0 && self.raw.take().is_some() {
                debug!("Raw mode off");
            }
        }
        Ok(())
    }
}
