//! Test utilities shared across the crate.
//!
//! `ScriptedConsole` replays a fixed list of keys and keeps a plain character
//! grid of everything written, so prompts can be driven without a terminal.

use std::collections::VecDeque;
use std::io;

use crossterm::style::Color;

use crate::tui::console::{Console, Point};
use crate::tui::event::Key;

/// Turn text into key presses. `\n` becomes Enter, `\x08` Backspace.
pub fn keys(text: &str) -> Vec<Key> {
    text.chars()
        .map(|c| match c {
            '\n' => Key::Enter,
            '\u{8}' => Key::Backspace,
            c => Key::Char(c),
        })
        .collect()
}

/// A `Console` that reads from a key script and writes to an in-memory grid.
pub struct ScriptedConsole {
    keys: VecDeque<Key>,
    cursor: Point,
    color: Color,
    width: u16,
    rows: Vec<Vec<char>>,
    writes: Vec<(Color, String)>,
    raw_depth: usize,
    raw_entries: usize,
    cooked_reads: usize,
}

impl ScriptedConsole {
    pub fn new(keys: Vec<Key>) -> Self {
        Self::with_width(keys, 80)
    }

    pub fn with_width(keys: Vec<Key>, width: u16) -> Self {
        Self {
            keys: keys.into(),
            cursor: Point::default(),
            color: Color::Reset,
            width,
            rows: Vec::new(),
            writes: Vec::new(),
            raw_depth: 0,
            raw_entries: 0,
            cooked_reads: 0,
        }
    }

    pub fn cursor_at(&self) -> Point {
        self.cursor
    }

    /// Row `y` of the grid with trailing blanks removed.
    pub fn screen_line(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Every non-empty row, in order.
    pub fn screen(&self) -> Vec<String> {
        (0..self.rows.len())
            .map(|y| self.screen_line(y))
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// True if `text` was written in one call while `color` was active.
    pub fn wrote(&self, color: Color, text: &str) -> bool {
        self.writes.iter().any(|(c, t)| *c == color && t == text)
    }

    pub fn keys_left(&self) -> usize {
        self.keys.len()
    }

    pub fn is_raw(&self) -> bool {
        self.raw_depth > 0
    }

    /// How many times raw mode was switched on from cooked mode.
    pub fn raw_entries(&self) -> usize {
        self.raw_entries
    }

    /// Keys read while no raw scope was held.
    pub fn cooked_reads(&self) -> usize {
        self.cooked_reads
    }

    fn put(&mut self, ch: char) {
        let (x, y) = (usize::from(self.cursor.x), usize::from(self.cursor.y));
        if self.rows.len() <= y {
            self.rows.resize(y + 1, Vec::new());
        }
        let row = &mut self.rows[y];
        if row.len() <= x {
            row.resize(x + 1, ' ');
        }
        row[x] = ch;
        self.cursor = self.cursor.advance(1, self.width);
    }
}

impl Console for ScriptedConsole {
    fn read_key(&mut self) -> io::Result<Key> {
        if !self.is_raw() {
            self.cooked_reads += 1;
        }
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }

    fn cursor(&mut self) -> io::Result<Point> {
        Ok(self.cursor)
    }

    fn move_to(&mut self, at: Point) -> io::Result<()> {
        self.cursor = at;
        Ok(())
    }

    fn foreground(&self) -> Color {
        self.color
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        self.color = color;
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.writes.push((self.color, text.to_string()));
        for ch in text.chars() {
            if ch == '\n' {
                self.newline()?;
            } else {
                self.put(ch);
            }
        }
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        self.cursor = Point::new(0, self.cursor.y + 1);
        Ok(())
    }

    fn width(&mut self) -> io::Result<u16> {
        Ok(self.width)
    }

    fn hold_raw(&mut self, hold: bool) -> io::Result<()> {
        if hold {
            if self.raw_depth == 0 {
                self.raw_entries += 1;
            }
            self.raw_depth += 1;
        } else {
            self.raw_depth = self.raw_depth.saturating_sub(1);
        }
        Ok(())
    }
}
