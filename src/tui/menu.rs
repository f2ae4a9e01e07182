//! # Menu Picker
//!
//! A cursor-driven menu: labels are printed one per row and the user walks
//! the terminal cursor over them with the arrow keys, confirming with Enter.
//!
//! Entries are declared up front as `(label, action)` pairs:
//!
//! ```rust,ignore
//! let menu = Menu::new(vec![
//!     MenuEntry::new("Add records", MainAction::Add),
//!     MenuEntry::new("Save and quit", MainAction::Quit),
//! ]);
//! let action = menu.pick(&mut console)?;
//! ```

use std::io;

use log::debug;

use crate::tui::console::{Console, Point, RawScope};
use crate::tui::event::{Key, interrupted};

impl Point {
    /// Move one cell in the direction of an arrow key, staying inside the
    /// inclusive rectangle `[min, max]`. Other keys leave the point as is.
    pub fn step(self, key: Key, min: Point, max: Point) -> Point {
        let mut next = self;
        match key {
            Key::Up if self.y > min.y => next.y -= 1,
            Key::Down if self.y < max.y => next.y += 1,
            Key::Left if self.x > min.x => next.x -= 1,
            Key::Right if self.x < max.x => next.x += 1,
            _ => {}
        }
        next
    }
}

/// Let the user move the cursor with the arrow keys until Enter.
///
/// Movement starts at the current cursor position and is confined to the
/// rectangle `[min, max]`. Returns where the cursor was when Enter was hit.
pub fn dyn_move<C: Console + ?Sized>(console: &mut C, min: Point, max: Point) -> io::Result<Point> {
    let mut console = RawScope::new(console)?;
    let mut at = console.cursor()?;
    loop {
        match console.read_key()? {
            Key::Enter => return Ok(at),
            Key::Interrupt => return Err(interrupted()),
            key => {
                at = at.step(key, min, max);
                console.move_to(at)?;
            }
        }
    }
}

pub struct MenuEntry<A> {
    pub label: String,
    pub action: A,
}

impl<A> MenuEntry<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

pub struct Menu<A> {
    entries: Vec<MenuEntry<A>>,
}

impl<A> Menu<A> {
    pub fn new(entries: Vec<MenuEntry<A>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Print the menu, let the user pick a row, and return its action.
    ///
    /// The cursor is left on the row below the menu. Returns `None` for an
    /// empty menu.
    pub fn pick<C: Console + ?Sized>(&self, console: &mut C) -> io::Result<Option<&A>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        for entry in &self.entries {
            console.write_line(&entry.label)?;
        }
        // Measure from the bottom: printing may have scrolled the terminal.
        let below = console.cursor()?;
        let rows = self.entries.len() as u16;
        let top = Point::new(below.x, below.y.saturating_sub(rows));
        let bottom = Point::new(top.x, top.y + rows - 1);

        console.move_to(top)?;
        let chosen = dyn_move(console, top, bottom)?;
        console.move_to(below)?;

        let index = usize::from(chosen.y - top.y);
        debug!("Menu pick: row {} ({})", index, self.entries[index].label);
        Ok(Some(&self.entries[index].action))
    }
}
