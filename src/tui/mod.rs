//! # TUI Adapter
//!
//! The terminal-facing layer. Prompts, menus and table output all go
//! through a [`Console`] handle; [`run`] wires the real terminal to the
//! record store and drives the main menu.
//!
//! ```text
//! run()
//! ├── RecordStore::open        (creates the file if missing)
//! ├── session()                main menu loop
//! │   ├── Add records   → form::add_records   (validated prompts)
//! │   ├── Show records  → components::render_records
//! │   └── Save and quit
//! └── RecordStore::save        (also after Ctrl+C)
//! ```
//!
//! Terminal I/O lives behind `console` and `event`; everything else talks
//! to the [`Console`] trait.

pub mod components;
pub mod console;
pub mod event;
pub mod form;
pub mod menu;
pub mod prompt;

use std::io;

use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::store::RecordStore;
use crate::tui::components::{TableBorders, render_records};
use crate::tui::console::{Console, CrosstermConsole};
use crate::tui::menu::{Menu, MenuEntry};
use crate::tui::prompt::PromptStyle;

pub const MENU_TITLE: &str = ">> Pick an action (arrows + Enter)";

/// What the main menu can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    AddRecords,
    ShowRecords,
    SaveAndQuit,
}

pub fn main_menu() -> Menu<MainAction> {
    Menu::new(vec![
        MenuEntry::new("Add records", MainAction::AddRecords),
        MenuEntry::new("Show records", MainAction::ShowRecords),
        MenuEntry::new("Save and quit", MainAction::SaveAndQuit),
    ])
}

/// Main menu loop. Returns when the user picks *Save and quit*.
///
/// Saving is left to the caller so it also happens when this fails.
pub fn session<C: Console + ?Sized>(
    console: &mut C,
    store: &mut RecordStore,
    config: &ResolvedConfig,
) -> io::Result<()> {
    let menu = main_menu();
    let borders = TableBorders::default();
    let style = PromptStyle::from_settings(&config.prompt);

    loop {
        console.write_line(MENU_TITLE)?;
        let Some(action) = menu.pick(console)? else {
            return Ok(());
        };
        info!("Main menu: {:?}", action);

        match action {
            MainAction::AddRecords => {
                let added =
                    form::add_records(console, store, &style, config.retry_invalid)?;
                info!("Added {} records ({} total)", added, store.len());
            }
            MainAction::ShowRecords => {
                for line in render_records(store.records(), &borders) {
                    console.write_line(&line)?;
                }
            }
            MainAction::SaveAndQuit => return Ok(()),
        }
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let mut store = RecordStore::open(&config.store_path)?;
    let mut console = CrosstermConsole::new();

    if store.was_created() {
        let name = store.path().display().to_string();
        console.write_line(&format!("Could not find {name} >> Creating {name}"))?;
    }

    let result = session(&mut console, &mut store, &config);

    // Save on exit, even if the session was interrupted
    store.save()?;

    match result {
        Err(e) if e.kind() == io::ErrorKind::Interrupted => {
            warn!("Session interrupted, records saved");
            console.newline()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedConsole, keys};
    use crate::core::config::PromptSettings;
    use crate::tui::event::Key;

    fn config(dir: &tempfile::TempDir) -> ResolvedConfig {
        ResolvedConfig {
            store_path: dir.path().join("users.json"),
            retry_invalid: false,
            prompt: PromptSettings::default(),
        }
    }

    #[test]
    fn test_session_add_then_quit() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let mut store = RecordStore::open(&config.store_path).unwrap();

        let mut script = keys("\n");
        script.extend(keys("yJohn Smith\n30\njohn@example.com\nn"));
        script.extend([Key::Down, Key::Down, Key::Enter]);
        let mut console = ScriptedConsole::new(script);

        session(&mut console, &mut store, &config).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(console.keys_left(), 0);
    }

    #[test]
    fn test_session_show_records() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let mut store = RecordStore::open(&config.store_path).unwrap();
        store.add(crate::core::record::Record {
            name: "Ada".to_string(),
            age: 36,
            email: "ada@example.com".to_string(),
        });

        let script = vec![Key::Down, Key::Enter, Key::Down, Key::Down, Key::Enter];
        let mut console = ScriptedConsole::new(script);

        session(&mut console, &mut store, &config).unwrap();
        let screen = console.screen();
        assert!(screen.iter().any(|l| l.contains("│ Ada  │ 36  │ ada@example.com │")));
    }

    #[test]
    fn test_main_menu_entries() {
        let menu = main_menu();
        assert_eq!(menu.len(), 3);
    }
}
