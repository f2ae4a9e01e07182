//! # Record Form
//!
//! Asks for a record one field at a time with validated prompts, and runs
//! the "create another?" loop that feeds new records into the store.

use std::io;
use std::str::FromStr;

use log::{info, warn};

use crate::core::record::{Field, Record, RecordError};
use crate::core::store::RecordStore;
use crate::tui::console::Console;
use crate::tui::event::Key;
use crate::tui::prompt::{PromptError, PromptStyle, ask_key, ask_validated};

pub const CREATE_QUESTION: &str = "Create new user? (y/n) ";
pub const AGAIN_MESSAGE: &str = "Another one!";

fn ask_field<T, C>(
    console: &mut C,
    field: Field,
    style: &PromptStyle,
    retry: bool,
) -> Result<T, PromptError<RecordError>>
where
    T: FromStr,
    C: Console + ?Sized,
{
    ask_validated(
        console,
        field.label(),
        style,
        |text| field.is_valid(text),
        field.adapter(retry),
    )
}

/// Ask for name, age and email, in that order.
///
/// # Errors
///
/// The first rejected field's `RecordError` (only when `retry` is off), or
/// a terminal error.
pub fn capture_record<C: Console + ?Sized>(
    console: &mut C,
    style: &PromptStyle,
    retry: bool,
) -> Result<Record, PromptError<RecordError>> {
    let name: String = ask_field(console, Field::Name, style, retry)?;
    let age: u32 = ask_field(console, Field::Age, style, retry)?;
    let email: String = ask_field(console, Field::Email, style, retry)?;
    Ok(Record { name, age, email })
}

/// Keep creating records until the user answers anything but `y`.
///
/// A rejected record is reported and skipped; the loop carries on.
/// "Another one!" closes every round, including the one that declines.
/// Returns how many records were added.
pub fn add_records<C: Console + ?Sized>(
    console: &mut C,
    store: &mut RecordStore,
    style: &PromptStyle,
    retry: bool,
) -> io::Result<usize> {
    let mut added = 0;
    loop {
        let key = ask_key(console, CREATE_QUESTION, style, true)?;
        if !matches!(key, Key::Char('y' | 'Y')) {
            console.write_line(AGAIN_MESSAGE)?;
            break;
        }

        match capture_record(console, style, retry) {
            Ok(record) => {
                info!("Captured record for {}", record.name);
                store.add(record);
                added += 1;
            }
            Err(PromptError::Rejected(e)) => {
                warn!("Record dropped: {}", e);
                console.write_line(&e.to_string())?;
            }
            Err(PromptError::Io(e)) => return Err(e),
        }
        console.write_line(AGAIN_MESSAGE)?;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedConsole, keys};

    fn open_store() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("users.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_capture_record() {
        let mut console = ScriptedConsole::new(keys("John Smith\n30\njohn@example.com\n"));
        let record = capture_record(&mut console, &PromptStyle::default(), false).unwrap();

        assert_eq!(
            record,
            Record {
                name: "John Smith".to_string(),
                age: 30,
                email: "john@example.com".to_string(),
            }
        );
        assert_eq!(
            console.screen(),
            vec![">> Name: John Smith", ">> Age: 30", ">> Email: john@example.com"]
        );
    }

    #[test]
    fn test_underage_raises_age_error() {
        let mut console = ScriptedConsole::new(keys("John Smith\n17\n"));
        let result = capture_record(&mut console, &PromptStyle::default(), false);
        assert!(matches!(
            result,
            Err(PromptError::Rejected(RecordError::InvalidAge))
        ));
    }

    #[test]
    fn test_retry_reprompts_instead_of_failing() {
        let mut console = ScriptedConsole::new(keys("J0hn\nJohn\n17\n18\nnope\nj@x.io\n"));
        let record = capture_record(&mut console, &PromptStyle::default(), true).unwrap();

        assert_eq!(record.name, "John");
        assert_eq!(record.age, 18);
        assert_eq!(record.email, "j@x.io");
        assert_eq!(console.keys_left(), 0);
    }

    #[test]
    fn test_add_records_loop() {
        let (_dir, mut store) = open_store();
        let mut console = ScriptedConsole::new(keys(
            "yAda Lovelace\n36\nada@example.com\nyBob\n99\nn",
        ));

        let added = add_records(&mut console, &mut store, &PromptStyle::default(), false).unwrap();

        assert_eq!(added, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].name, "Ada Lovelace");

        let screen = console.screen();
        assert!(screen.contains(&"Invalid age".to_string()));
        assert_eq!(screen.iter().filter(|l| *l == AGAIN_MESSAGE).count(), 3);
        assert_eq!(
            screen[screen.len() - 2..],
            [">> Create new user? (y/n) n", AGAIN_MESSAGE]
        );
    }

    #[test]
    fn test_add_records_stops_on_other_key() {
        let (_dir, mut store) = open_store();
        let mut console = ScriptedConsole::new(keys("q"));

        let added = add_records(&mut console, &mut store, &PromptStyle::default(), false).unwrap();
        assert_eq!(added, 0);
        assert!(store.is_empty());
        assert_eq!(console.screen(), vec![">> Create new user? (y/n) q", AGAIN_MESSAGE]);
    }

    #[test]
    fn test_add_records_propagates_interrupt() {
        let (_dir, mut store) = open_store();
        let mut script = keys("yJo");
        script.push(Key::Interrupt);
        let mut console = ScriptedConsole::new(script);

        let err = add_records(&mut console, &mut store, &PromptStyle::default(), false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
        assert!(store.is_empty());
    }
}
