//! # TUI Components
//!
//! Display pieces that turn domain data into terminal lines. They take their
//! data as parameters and do no I/O, so they can be tested as plain strings.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! └── record_table.rs  (Bordered grid of stored records)
//! ```

pub mod record_table;
pub use record_table::{TableBorders, render_records};
