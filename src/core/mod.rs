//! # Core Application Logic
//!
//! Records, the rules they must satisfy, where they are stored, and how the
//! program is configured. Nothing here draws to the terminal.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Record + rules       │
//!                    │  • RecordStore (JSON)   │
//!                    │  • Config resolution    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │(crossterm) │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`]: `Record`, `Field` rules and `RecordError`
//! - [`store`]: `RecordStore`, the JSON file behind the records
//! - [`config`]: `~/.roster/config.toml` and the override hierarchy

pub mod config;
pub mod record;
pub mod store;
