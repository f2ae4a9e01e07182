//! # Records
//!
//! The user record persisted by the store, the rules a record's fields must
//! satisfy, the generic `InvalidInput` rejection handed out by input
//! prompts, and the domain errors it is turned into.
//!
//! ```text
//! field   rule                         parsed as
//! ─────   ──────────────────────────   ─────────
//! Name    ^[A-Za-z\s]+$                String
//! Age     ^(1[89]|[2-4][0-9]|50)$      u32
//! Email   @.*\.                        String
//! ```

use std::fmt;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One stored user. Field names are PascalCase on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub name: String,
    pub age: u32,
    pub email: String,
}

// ============================================================================
// Rules
// ============================================================================

static NAME_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("name rule is a valid regex"));
static AGE_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(1[89]|[2-4][0-9]|50)$").expect("age rule is a valid regex"));
static EMAIL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@.*\.").expect("email rule is a valid regex"));

/// The three fields of a record, in the order they are asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
    Email,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name: ",
            Field::Age => "Age: ",
            Field::Email => "Email: ",
        }
    }

    /// Whether `text` satisfies this field's rule.
    pub fn is_valid(self, text: &str) -> bool {
        match self {
            Field::Name => NAME_RULE.is_match(text),
            Field::Age => AGE_RULE.is_match(text),
            Field::Email => EMAIL_RULE.is_match(text),
        }
    }

    pub fn error(self) -> RecordError {
        match self {
            Field::Name => RecordError::InvalidName,
            Field::Age => RecordError::InvalidAge,
            Field::Email => RecordError::InvalidEmail,
        }
    }

    /// Builds the error adapter for this field.
    ///
    /// With `retry` set the adapter swallows the failure and the prompt asks
    /// again; otherwise the failure becomes this field's `RecordError`.
    pub fn adapter(self, retry: bool) -> impl FnMut(&InvalidInput) -> Option<RecordError> {
        move |input: &InvalidInput| {
            debug!("{:?} rejected {:?}", self, input.text());
            (!retry).then(|| self.error())
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Text that failed a field's rule or did not parse. Carries no domain
/// meaning until an adapter turns it into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput {
    text: String,
}

impl InvalidInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The text that was rejected.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input")
    }
}

impl std::error::Error for InvalidInput {}

/// A field was rejected and the caller chose to abort the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    InvalidName,
    InvalidAge,
    InvalidEmail,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::InvalidName => write!(f, "Invalid name"),
            RecordError::InvalidAge => write!(f, "Invalid age"),
            RecordError::InvalidEmail => write!(f, "Invalid email"),
        }
    }
}

impl std::error::Error for RecordError {}
