//! # Record Store
//!
//! Keeps every record in memory and mirrors them to a single JSON array on
//! disk. The file is read in full when the store is opened and rewritten in
//! full on `save()`.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::core::record::Record;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Json(e) => write!(f, "store JSON error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for io::Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Io(e) => e,
            StoreError::Json(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
    created: bool,
}

impl RecordStore {
    /// Open the store at `path`, creating an empty file if none exists.
    ///
    /// An empty file holds no records. Anything else must be a JSON array of
    /// records, or `StoreError::Json` is returned.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let created = !path.exists();
        if created {
            info!("No store at {}, creating it", path.display());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(StoreError::Io)?;
            }
            fs::File::create(&path).map_err(StoreError::Io)?;
        }

        let contents = fs::read_to_string(&path).map_err(StoreError::Io)?;
        let records: Vec<Record> = if contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&contents).map_err(StoreError::Json)?
        };
        info!("Loaded {} records from {}", records.len(), path.display());

        Ok(Self {
            path,
            records,
            created,
        })
    }

    /// True if `open()` had to create the file.
    pub fn was_created(&self) -> bool {
        self.created
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, record: Record) {
        debug!("Adding record for {}", record.name);
        self.records.push(record);
    }

    /// Rewrite the whole file with the current records.
    pub fn save(&self) -> Result<(), StoreError> {
        atomic_write_json(&self.path, &self.records).map_err(StoreError::Io)?;
        info!("Saved {} records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, age: u32) -> Record {
        Record {
            name: name.to_string(),
            age,
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[test]
    fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let store = RecordStore::open(&path).unwrap();
        assert!(store.was_created());
        assert!(store.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets").join("users.json");

        let store = RecordStore::open(&path).unwrap();
        assert!(store.was_created());
        assert!(path.exists());
    }

    #[test]
    fn test_open_existing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "[]").unwrap();

        let store = RecordStore::open(&path).unwrap();
        assert!(!store.was_created());
        assert!(store.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let mut store = RecordStore::open(&path).unwrap();
        store.add(record("Alice", 30));
        store.add(record("Bob", 18));
        store.add(record("Carol", 50));
        store.save().unwrap();

        let reopened = RecordStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 3);
        assert_eq!(reopened.records(), store.records());
        assert_eq!(reopened.records()[0].name, "Alice");
        assert_eq!(reopened.records()[2].name, "Carol");
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let mut store = RecordStore::open(&path).unwrap();
        store.add(record("Alice", 30));
        store.save().unwrap();

        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_reads_pascal_case_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(
            &path,
            r#"[{"Name":"Niels","Age":42,"Email":"niels@example.dk"}]"#,
        )
        .unwrap();

        let store = RecordStore::open(&path).unwrap();
        assert_eq!(store.records()[0].age, 42);
        assert_eq!(store.records()[0].email, "niels@example.dk");
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "{not json").unwrap();

        let result = RecordStore::open(&path);
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
