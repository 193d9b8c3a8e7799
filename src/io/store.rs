use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use crate::io::lock::{FileLock, LockError};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry, atomic_write};
use crate::model::{DateKey, DayRecord};

/// Error type for store I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize data: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] LockError),
}

/// A flat key-value medium holding one JSON value per storage key.
pub trait Medium {
    fn get_item(&self, key: &str) -> Option<Value>;
    fn set_item(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
    fn keys(&self) -> Vec<String>;

    /// Directory for the recovery log, if this medium lives on disk
    fn log_dir(&self) -> Option<&Path> {
        None
    }
}

// ---------------------------------------------------------------------------
// In-memory medium
// ---------------------------------------------------------------------------

/// Medium that never touches disk. Used for headless sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    items: IndexMap<String, Value>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value, bypassing record encoding
    pub fn insert_raw(&mut self, key: &str, value: Value) {
        self.items.insert(key.to_string(), value);
    }
}

impl Medium for MemoryMedium {
    fn get_item(&self, key: &str) -> Option<Value> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// File medium
// ---------------------------------------------------------------------------

/// Medium backed by a single JSON object file.
///
/// Reads are served from memory. Each write takes the advisory lock,
/// re-reads the file so keys written by another process survive, sets the
/// key and writes the whole file back atomically.
#[derive(Debug)]
pub struct FileMedium {
    path: PathBuf,
    log_dir: PathBuf,
    items: IndexMap<String, Value>,
    /// An unreadable file has already been backed up and logged
    corrupt_reported: bool,
}

impl FileMedium {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let log_dir = log_dir_for(path);
        let mut corrupt_reported = false;
        let items = load_items(path, &log_dir, &mut corrupt_reported)?;
        Ok(FileMedium {
            path: path.to_path_buf(),
            log_dir,
            items,
            corrupt_reported,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Medium for FileMedium {
    fn get_item(&self, key: &str) -> Option<Value> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        fs::create_dir_all(&self.log_dir).map_err(|e| StoreError::WriteError {
            path: self.log_dir.clone(),
            source: e,
        })?;
        let _lock = FileLock::acquire_default(&self.path)?;

        let mut items = load_items(&self.path, &self.log_dir, &mut self.corrupt_reported)?;
        items.insert(key.to_string(), value.clone());
        let content = serde_json::to_string_pretty(&items)?;

        if let Err(e) = atomic_write(&self.path, content.as_bytes()) {
            recovery::log_recovery(
                &self.log_dir,
                RecoveryEntry::now(RecoveryCategory::Write, "could not save day")
                    .field("File", self.path.display().to_string())
                    .field("Key", key)
                    .body(value.to_string()),
            );
            return Err(StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            });
        }

        self.items = items;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    fn log_dir(&self) -> Option<&Path> {
        Some(&self.log_dir)
    }
}

/// Directory of the recovery log for the data file at `path`: its parent
pub fn log_dir_for(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Read the data file into a map. A missing file is empty. A file that is not
/// a JSON object is treated as empty; the first time it is seen it is backed
/// up as `<file>.bak` and logged. A failed backup is an error.
fn load_items(
    path: &Path,
    log_dir: &Path,
    corrupt_reported: &mut bool,
) -> Result<IndexMap<String, Value>, StoreError> {
    if !path.exists() {
        return Ok(IndexMap::new());
    }
    let content = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    if content.trim().is_empty() {
        return Ok(IndexMap::new());
    }
    match serde_json::from_str::<IndexMap<String, Value>>(&content) {
        Ok(items) => Ok(items),
        Err(_) if *corrupt_reported => Ok(IndexMap::new()),
        Err(e) => {
            let mut bak_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
            bak_name.push(".bak");
            let bak = path.with_file_name(bak_name);
            fs::copy(path, &bak).map_err(|e| StoreError::WriteError {
                path: bak.clone(),
                source: e,
            })?;
            recovery::log_recovery(
                log_dir,
                RecoveryEntry::now(RecoveryCategory::Corrupt, "unreadable data file")
                    .field("File", path.display().to_string())
                    .field("Backup", bak.display().to_string())
                    .field("Error", e.to_string())
                    .body(content),
            );
            *corrupt_reported = true;
            Ok(IndexMap::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Per-date record storage.
///
/// `get` never fails: a date that was never written, or whose stored value
/// does not decode as a [`DayRecord`], yields the empty default record. Undecodable
/// values are reported to the recovery log once per key per process.
pub struct Store {
    medium: Box<dyn Medium>,
    reported: RefCell<HashSet<String>>,
}

impl Store {
    pub fn new(medium: impl Medium + 'static) -> Self {
        Store {
            medium: Box::new(medium),
            reported: RefCell::new(HashSet::new()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::new())
    }

    /// Open (or lazily create) a store backed by the JSON file at `path`.
    /// Malformed records are reported to the recovery log right away.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let store = Self::new(FileMedium::open(path)?);
        store.report_corrupt_keys();
        Ok(store)
    }

    /// Directory holding the recovery log, for disk-backed stores
    pub fn log_dir(&self) -> Option<&Path> {
        self.medium.log_dir()
    }

    pub fn get(&self, key: &DateKey) -> DayRecord {
        let storage_key = key.storage_key();
        let Some(value) = self.medium.get_item(&storage_key) else {
            return DayRecord::default();
        };
        match serde_json::from_value::<DayRecord>(value.clone()) {
            Ok(record) => record,
            Err(e) => {
                self.report_corrupt(&storage_key, &value, &e);
                DayRecord::default()
            }
        }
    }

    /// Overwrite the full record for `key`.
    pub fn put(&mut self, key: &DateKey, record: &DayRecord) -> Result<(), StoreError> {
        let value = serde_json::to_value(record)?;
        let storage_key = key.storage_key();
        self.medium.set_item(&storage_key, value)?;
        self.reported.borrow_mut().remove(&storage_key);
        Ok(())
    }

    pub fn has_data(&self, key: &DateKey) -> bool {
        self.get(key).has_data()
    }

    /// Dates whose record has data, in calendar order
    pub fn dates_with_data(&self) -> Vec<DateKey> {
        let mut dates: Vec<DateKey> = self
            .medium
            .keys()
            .iter()
            .filter_map(|k| DateKey::from_storage_key(k))
            .filter(|d| self.has_data(d))
            .collect();
        dates.sort();
        dates
    }

    /// Storage keys under the `cal_` prefix whose value is not a valid record
    pub fn corrupt_keys(&self) -> Vec<String> {
        self.medium
            .keys()
            .into_iter()
            .filter(|k| DateKey::from_storage_key(k).is_some())
            .filter(|k| {
                self.medium
                    .get_item(k)
                    .is_some_and(|v| serde_json::from_value::<DayRecord>(v).is_err())
            })
            .collect()
    }

    fn report_corrupt_keys(&self) {
        for storage_key in self.corrupt_keys() {
            if let Some(value) = self.medium.get_item(&storage_key)
                && let Err(e) = serde_json::from_value::<DayRecord>(value.clone())
            {
                self.report_corrupt(&storage_key, &value, &e);
            }
        }
    }

    fn report_corrupt(&self, storage_key: &str, value: &Value, err: &serde_json::Error) {
        if !self.reported.borrow_mut().insert(storage_key.to_string()) {
            return;
        }
        if let Some(dir) = self.medium.log_dir() {
            recovery::log_recovery(
                dir,
                RecoveryEntry::now(RecoveryCategory::Corrupt, "malformed record")
                    .field("Key", storage_key)
                    .field("Error", err.to_string())
                    .body(value.to_string()),
            );
        }
    }
}
