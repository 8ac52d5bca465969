//! The storage slot and the timestamp store built on top of it.
//!
//! [`SlotStorage`] is a string key-value primitive in the shape of a browser's
//! local storage. [`TimestampStore`] owns one slot of it, under
//! [`STORAGE_KEY`], and is the only code that reads or writes the recorded
//! moment.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::constants::STORAGE_KEY;
use crate::utils::private_path;

/// String key-value storage that survives restarts.
///
/// A single `set_item` is atomic: readers see either the old or the new value.
pub trait SlotStorage {
    /// Value stored under `key`, or `None` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`.
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SlotStorage for FileSlotStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", private_path(&path)))?;
        Ok(Some(value))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!(
                "Failed to create storage directory {}",
                private_path(&self.dir)
            )
        })?;

        let path = self.item_path(key);

        // Write beside the target, then rename over it
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).with_context(|| {
            format!(
                "Failed to create temporary file in {}",
                private_path(&self.dir)
            )
        })?;
        tmp.write_all(value.as_bytes())
            .and_then(|_| tmp.flush())
            .with_context(|| format!("Failed to write {}", private_path(&path)))?;
        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace {}", private_path(&path)))?;

        Ok(())
    }
}

/// In-process storage; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    items: HashMap<String, String>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one raw value.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        Self { items }
    }
}

impl SlotStorage for MemorySlotStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Owner of the single "last locked" slot.
#[derive(Debug, Clone)]
pub struct TimestampStore<S: SlotStorage> {
    storage: S,
}

impl<S: SlotStorage> TimestampStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The recorded moment, or `None` if nothing usable is stored.
    ///
    /// An empty value counts as absent. A value that is not an ISO-8601
    /// date-time also counts as absent, with a warning, so a damaged record
    /// never blocks recording a new one.
    pub fn read(&self) -> Result<Option<DateTime<Local>>> {
        let Some(raw) = self.storage.get_item(STORAGE_KEY)? else {
            return Ok(None);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match DateTime::parse_from_rfc3339(trimmed) {
            Ok(moment) => Ok(Some(moment.with_timezone(&Local))),
            Err(e) => {
                log_pipe!();
                log_warning!("Ignoring unreadable lock record '{}': {}", trimmed, e);
                Ok(None)
            }
        }
    }

    /// Overwrite the slot with `value` as an ISO-8601 UTC string.
    pub fn write(&mut self, value: DateTime<Local>) -> Result<()> {
        let serialized = serialize_timestamp(value);
        self.storage.set_item(STORAGE_KEY, &serialized)
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-03-05T00:07:22.000Z`.
pub fn serialize_timestamp(value: DateTime<Local>) -> String {
    value
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use tempfile::tempdir;

    fn moment() -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 3, 5)
                    .unwrap()
                    .and_hms_opt(9, 7, 22)
                    .unwrap(),
            )
            .earliest()
            .unwrap()
    }

    #[test]
    fn test_serialize_is_utc_millis() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 5, 0, 7, 22).unwrap();
        let serialized = serialize_timestamp(utc.with_timezone(&Local));
        assert_eq!(serialized, "2024-03-05T00:07:22.000Z");
    }

    #[test]
    fn test_empty_store_reads_none() {
        let store = TimestampStore::new(MemorySlotStorage::new());
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let mut store = TimestampStore::new(MemorySlotStorage::new());
        store.write(moment()).unwrap();
        assert_eq!(store.read().unwrap(), Some(moment()));
    }

    #[test]
    fn test_write_overwrites() {
        let mut store = TimestampStore::new(MemorySlotStorage::new());
        store.write(moment()).unwrap();
        let later = moment() + chrono::Duration::hours(5);
        store.write(later).unwrap();
        assert_eq!(store.read().unwrap(), Some(later));
    }

    #[test]
    fn test_empty_value_reads_none() {
        let store = TimestampStore::new(MemorySlotStorage::with_item(STORAGE_KEY, "  \n"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_reads_none() {
        let store = TimestampStore::new(MemorySlotStorage::with_item(STORAGE_KEY, "yesterday"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_foreign_offset_is_accepted() {
        let store = TimestampStore::new(MemorySlotStorage::with_item(
            STORAGE_KEY,
            "2024-03-05T09:07:22+09:00",
        ));
        let read = store.read().unwrap().unwrap();
        assert_eq!(read.naive_utc().to_string(), "2024-03-05 00:07:22");
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempdir().unwrap();
        let slot_dir = dir.path().join("state").join("default");
        let mut store = TimestampStore::new(FileSlotStorage::new(&slot_dir));

        assert_eq!(store.read().unwrap(), None);
        store.write(moment()).unwrap();

        let raw = fs::read_to_string(slot_dir.join(STORAGE_KEY)).unwrap();
        assert_eq!(raw, serialize_timestamp(moment()));
        assert_eq!(store.read().unwrap(), Some(moment()));

        // A second handle on the same directory sees the record
        let reopened = TimestampStore::new(FileSlotStorage::new(&slot_dir));
        assert_eq!(reopened.read().unwrap(), Some(moment()));
    }

    #[test]
    fn test_file_storage_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let mut storage = FileSlotStorage::new(dir.path());
        storage.set_item(STORAGE_KEY, "a").unwrap();
        storage.set_item(STORAGE_KEY, "b").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(storage.get_item(STORAGE_KEY).unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_file_storage_unwritable_dir_errors() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut storage = FileSlotStorage::new(blocker.join("slot"));
        let err = storage.set_item(STORAGE_KEY, "x").unwrap_err();
        assert!(err.to_string().contains("Failed to create storage directory"));
    }
}
