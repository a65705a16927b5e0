//! File-backed credential store
//!
//! Records live in a single JSON array on disk. The whole file is loaded on
//! open and rewritten on every insert through a temp file and a rename, so a
//! crash mid-write leaves the previous contents intact.

use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::auth::credentials::CredentialRecord;
use crate::error::StoreError;
use crate::storage::store::CredentialStore;

pub struct FileCredentialStore {
    path: PathBuf,
    records: RwLock<BTreeMap<String, CredentialRecord>>,
}

impl FileCredentialStore {
    /// Opens the store at `path`, creating parent directories if needed.
    ///
    /// A missing file is treated as an empty store; it is created on the
    /// first insert.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let records = if path.exists() {
            load_records(&path)?
        } else {
            BTreeMap::new()
        };

        info!(
            "Opened credential store {} ({} records)",
            path.display(),
            records.len()
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }
}

fn load_records(path: &Path) -> Result<BTreeMap<String, CredentialRecord>, StoreError> {
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let list: Vec<CredentialRecord> = serde_json::from_str(&raw)?;
    let mut records = BTreeMap::new();
    for record in list {
        let username = record.username().to_string();
        if records.insert(username.clone(), record).is_some() {
            return Err(StoreError::DuplicateUsername(username));
        }
    }
    Ok(records)
}

fn write_records<'a>(
    path: &Path,
    records: impl Iterator<Item = &'a CredentialRecord>,
) -> Result<(), StoreError> {
    let list: Vec<&CredentialRecord> = records.collect();
    let json = serde_json::to_string_pretty(&list)?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            warn!("Failed to remove {}: {}", temp_path.display(), cleanup);
        }
        return Err(e.into());
    }
    Ok(())
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("credential store lock poisoned".into())
}

impl CredentialStore for FileCredentialStore {
    fn insert(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.contains_key(record.username()) {
            return Err(StoreError::DuplicateUsername(record.username().to_string()));
        }

        // Persist first; the in-memory view only changes once the file does.
        write_records(
            &self.path,
            records.values().chain(std::iter::once(&record)),
        )?;

        debug!("Persisted credential record for '{}'", record.username());
        records.insert(record.username().to_string(), record);
        Ok(())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(username).cloned())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        {
            let store = FileCredentialStore::open(&path).unwrap();
            assert!(store.is_empty().unwrap());
            store.insert(CredentialRecord::new("alice", "secret1")).unwrap();
        }

        let reopened = FileCredentialStore::open(&path).unwrap();
        assert_eq!(reopened.len().unwrap(), 1);
        let alice = reopened.find_by_username("alice").unwrap().unwrap();
        assert!(alice.matches_secret("secret1"));
    }

    #[test]
    fn duplicate_insert_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::open(&path).unwrap();
        store.insert(CredentialRecord::new("alice", "first")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = store.insert(CredentialRecord::new("alice", "second")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUsername(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileCredentialStore::open(&path).err().unwrap();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::open(&path).unwrap();

        // A non-empty directory at the target path makes the rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let err = store.insert(CredentialRecord::new("alice", "secret1")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.len().unwrap(), 0);
        assert_eq!(store.find_by_username("alice").unwrap(), None);
    }
}
