//! In-memory credential store
//!
//! Keeps records in a `HashMap` behind a `RwLock`. Used for tests and for
//! the `memory` store backend.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use crate::auth::credentials::CredentialRecord;
use crate::error::StoreError;
use crate::storage::store::CredentialStore;

#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `records`. Later duplicates are rejected.
    pub fn with_records(
        records: impl IntoIterator<Item = CredentialRecord>,
    ) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("credential store lock poisoned".into())
}

impl CredentialStore for InMemoryCredentialStore {
    fn insert(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        match records.entry(record.username().to_string()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateUsername(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(username).cloned())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }
}
