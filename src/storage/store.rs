//! Credential store port
//!
//! The pipeline only needs two operations from persistence: insert a record
//! and find one by username. Backends implement [`CredentialStore`].

use std::sync::Arc;

use crate::auth::credentials::CredentialRecord;
use crate::error::StoreError;

/// Durable username-keyed record storage.
///
/// Implementations must reject an insert whose username is already stored
/// with [`StoreError::DuplicateUsername`], so uniqueness holds even when two
/// registrations race past the pipeline's own existence check.
pub trait CredentialStore: Send + Sync {
    fn insert(&self, record: CredentialRecord) -> Result<(), StoreError>;

    fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, StoreError>;

    /// Number of stored records.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// The store as seen by the pipeline: either wired up or not yet.
#[derive(Clone, Default)]
pub enum StoreHandle {
    #[default]
    Uninitialized,
    Ready(Arc<dyn CredentialStore>),
}

impl StoreHandle {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        StoreHandle::Ready(store)
    }

    /// Borrows the store, or reports it as unavailable.
    pub fn get(&self) -> Result<&dyn CredentialStore, StoreError> {
        match self {
            StoreHandle::Ready(store) => Ok(store.as_ref()),
            StoreHandle::Uninitialized => Err(StoreError::Unavailable(
                "credential store not initialized".into(),
            )),
        }
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreHandle::Uninitialized => f.write_str("StoreHandle::Uninitialized"),
            StoreHandle::Ready(_) => f.write_str("StoreHandle::Ready"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryCredentialStore;

    #[test]
    fn uninitialized_handle_is_unavailable() {
        let handle = StoreHandle::default();
        assert!(matches!(handle.get(), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn ready_handle_exposes_store() {
        let handle = StoreHandle::new(Arc::new(InMemoryCredentialStore::new()));
        assert!(handle.get().unwrap().is_empty().unwrap());
    }
}
