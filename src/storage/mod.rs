//! Credential storage
//!
//! The store port consumed by the auth pipeline and its backends.

pub mod filesystem;
pub mod memory;
pub mod store;

pub use filesystem::FileCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use store::{CredentialStore, StoreHandle};

use log::info;
use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::StoreError;

/// Builds the configured backend and wraps it in a ready handle.
pub fn open_store(config: &StoreConfig) -> Result<StoreHandle, StoreError> {
    let store: Arc<dyn CredentialStore> = match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory credential store");
            Arc::new(InMemoryCredentialStore::new())
        }
        StoreBackend::File => {
            let path = config.path.as_deref().ok_or_else(|| {
                StoreError::Unavailable("file store configured without a path".into())
            })?;
            Arc::new(FileCredentialStore::open(path)?)
        }
    };
    Ok(StoreHandle::new(store))
}
