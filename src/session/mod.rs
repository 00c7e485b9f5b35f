//! Session state module
//!
//! Holds everything that lives for one console session: pagination
//! histories, operator identity and cached lookup lists.
//!
//! # Overview
//!
//! The session module provides:
//! - `KeyValueStore` - Storage abstraction with memory and file implementations
//! - `HistoryStore` - Per-page cursor history persistence
//! - `Identity` - Logged-in operator and access token
//! - `LookupCache` - Cached lookup lists

mod cache;
mod history;
mod identity;
mod store;

pub use cache::LookupCache;
pub use history::HistoryStore;
pub use identity::Identity;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

/// One console session over a shared key-value store
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Create a session over any store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Create a session that is not persisted
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Open a session persisted at `path`
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = FileStore::open(path).await?;
        Ok(Self::new(Arc::new(store)))
    }

    /// Underlying store
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// Pagination histories of this session
    pub fn histories(&self) -> HistoryStore {
        HistoryStore::new(self.store())
    }

    /// Operator identity of this session
    pub fn identity(&self) -> Identity {
        Identity::new(self.store())
    }

    /// Lookup cache of this session
    pub fn cache(&self) -> LookupCache {
        LookupCache::new(self.store())
    }
}
