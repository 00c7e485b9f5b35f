//! Session-scoped lookup cache
//!
//! Lookup lists that rarely change are kept in the session so repeated
//! commands do not call the remote API again.

use super::store::KeyValueStore;
use crate::error::Result;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

const MATERIAL_NAMES_KEY: &str = "lookup/material-names";

/// Cache of lookup lists stored in the session
#[derive(Clone)]
pub struct LookupCache {
    store: Arc<dyn KeyValueStore>,
}

impl LookupCache {
    /// Create a cache over the given session store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Cached material names, if present and readable
    pub async fn cached_material_names(&self) -> Option<Vec<String>> {
        let raw = self.store.get(MATERIAL_NAMES_KEY).await?;
        serde_json::from_str(&raw)
            .map_err(|e| debug!("Discarding unreadable material cache: {e}"))
            .ok()
    }

    /// Material names from the session, fetching and caching them on a miss
    pub async fn material_names<F, Fut>(&self, fetch: F) -> Result<Vec<String>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>>>,
    {
        if let Some(names) = self.cached_material_names().await {
            debug!(count = names.len(), "Material names served from session");
            return Ok(names);
        }

        let names = fetch().await?;
        self.store
            .set(MATERIAL_NAMES_KEY, serde_json::to_string(&names)?)
            .await?;
        Ok(names)
    }

    /// Drop the cached material names
    pub async fn invalidate_material_names(&self) -> Result<()> {
        self.store.remove(MATERIAL_NAMES_KEY).await
    }
}
