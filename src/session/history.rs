//! Pagination history persistence
//!
//! Stores one cursor history per list view, namespaced by [`PageName`].

use super::store::KeyValueStore;
use crate::error::Result;
use crate::types::{Cursor, History, PageName};
use std::sync::Arc;
use tracing::debug;

/// Durable owner of every list view's cursor history
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    /// Create a history store over the given session store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrite the stored history for `page`
    pub async fn save(&self, page: PageName, history: &[Cursor]) -> Result<()> {
        let encoded = serde_json::to_string(history)?;
        self.store.set(&page.history_key(), encoded).await
    }

    /// Read the stored history for `page`
    ///
    /// Missing entries and anything that is not a JSON array of strings
    /// read as the empty history.
    pub async fn load(&self, page: PageName) -> History {
        let Some(raw) = self.store.get(&page.history_key()).await else {
            return History::new();
        };

        match serde_json::from_str::<History>(&raw) {
            Ok(history) => history,
            Err(e) => {
                debug!(page = %page, "Discarding unreadable pagination history: {e}");
                History::new()
            }
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore").finish_non_exhaustive()
    }
}
