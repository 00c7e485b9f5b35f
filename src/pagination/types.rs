//! Pagination types and traits
//!
//! Defines the abstractions shared by the controller and the list fetchers.

use crate::error::Error;
use crate::http::AbortSignal;
use crate::types::{Cursor, History, PageName};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// One fetched page of rows
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows of this page
    pub rows: Vec<T>,
    /// Cursor for the following page; `None` on the last page
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(rows: Vec<T>, next_cursor: Option<Cursor>) -> Self {
        Self { rows, next_cursor }
    }

    /// Create the last page of a listing
    pub fn last(rows: Vec<T>) -> Self {
        Self::new(rows, None)
    }
}

/// Source of pages for one list view
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Row type produced by this fetcher
    type Row: Clone + Send + Sync + 'static;

    /// Fetch the page after `cursor`, or the first page when `cursor` is `None`
    ///
    /// Implementations should reject with [`Error::Aborted`] once `signal`
    /// fires.
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        limit: u32,
        signal: &AbortSignal,
    ) -> crate::Result<Page<Self::Row>>;
}

#[async_trait]
impl<T: PageFetcher> PageFetcher for Arc<T> {
    type Row = T::Row;

    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        limit: u32,
        signal: &AbortSignal,
    ) -> crate::Result<Page<Self::Row>> {
        (**self).fetch_page(cursor, limit, signal).await
    }
}

/// Where the controller stands in its current cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// History not loaded yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// Last fetch succeeded and its history is durable
    Committed,
    /// Retrying from the last durable history after a failure
    RecoveringOnce,
    /// Retrying from the first page after repeated failures
    RecoveringReset,
    /// Recovery gave up; the error was surfaced
    Failed,
}

impl Phase {
    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Phase::Loading | Phase::RecoveringOnce | Phase::RecoveringReset
        )
    }
}

/// How a pagination cycle ended without a terminal error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Rows were replaced and the history was persisted
    Committed {
        /// Number of rows on the page
        rows: usize,
        /// Whether a further page exists
        has_next: bool,
    },
    /// A newer cycle started before this one settled; its result was dropped
    Superseded,
    /// The fetch was cancelled
    Aborted,
}

impl CycleOutcome {
    /// Whether this cycle committed
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Snapshot of a list view for rendering
#[derive(Debug, Clone, Serialize)]
pub struct PageView<T> {
    /// Page this view belongs to
    pub page_name: PageName,
    /// Rows of the last committed page
    pub rows: Vec<T>,
    /// Cursor of the following page
    pub next: Option<Cursor>,
    /// Current in-memory history
    pub history: Option<History>,
    /// Controller phase
    pub phase: Phase,
}

impl<T> PageView<T> {
    /// Whether a "next page" affordance should be offered
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// One-based page number implied by the history
    pub fn page_number(&self) -> usize {
        self.history.as_ref().map_or(1, |h| h.len() + 1)
    }

    /// Whether the committed page is empty and should show an empty-state message
    pub fn is_empty_state(&self) -> bool {
        self.phase == Phase::Committed && self.rows.is_empty()
    }
}

/// Receives failures the controller recovers from or gives up on
pub trait ErrorReporter: Send + Sync {
    /// Report one failed fetch
    fn report(&self, page: PageName, error: &Error);
}

/// Reports failures as `tracing` error events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, page: PageName, error: &Error) {
        error!(page = %page, status = ?error.status(), "Failed to load page: {error}");
    }
}
