//! Pagination controller
//!
//! Drives one list view: every history change starts a cycle that fetches the
//! page named by the last cursor, commits rows and history on success, and
//! walks a bounded recovery policy on failure.
//!
//! Recovery, per cycle:
//! 1. First failure: reload the durable history and retry from it. When it
//!    differs from the failed history this rolls back to the last good page.
//! 2. Later failure with a durable history equal to the failed one: persist
//!    and retry the empty history (page 1).
//! 3. Later failure on an empty durable history: give up and return the error.
//!
//! Only the most recently started cycle may touch state or the store.

use super::types::{CycleOutcome, ErrorReporter, Page, PageFetcher, PageView, Phase, TracingReporter};
use crate::error::Result;
use crate::http::{AbortController, AbortSignal};
use crate::session::HistoryStore;
use crate::types::{Cursor, History, PageName, PAGE_SIZE};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Mutable view state guarded by the controller lock
struct ViewState<R> {
    phase: Phase,
    rows: Vec<R>,
    next: Option<Cursor>,
    history: Option<History>,
    cycle: u64,
    abort: Option<AbortController>,
}

/// Identity of one started cycle
struct CycleTicket {
    id: u64,
    signal: AbortSignal,
}

/// Result of a recovery step
enum Recovery {
    Retry(History),
    GiveUp,
    Superseded,
}

/// Cursor pagination with durable history and failure recovery
pub struct PaginationController<F: PageFetcher> {
    page_name: PageName,
    fetcher: F,
    histories: HistoryStore,
    reporter: Arc<dyn ErrorReporter>,
    state: RwLock<ViewState<F::Row>>,
}

impl<F: PageFetcher> PaginationController<F> {
    /// Create a controller for `page_name`, reporting failures through `tracing`
    pub fn new(page_name: PageName, fetcher: F, histories: HistoryStore) -> Self {
        Self {
            page_name,
            fetcher,
            histories,
            reporter: Arc::new(TracingReporter),
            state: RwLock::new(ViewState {
                phase: Phase::Idle,
                rows: Vec::new(),
                next: None,
                history: None,
                cycle: 0,
                abort: None,
            }),
        }
    }

    /// Replace the error reporter
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Page this controller drives
    pub fn page_name(&self) -> PageName {
        self.page_name
    }

    /// Load the durable history and fetch the page it names
    pub async fn mount(&self) -> Result<CycleOutcome> {
        let history = self.histories.load(self.page_name).await;
        debug!(page = %self.page_name, depth = history.len(), "Mounting list view");
        self.set_history(history).await
    }

    /// Move one page forward
    ///
    /// Returns `None` without fetching when no next cursor is known.
    pub async fn advance(&self) -> Result<Option<CycleOutcome>> {
        let target = {
            let state = self.state.read().await;
            let Some(next) = state.next.clone() else {
                return Ok(None);
            };
            let mut history = state.history.clone().unwrap_or_default();
            history.push(next);
            history
        };

        self.set_history(target).await.map(Some)
    }

    /// Return to the first page
    pub async fn reset(&self) -> Result<CycleOutcome> {
        self.set_history(History::new()).await
    }

    /// Start a pagination cycle for `history`
    ///
    /// Any cycle still in flight is aborted and its result discarded.
    pub async fn set_history(&self, history: History) -> Result<CycleOutcome> {
        let ticket = self.begin_cycle(history.clone()).await;
        let mut history = history;
        let mut failures = 0u32;

        loop {
            let cursor = history.last().map(String::as_str);
            let result = self
                .fetcher
                .fetch_page(cursor, PAGE_SIZE, &ticket.signal)
                .await;

            let error = match result {
                Ok(page) => return self.commit(&ticket, &history, page).await,
                Err(e) if e.is_aborted() => {
                    debug!(page = %self.page_name, "Page fetch aborted");
                    return Ok(CycleOutcome::Aborted);
                }
                Err(e) => e,
            };

            if !self.is_current(&ticket).await {
                debug!(page = %self.page_name, "Ignoring failure of superseded cycle");
                return Ok(CycleOutcome::Superseded);
            }

            failures += 1;
            self.reporter.report(self.page_name, &error);

            match self.recover(&ticket, &history, failures).await? {
                Recovery::Retry(next) => history = next,
                Recovery::GiveUp => return Err(error),
                Recovery::Superseded => return Ok(CycleOutcome::Superseded),
            }
        }
    }

    /// Cancel the in-flight fetch and invalidate the current cycle
    pub async fn unmount(&self) {
        let mut state = self.state.write().await;
        state.cycle += 1;
        if let Some(abort) = state.abort.take() {
            abort.abort();
        }
        if state.phase.is_loading() {
            state.phase = Phase::Idle;
        }
    }

    /// Rows of the last committed page
    pub async fn rows(&self) -> Vec<F::Row> {
        self.state.read().await.rows.clone()
    }

    /// Cursor of the following page, if any
    pub async fn next(&self) -> Option<Cursor> {
        self.state.read().await.next.clone()
    }

    /// Current in-memory history; `None` before the first cycle
    pub async fn history(&self) -> Option<History> {
        self.state.read().await.history.clone()
    }

    /// Current phase
    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase
    }

    /// Whether a fetch is in flight
    pub async fn is_loading(&self) -> bool {
        self.phase().await.is_loading()
    }

    /// Snapshot for rendering
    pub async fn view(&self) -> PageView<F::Row> {
        let state = self.state.read().await;
        PageView {
            page_name: self.page_name,
            rows: state.rows.clone(),
            next: state.next.clone(),
            history: state.history.clone(),
            phase: state.phase,
        }
    }

    async fn begin_cycle(&self, history: History) -> CycleTicket {
        let mut state = self.state.write().await;
        state.cycle += 1;
        if let Some(previous) = state.abort.take() {
            previous.abort();
        }

        let (abort, signal) = AbortController::new();
        state.abort = Some(abort);
        state.history = Some(history);
        state.phase = Phase::Loading;

        CycleTicket {
            id: state.cycle,
            signal,
        }
    }

    async fn is_current(&self, ticket: &CycleTicket) -> bool {
        self.state.read().await.cycle == ticket.id
    }

    async fn commit(
        &self,
        ticket: &CycleTicket,
        history: &[Cursor],
        page: Page<F::Row>,
    ) -> Result<CycleOutcome> {
        let mut state = self.state.write().await;
        if state.cycle != ticket.id {
            debug!(page = %self.page_name, "Discarding page of superseded cycle");
            return Ok(CycleOutcome::Superseded);
        }

        if let Err(e) = self.histories.save(self.page_name, history).await {
            state.phase = Phase::Failed;
            return Err(e);
        }

        let outcome = CycleOutcome::Committed {
            rows: page.rows.len(),
            has_next: page.next_cursor.is_some(),
        };
        state.rows = page.rows;
        state.next = page.next_cursor;
        state.history = Some(history.to_vec());
        state.phase = Phase::Committed;
        state.abort = None;

        debug!(page = %self.page_name, depth = history.len(), ?outcome, "Page committed");
        Ok(outcome)
    }

    async fn recover(
        &self,
        ticket: &CycleTicket,
        failed: &[Cursor],
        failures: u32,
    ) -> Result<Recovery> {
        let mut state = self.state.write().await;
        if state.cycle != ticket.id {
            return Ok(Recovery::Superseded);
        }

        let durable = self.histories.load(self.page_name).await;

        if failures == 1 || durable != failed {
            info!(
                page = %self.page_name,
                failed_depth = failed.len(),
                durable_depth = durable.len(),
                "Retrying from last durable history"
            );
            state.phase = Phase::RecoveringOnce;
            state.history = Some(durable.clone());
            return Ok(Recovery::Retry(durable));
        }

        // The next cursor belongs to the last committed page, not to `[]`
        state.next = None;

        if durable.is_empty() {
            state.phase = Phase::Failed;
            state.abort = None;
            return Ok(Recovery::GiveUp);
        }

        warn!(page = %self.page_name, "Repeated failure, returning to the first page");
        if let Err(e) = self.histories.save(self.page_name, &[]).await {
            state.phase = Phase::Failed;
            return Err(e);
        }
        state.phase = Phase::RecoveringReset;
        state.history = Some(History::new());
        Ok(Recovery::Retry(History::new()))
    }
}

impl<F: PageFetcher> std::fmt::Debug for PaginationController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("page_name", &self.page_name)
            .finish_non_exhaustive()
    }
}
