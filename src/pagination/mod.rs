//! Pagination module
//!
//! Cursor-based paging shared by every list view.
//!
//! # Overview
//!
//! The pagination module provides:
//! - `PaginationController` - Fetch-per-history-change with commit and recovery
//! - `PageFetcher` - Source of pages for one list view
//! - `extract_after_cursor` / `next_cursor` - Next-page cursor from a `Link` header

mod controller;
mod cursor;
mod types;

pub use controller::PaginationController;
pub use cursor::{extract_after_cursor, next_cursor};
pub use types::{
    CycleOutcome, ErrorReporter, Page, PageFetcher, PageView, Phase, TracingReporter,
};
