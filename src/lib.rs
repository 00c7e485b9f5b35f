// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # CFP Console
//!
//! A command-line console for exchanging carbon footprint (CFP) data along a
//! supply chain through a data-transport API.
//!
//! ## Features
//!
//! - **Resumable list views**: Cursor pagination whose position survives
//!   between invocations in a session file
//! - **Failure recovery**: A failed page rolls back to the last good page, and
//!   repeated failures fall back to page 1
//! - **Cancellation**: Superseded fetches are aborted and their results dropped
//! - **Supply-chain records**: Parts structures, CFP requests and responses,
//!   CFP values with CSV export
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cfp_console::pagination::PaginationController;
//! use cfp_console::remote::{DataTransportClient, ListFetcher, Part};
//! use cfp_console::session::Session;
//! use cfp_console::PageName;
//!
//! #[tokio::main]
//! async fn main() -> cfp_console::Result<()> {
//!     let session = Session::open("/tmp/cfp-session.json").await?;
//!     let operator_id = session.identity().operator_id().await?;
//!     let client = DataTransportClient::from_config(&Default::default(), None)?;
//!
//!     let fetcher: ListFetcher<Part> = ListFetcher::new(client, PageName::Products, operator_id);
//!     let controller = PaginationController::new(PageName::Products, fetcher, session.histories());
//!
//!     controller.mount().await?;
//!     controller.advance().await?;
//!     println!("{} products", controller.rows().await.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                              CLI                                │
//! │   login  products --next  responses --first  cfp export  ...    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────┬──────────────┬───────────┐
//! │  Pagination  │        Remote         │   Session    │  Output   │
//! ├──────────────┼───────────────────────┼──────────────┼───────────┤
//! │ Controller   │ DataTransportClient   │ KV store     │ Tables    │
//! │ Recovery     │ ListFetcher           │ Histories    │ JSON      │
//! │ Link cursor  │ HTTP + abort signals  │ Identity     │ CSV       │
//! └──────────────┴───────────────────────┴──────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the console
pub mod error;

/// Common types and type aliases
pub mod types;

/// Key-value session state: histories, identity, lookup cache
pub mod session;

/// HTTP client with abort signals
pub mod http;

/// Cursor pagination with durable history and recovery
pub mod pagination;

/// Data-transport API client and payloads
pub mod remote;

/// Table, JSON and CSV output
pub mod output;

/// Console configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;
