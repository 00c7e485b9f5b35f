//! Remote data-transport module
//!
//! Typed access to the data-transport API used by every command.
//!
//! # Overview
//!
//! The remote module provides:
//! - `DataTransportClient` - Listing, lookups and mutations
//! - `ListFetcher` - `PageFetcher` implementation for the list views
//! - Payload types (`Part`, `PartsStructure`, `TradeRecord`, `Cfp`, ...)

mod client;
mod fetcher;
mod models;

pub use client::{
    DataTarget, DataTransportClient, ListEndpoint, AUTH_INFO_PATH, DATA_TRANSPORT_PATH,
};
pub use fetcher::ListFetcher;
pub use models::{
    Cfp, Material, OperatorInfo, Part, PartsStructure, TradeRecord, TradeRelation,
    TradeRequestInput, TradeStatus,
};

#[cfg(test)]
mod tests;
