//! List fetchers backing the list views

use super::client::{DataTransportClient, ListEndpoint};
use crate::error::Result;
use crate::http::AbortSignal;
use crate::pagination::{Page, PageFetcher};
use crate::types::PageName;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Pages of one listing endpoint for one operator
pub struct ListFetcher<T> {
    client: DataTransportClient,
    endpoint: ListEndpoint,
    operator_id: String,
    _row: PhantomData<fn() -> T>,
}

impl<T> ListFetcher<T> {
    /// Fetcher for the list view `page`
    pub fn new(client: DataTransportClient, page: PageName, operator_id: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: ListEndpoint::for_page(page),
            operator_id: operator_id.into(),
            _row: PhantomData,
        }
    }
}

#[async_trait]
impl<T> PageFetcher for ListFetcher<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Row = T;

    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        limit: u32,
        signal: &AbortSignal,
    ) -> Result<Page<T>> {
        self.client
            .list_page(self.endpoint, &self.operator_id, cursor, limit, signal)
            .await
    }
}
