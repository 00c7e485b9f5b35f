//! Typed data-transport API client

use super::models::{
    Cfp, Material, OperatorInfo, PartsStructure, TradeRelation, TradeRequestInput,
};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::{AbortSignal, HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{next_cursor, Page};
use crate::types::PageName;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Path of the data-transport endpoint
pub const DATA_TRANSPORT_PATH: &str = "api/v1/datatransport";

/// Path of the auth-info endpoint
pub const AUTH_INFO_PATH: &str = "api/v1/authInfo";

/// Resource selected through the `dataTarget` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTarget {
    Parts,
    PartsStructure,
    TradeRequest,
    TradeResponse,
    Cfp,
    Materials,
}

impl DataTarget {
    /// Wire name of the target
    pub fn as_str(&self) -> &'static str {
        match self {
            DataTarget::Parts => "parts",
            DataTarget::PartsStructure => "partsStructure",
            DataTarget::TradeRequest => "tradeRequest",
            DataTarget::TradeResponse => "tradeResponse",
            DataTarget::Cfp => "cfp",
            DataTarget::Materials => "materials",
        }
    }
}

/// Listing endpoint backing one list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEndpoint {
    /// Listed resource
    pub data_target: DataTarget,
    /// Restrict the listing to parent parts (products)
    pub parent_only: bool,
}

impl ListEndpoint {
    /// Endpoint for the given list view
    pub fn for_page(page: PageName) -> Self {
        match page {
            PageName::Products => Self {
                data_target: DataTarget::Parts,
                parent_only: true,
            },
            PageName::LinkPartsCandidates => Self {
                data_target: DataTarget::Parts,
                parent_only: false,
            },
            PageName::Responses => Self {
                data_target: DataTarget::TradeResponse,
                parent_only: false,
            },
            PageName::CfpRequestList => Self {
                data_target: DataTarget::TradeRequest,
                parent_only: false,
            },
        }
    }
}

/// Client for the data-transport API
#[derive(Debug, Clone)]
pub struct DataTransportClient {
    http: HttpClient,
}

impl DataTransportClient {
    /// Wrap an HTTP client already pointed at the API base URL
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build a client from config and the session's access token
    pub fn from_config(api: &ApiConfig, access_token: Option<&str>) -> Result<Self> {
        let mut builder = HttpClientConfig::builder()
            .base_url(&api.base_url)
            .timeout(Duration::from_secs(api.timeout_secs));

        if let Some(key) = &api.api_key {
            builder = builder.api_key(key);
        }
        if let Some(token) = access_token {
            builder = builder.bearer_token(token);
        }
        if let Some(agent) = &api.user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(Self::new(HttpClient::with_config(builder.build())?))
    }

    fn target(target: DataTarget) -> RequestConfig {
        RequestConfig::new().query("dataTarget", target.as_str())
    }

    async fn get<T: DeserializeOwned>(&self, config: RequestConfig) -> Result<T> {
        self.http
            .get_json(DATA_TRANSPORT_PATH, config, &AbortSignal::never())
            .await
    }

    async fn put<T: DeserializeOwned>(&self, config: RequestConfig) -> Result<T> {
        self.http.put_json(DATA_TRANSPORT_PATH, config).await
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Fetch one page of a listing
    ///
    /// The next cursor comes from the `Link` header; its absence marks the
    /// last page.
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        endpoint: ListEndpoint,
        operator_id: &str,
        cursor: Option<&str>,
        limit: u32,
        signal: &AbortSignal,
    ) -> Result<Page<T>> {
        let mut config = Self::target(endpoint.data_target)
            .query("operatorId", operator_id)
            .query("limit", limit.to_string())
            .query_opt("after", cursor);
        if endpoint.parent_only {
            config = config.query("parentFlag", "true");
        }

        let response = self.http.get(DATA_TRANSPORT_PATH, config, signal).await?;
        let next = next_cursor(response.headers());
        let rows: Vec<T> = HttpClient::read_json(response, signal).await?;

        debug!(
            target = endpoint.data_target.as_str(),
            rows = rows.len(),
            has_next = next.is_some(),
            "Fetched list page"
        );
        Ok(Page::new(rows, next))
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Operator owning the current access token
    pub async fn operator_info(&self) -> Result<OperatorInfo> {
        let config = RequestConfig::new().query("dataTarget", "operator");
        self.http
            .get_json(AUTH_INFO_PATH, config, &AbortSignal::never())
            .await
    }

    /// Parts structure rooted at `trace_id`
    pub async fn parts_structure(&self, trace_id: &str) -> Result<PartsStructure> {
        self.get(Self::target(DataTarget::PartsStructure).query("traceId", trace_id))
            .await
    }

    /// CFP values of the given parts
    pub async fn cfp(&self, trace_ids: &[String]) -> Result<Vec<Cfp>> {
        if trace_ids.is_empty() {
            return Err(Error::input("At least one trace id is required"));
        }
        self.get(Self::target(DataTarget::Cfp).query("traceIds", trace_ids.join(",")))
            .await
    }

    /// Names of all registered materials
    pub async fn material_names(&self) -> Result<Vec<String>> {
        let materials: Vec<Material> = self.get(Self::target(DataTarget::Materials)).await?;
        Ok(materials.into_iter().map(|m| m.material_name).collect())
    }

    // ========================================================================
    // Mutations (never retried)
    // ========================================================================

    /// Register or update a parts structure
    pub async fn register_parts_structure(
        &self,
        structure: &PartsStructure,
    ) -> Result<PartsStructure> {
        let body = serde_json::to_value(structure)?;
        let registered: PartsStructure = self
            .put(Self::target(DataTarget::PartsStructure).json(body))
            .await?;
        info!(
            parent = %registered.parent_part.parts_name,
            children = registered.children_parts.len(),
            "Registered parts structure"
        );
        Ok(registered)
    }

    /// Send CFP requests to upstream partners
    pub async fn submit_trade_requests(
        &self,
        requests: &[TradeRequestInput],
    ) -> Result<Vec<TradeRelation>> {
        let body = serde_json::to_value(requests)?;
        let relations: Vec<TradeRelation> = self
            .put(Self::target(DataTarget::TradeRequest).json(body))
            .await?;
        info!(count = relations.len(), "Submitted CFP requests");
        Ok(relations)
    }

    /// Answer a received request by linking one of the operator's parts
    pub async fn link_trade_response(
        &self,
        operator_id: &str,
        trade_id: &str,
        trace_id: &str,
    ) -> Result<TradeRelation> {
        let config = Self::target(DataTarget::TradeResponse)
            .query("operatorId", operator_id)
            .query("tradeId", trade_id)
            .query("traceId", trace_id);
        let relation: TradeRelation = self.put(config).await?;
        info!(trade_id, trace_id, "Linked part to request");
        Ok(relation)
    }

    /// Register CFP values
    pub async fn register_cfp(&self, values: &[Cfp]) -> Result<Vec<Cfp>> {
        let body = serde_json::to_value(values)?;
        let registered: Vec<Cfp> = self.put(Self::target(DataTarget::Cfp).json(body)).await?;
        info!(count = registered.len(), "Registered CFP values");
        Ok(registered)
    }
}
