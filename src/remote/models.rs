//! Data-transport payload types
//!
//! Field names follow the API's camelCase JSON. Unknown fields are ignored and
//! most fields are optional so partially filled records still decode.

use serde::{Deserialize, Serialize};

/// Operator returned by the auth-info endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorInfo {
    pub operator_id: String,
    #[serde(default)]
    pub operator_name: Option<String>,
    #[serde(default)]
    pub operator_address: Option<String>,
    #[serde(default)]
    pub open_operator_id: Option<String>,
}

/// A product or component registered by an operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_id: Option<String>,
    #[serde(default)]
    pub parts_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_parts_name: Option<String>,
    #[serde(default)]
    pub terminated_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_required: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_required_unit: Option<String>,
}

/// Bill of materials: one parent part and its direct children
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartsStructure {
    pub parent_part: Part,
    #[serde(default)]
    pub children_parts: Vec<Part>,
}

/// Link between a downstream part and the upstream part supplying it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRelation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    #[serde(default)]
    pub downstream_operator_id: String,
    #[serde(default)]
    pub upstream_operator_id: String,
    #[serde(default)]
    pub downstream_trace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_trace_id: Option<String>,
}

/// Progress of a CFP request between two partners
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfp_response_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_tree_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_message: Option<String>,
}

/// Row of the responses and CFP request lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub trade_relation: TradeRelation,
    #[serde(default)]
    pub status: TradeStatus,
    #[serde(default, alias = "downstreamPart", skip_serializing_if = "Option::is_none")]
    pub part: Option<Part>,
}

/// New CFP request sent to an upstream partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequestInput {
    pub downstream_trace_id: String,
    pub upstream_operator_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Carbon footprint value of one part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cfp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfp_id: Option<String>,
    pub trace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghg_emission: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghg_declared_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfp_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dqr_type: Option<String>,
}

/// Entry of the material lookup list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub material_name: String,
}
