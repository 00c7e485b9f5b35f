//! Tests for the remote module

use super::*;
use crate::config::ApiConfig;
use crate::error::Error;
use crate::http::{AbortSignal, HttpClient, HttpClientConfig};
use crate::pagination::PageFetcher;
use crate::types::{PageName, PAGE_SIZE};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DataTransportClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .api_key("key-1")
        .bearer_token("tok-1")
        .build();
    DataTransportClient::new(HttpClient::with_config(config).unwrap())
}

fn parts_json(names: &[&str]) -> serde_json::Value {
    json!(names
        .iter()
        .map(|n| json!({ "traceId": format!("t-{n}"), "partsName": n }))
        .collect::<Vec<_>>())
}

#[test_case(PageName::Products, DataTarget::Parts, true ; "products are parent parts")]
#[test_case(PageName::LinkPartsCandidates, DataTarget::Parts, false ; "link candidates are all parts")]
#[test_case(PageName::Responses, DataTarget::TradeResponse, false ; "responses")]
#[test_case(PageName::CfpRequestList, DataTarget::TradeRequest, false ; "cfp requests")]
fn test_list_endpoint_for_page(page: PageName, target: DataTarget, parent_only: bool) {
    let endpoint = ListEndpoint::for_page(page);
    assert_eq!(endpoint.data_target, target);
    assert_eq!(endpoint.parent_only, parent_only);
}

#[tokio::test]
async fn test_list_page_reads_rows_and_next_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datatransport"))
        .and(query_param("dataTarget", "parts"))
        .and(query_param("operatorId", "op-1"))
        .and(query_param("limit", "100"))
        .and(query_param("parentFlag", "true"))
        .and(query_param_is_missing("after"))
        .and(header("apiKey", "key-1"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    "<https://api.example.com/api/v1/datatransport?dataTarget=parts&after=c-2>; rel=\"next\"",
                )
                .set_body_json(parts_json(&["a", "b"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page: crate::pagination::Page<Part> = client
        .list_page(
            ListEndpoint::for_page(PageName::Products),
            "op-1",
            None,
            PAGE_SIZE,
            &AbortSignal::never(),
        )
        .await
        .unwrap();

    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[1].parts_name, "b");
    assert_eq!(page.next_cursor.as_deref(), Some("c-2"));
}

#[tokio::test]
async fn test_list_page_without_link_is_last() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datatransport"))
        .and(query_param("dataTarget", "tradeResponse"))
        .and(query_param("after", "c-9"))
        .and(query_param_is_missing("parentFlag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page: crate::pagination::Page<TradeRecord> = client
        .list_page(
            ListEndpoint::for_page(PageName::Responses),
            "op-1",
            Some("c-9"),
            PAGE_SIZE,
            &AbortSignal::never(),
        )
        .await
        .unwrap();

    assert!(page.rows.is_empty());
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn test_list_fetcher_forwards_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datatransport"))
        .and(query_param("dataTarget", "tradeRequest"))
        .and(query_param("operatorId", "op-7"))
        .and(query_param("after", "c-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "tradeRelation": {
                "tradeId": "tr-1",
                "downstreamOperatorId": "op-7",
                "upstreamOperatorId": "op-8",
                "downstreamTraceId": "t-1"
            },
            "status": { "cfpResponseStatus": "NOT_COMPLETED" },
            "downstreamPart": { "traceId": "t-1", "partsName": "frame" }
        }])))
        .mount(&server)
        .await;

    let fetcher: ListFetcher<TradeRecord> =
        ListFetcher::new(client_for(&server), PageName::CfpRequestList, "op-7");
    let page = fetcher
        .fetch_page(Some("c-3"), PAGE_SIZE, &AbortSignal::never())
        .await
        .unwrap();

    assert_eq!(page.rows.len(), 1);
    let record = &page.rows[0];
    assert_eq!(record.trade_relation.trade_id.as_deref(), Some("tr-1"));
    assert_eq!(record.status.cfp_response_status.as_deref(), Some("NOT_COMPLETED"));
    assert_eq!(record.part.as_ref().map(|p| p.parts_name.as_str()), Some("frame"));
}

#[tokio::test]
async fn test_list_page_maps_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datatransport"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "BadRequest",
            "message": "Validation failed",
            "detail": "after: invalid cursor"
        })))
        .mount(&server)
        .await;

    let fetcher: ListFetcher<Part> = ListFetcher::new(client_for(&server), PageName::Products, "op-1");
    let err = fetcher
        .fetch_page(Some("bogus"), PAGE_SIZE, &AbortSignal::never())
        .await
        .unwrap_err();

    assert!(err.is_api_status(400));
    assert!(err.to_string().contains("invalid cursor"));
}

#[tokio::test]
async fn test_operator_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/authInfo"))
        .and(query_param("dataTarget", "operator"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operatorId": "op-1",
            "operatorName": "Acme Motors",
            "openOperatorId": "1234567890123"
        })))
        .mount(&server)
        .await;

    let info = client_for(&server).operator_info().await.unwrap();
    assert_eq!(info.operator_id, "op-1");
    assert_eq!(info.operator_name.as_deref(), Some("Acme Motors"));
    assert!(info.operator_address.is_none());
}

#[tokio::test]
async fn test_cfp_joins_trace_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datatransport"))
        .and(query_param("dataTarget", "cfp"))
        .and(query_param("traceIds", "t-1,t-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "traceId": "t-1", "ghgEmission": 1.5, "ghgDeclaredUnit": "kgCO2e/kilogram", "cfpType": "preProduction" },
            { "traceId": "t-2", "ghgEmission": 0.25, "cfpType": "mainProduction" }
        ])))
        .mount(&server)
        .await;

    let values = client_for(&server)
        .cfp(&["t-1".to_string(), "t-2".to_string()])
        .await
        .unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].ghg_emission, Some(1.5));
    assert_eq!(values[1].cfp_type.as_deref(), Some("mainProduction"));
}

#[tokio::test]
async fn test_cfp_requires_trace_ids() {
    let server = MockServer::start().await;
    let err = client_for(&server).cfp(&[]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
    // Rejected before any request goes out
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_material_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datatransport"))
        .and(query_param("dataTarget", "materials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "materialName": "aluminium" },
            { "materialName": "steel" }
        ])))
        .mount(&server)
        .await;

    let names = client_for(&server).material_names().await.unwrap();
    assert_eq!(names, vec!["aluminium".to_string(), "steel".to_string()]);
}

#[tokio::test]
async fn test_submit_trade_requests_sends_body_once() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/datatransport"))
        .and(query_param("dataTarget", "tradeRequest"))
        .and(body_json(json!([
            { "downstreamTraceId": "t-1", "upstreamOperatorId": "op-2", "message": "please" }
        ])))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit_trade_requests(&[TradeRequestInput {
            downstream_trace_id: "t-1".into(),
            upstream_operator_id: "op-2".into(),
            message: Some("please".into()),
        }])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_link_trade_response() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/datatransport"))
        .and(query_param("dataTarget", "tradeResponse"))
        .and(query_param("operatorId", "op-2"))
        .and(query_param("tradeId", "tr-1"))
        .and(query_param("traceId", "t-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tradeId": "tr-1",
            "downstreamOperatorId": "op-1",
            "upstreamOperatorId": "op-2",
            "downstreamTraceId": "t-1",
            "upstreamTraceId": "t-9"
        })))
        .mount(&server)
        .await;

    let relation = client_for(&server)
        .link_trade_response("op-2", "tr-1", "t-9")
        .await
        .unwrap();
    assert_eq!(relation.upstream_trace_id.as_deref(), Some("t-9"));
}

#[tokio::test]
async fn test_register_parts_structure() {
    let server = MockServer::start().await;
    let structure = PartsStructure {
        parent_part: Part {
            parts_name: "bicycle".into(),
            ..Default::default()
        },
        children_parts: vec![Part {
            parts_name: "frame".into(),
            amount_required: Some(1.0),
            ..Default::default()
        }],
    };
    Mock::given(method("PUT"))
        .and(path("/api/v1/datatransport"))
        .and(query_param("dataTarget", "partsStructure"))
        .and(body_json(json!({
            "parentPart": { "partsName": "bicycle", "terminatedFlag": false },
            "childrenParts": [
                { "partsName": "frame", "terminatedFlag": false, "amountRequired": 1.0 }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "parentPart": { "traceId": "t-p", "partsName": "bicycle" },
            "childrenParts": [{ "traceId": "t-c", "partsName": "frame", "amountRequired": 1.0 }]
        })))
        .mount(&server)
        .await;

    let registered = client_for(&server)
        .register_parts_structure(&structure)
        .await
        .unwrap();
    assert_eq!(registered.parent_part.trace_id.as_deref(), Some("t-p"));
    assert_eq!(registered.children_parts.len(), 1);
}

#[tokio::test]
async fn test_from_config_sets_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/authInfo"))
        .and(header("apiKey", "cfg-key"))
        .and(header("Authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "operatorId": "op-3" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiConfig {
        base_url: server.uri(),
        api_key: Some("cfg-key".into()),
        ..Default::default()
    };
    let client = DataTransportClient::from_config(&api, Some("session-token")).unwrap();
    assert_eq!(client.operator_info().await.unwrap().operator_id, "op-3");
}
