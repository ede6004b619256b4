//! Query Gateway HTTP Tests
//!
//! Drives the axum router with `oneshot` requests:
//! - format selection and content types
//! - CORS headers on every response, errors included
//! - area bounds take precedence over bbox
//! - CSV column set
//! - repeated parameters keep their first value
//! - recovery after a malformed query

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use gol::http_server::{GolServer, ServerConfig};

use common::{store, SQUARE_10_20};

// =============================================================================
// Test Utilities
// =============================================================================

fn router_with(config: ServerConfig) -> Router {
    GolServer::new(store(), config)
        .expect("Failed to create server")
        .router()
}

fn router() -> Router {
    router_with(ServerConfig::default())
}

struct TestResponse {
    status: StatusCode,
    content_type: String,
    allow_origin: String,
    allow_methods: String,
    body: String,
}

async fn get(router: Router, uri: &str) -> TestResponse {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default()
    };
    let status = response.status();
    let content_type = header("content-type");
    let allow_origin = header("access-control-allow-origin");
    let allow_methods = header("access-control-allow-methods");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        content_type,
        allow_origin,
        allow_methods,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

// =============================================================================
// Formats
// =============================================================================

#[tokio::test]
async fn test_default_format_is_geojson() {
    let response = get(router(), "/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type, "application/json");
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_content_types() {
    let cases = [
        ("json", "application/json"),
        ("geojsonl", "application/json"),
        ("ndjson", "application/json"),
        ("csv", "text/csv"),
        ("xml", "application/xml"),
        ("brief", "text/plain"),
        ("count", "text/plain"),
        ("list", "text/plain"),
        ("wkt", "text/plain"),
    ];
    for (format, content_type) in cases {
        let response = get(router(), &format!("/?format={}", format)).await;
        assert_eq!(response.status, StatusCode::OK, "format {}", format);
        assert_eq!(response.content_type, content_type, "format {}", format);
    }
}

#[tokio::test]
async fn test_unknown_format_is_rejected() {
    let response = get(router(), "/?format=shapefile&query=n%5B").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.content_type, "text/plain");
    assert_eq!(response.body, "Invalid format");
}

#[tokio::test]
async fn test_query_and_count() {
    let response = get(router(), "/?query=n&format=count").await;
    assert_eq!(response.body, "2\n");
    let response = get(router(), "/?query=n%5Bamenity%3Dcafe%5D&format=list").await;
    assert_eq!(response.body, "node/1\n");
}

// =============================================================================
// Repeated and undecodable parameters
// =============================================================================

#[tokio::test]
async fn test_repeated_unknown_format_is_rejected() {
    let response = get(router(), "/?format=shapefile&format=shapefile").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "Invalid format");
}

#[tokio::test]
async fn test_repeated_parameter_keeps_first_value() {
    let response = get(router(), "/?format=count&query=n&query=n%5B").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type, "text/plain");
    assert_eq!(response.body, "2\n");

    let response = get(router(), "/?format=list&format=geojson&query=a").await;
    assert_eq!(response.body, "way/3\n");
}

#[tokio::test]
async fn test_undecodable_format_is_rejected_with_cors() {
    let response = get(router(), "/?format=%FF&query=n").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "Invalid format");
    assert_eq!(response.allow_origin, "*");
    assert_eq!(response.allow_methods, "GET");
}

#[tokio::test]
async fn test_unrecognised_parameters_are_ignored() {
    let response = get(router(), "/?format=count&query=n&callback=x").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "2\n");
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_headers_on_success_and_error() {
    for uri in ["/?format=count", "/?format=bogus", "/?query=n%5B&format=list"] {
        let response = get(router(), uri).await;
        assert_eq!(response.allow_origin, "*", "{}", uri);
        assert_eq!(response.allow_methods, "GET", "{}", uri);
    }
}

#[tokio::test]
async fn test_configured_cors_origin() {
    let config = ServerConfig {
        cors_origin: "https://maps.example".to_string(),
        ..Default::default()
    };
    let response = get(router_with(config), "/?format=count").await;
    assert_eq!(response.allow_origin, "https://maps.example");
}

// =============================================================================
// Spatial parameters
// =============================================================================

#[tokio::test]
async fn test_bbox_restricts_results() {
    let response = get(router(), "/?bbox=0,0,1,1&format=list").await;
    assert_eq!(response.body, "node/2\n");
}

#[tokio::test]
async fn test_area_overrides_bbox() {
    let uri = format!("/?bbox=0,0,1,1&area={}&format=list", SQUARE_10_20);
    let response = get(router(), &uri).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "node/1\nway/3\n");
}

#[tokio::test]
async fn test_malformed_bbox_is_user_error() {
    let response = get(router(), "/?bbox=1,2,3&format=list").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.starts_with("Invalid bounding box"));
}

#[tokio::test]
async fn test_malformed_area_is_user_error() {
    let response = get(router(), "/?area=1,2,3,4&format=list").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.starts_with("Invalid polygon"));
}

// =============================================================================
// CSV
// =============================================================================

#[tokio::test]
async fn test_csv_uses_fixed_columns() {
    let response = get(router(), "/?format=csv&query=n%5Bamenity%3Dcafe%5D").await;
    let mut lines = response.body.lines();
    assert_eq!(lines.next(), Some("id,lon,lat,tags"));
    assert_eq!(lines.next(), Some("N1,15,15,amenity=cafe;name=Corner"));
    assert_eq!(lines.next(), None);
}

// =============================================================================
// Recovery
// =============================================================================

#[tokio::test]
async fn test_recovers_after_malformed_query() {
    let router = router();
    let response = get(router.clone(), "/?query=n%5Bamenity&format=list").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.starts_with("Invalid query"));

    let response = get(router, "/?query=a&format=list").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "way/3\n");
}

#[tokio::test]
async fn test_capture_failure_is_internal_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = ServerConfig {
        capture_dir: Some(dir.path().join("missing")),
        ..Default::default()
    };
    let response = get(router_with(config), "/?format=count").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, "Internal Server Error");
    assert_eq!(response.allow_origin, "*");
}
