//! Integration tests for the API Server
//!
//! Covers the analyze endpoint, parameter validation, upstream error
//! mapping, health checks, and metrics.


use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use test_utils::{trending_series_payload, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "trendcast-signal-engine");
}

#[tokio::test]
async fn root_endpoint_reports_running() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "signals-backend running");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains("http_requests_in_flight"));
}

#[tokio::test]
async fn analyze_synthesizes_buy_signal_from_rising_series() {
    let app = TestApiServer::new().await;
    Mock::given(method("GET"))
        .and(path("/time_series"))
        .and(query_param("symbol", "XAUUSD"))
        .and(query_param("interval", "15min"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(trending_series_payload(260, 2000.0, 1.0)),
        )
        .mount(&app.market_data)
        .await;

    let response = app
        .server
        .get("/analyze")
        .add_query_param("symbol", "XAUUSD")
        .add_query_param("tf", "15m")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "XAUUSD");
    assert_eq!(body["timeframe"], "15m");
    assert_eq!(body["trend"], "BUY");

    let entry = body["entry"].as_f64().unwrap();
    let stop_loss = body["stop_loss"].as_f64().unwrap();
    let take_profit = body["take_profit"].as_f64().unwrap();
    assert!(stop_loss < entry && entry < take_profit);

    let reward = take_profit - entry;
    let risk = entry - stop_loss;
    assert!((reward - 2.0 * risk).abs() < 1e-9);

    let confidence = body["confidence"].as_u64().unwrap();
    assert!((35..=90).contains(&confidence));

    assert!(body["indicators"]["ema_fast"].as_f64().is_some());
    assert!(body["indicators"]["ema_slow"].as_f64().is_some());
    assert!(body["indicators"]["rsi"].as_f64().is_some());
    assert!(body["indicators"]["atr"].as_f64().is_some());
}

#[tokio::test]
async fn analyze_defaults_to_xauusd_15m() {
    let app = TestApiServer::new().await;
    Mock::given(method("GET"))
        .and(path("/time_series"))
        .and(query_param("symbol", "XAUUSD"))
        .and(query_param("interval", "15min"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(trending_series_payload(260, 2000.0, 1.0)),
        )
        .mount(&app.market_data)
        .await;

    let response = app.server.get("/analyze").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "XAUUSD");
    assert_eq!(body["timeframe"], "15m");
}

#[tokio::test]
async fn analyze_lowercase_symbol_is_normalized() {
    let app = TestApiServer::new().await;
    Mock::given(method("GET"))
        .and(path("/time_series"))
        .and(query_param("symbol", "EURUSD"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(trending_series_payload(260, 1.1, 0.0001)),
        )
        .mount(&app.market_data)
        .await;

    let response = app
        .server
        .get("/analyze")
        .add_query_param("symbol", "eurusd")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "EURUSD");
}

#[tokio::test]
async fn analyze_rejects_malformed_symbol() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/analyze")
        .add_query_param("symbol", "BAD SYMBOL!")
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("symbol"));
}

#[tokio::test]
async fn analyze_rejects_unknown_timeframe() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/analyze")
        .add_query_param("tf", "7m")
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("timeframe"));
}

#[tokio::test]
async fn analyze_with_short_history_is_unprocessable() {
    let app = TestApiServer::new().await;
    Mock::given(method("GET"))
        .and(path("/time_series"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(trending_series_payload(50, 2000.0, 1.0)),
        )
        .mount(&app.market_data)
        .await;

    let response = app.server.get("/analyze").await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("insufficient"));
}

#[tokio::test]
async fn analyze_maps_provider_rejection_to_bad_gateway() {
    let app = TestApiServer::new().await;
    Mock::given(method("GET"))
        .and(path("/time_series"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "code": 404,
            "message": "symbol not found"
        })))
        .mount(&app.market_data)
        .await;

    let response = app.server.get("/analyze").await;
    assert_eq!(response.status_code(), 502);
}

#[tokio::test]
async fn analyze_maps_upstream_http_error_to_bad_gateway() {
    let app = TestApiServer::new().await;
    Mock::given(method("GET"))
        .and(path("/time_series"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.market_data)
        .await;

    let response = app.server.get("/analyze").await;
    assert_eq!(response.status_code(), 502);
}
