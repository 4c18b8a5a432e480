//! HTTP endpoint server using Axum
//!
//! The request orchestrator: validates query parameters, fetches a
//! candle series from the configured provider, runs the signal engine
//! and serializes the result. All synthesis failures map to typed
//! client-facing errors; the engine itself never touches the network.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::{self, ProviderConfig};
use crate::metrics::Metrics;
use crate::models::signal::Signal;
use crate::services::market_data::{MarketDataProvider, ProviderError};
use crate::services::twelvedata::TwelveDataProvider;
use crate::signals::engine::{EngineConfig, SignalEngine, SignalError};

const DEFAULT_SYMBOL: &str = "XAUUSD";
const DEFAULT_TIMEFRAME: &str = "15m";
const SUPPORTED_TIMEFRAMES: &[&str] = &["1m", "5m", "15m", "30m", "1h", "4h", "1d"];
/// Comfortably past the 200-bar slow EMA warm-up.
const CANDLE_FETCH_LIMIT: usize = 250;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub engine: Arc<SignalEngine>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid parameter: {0}")]
    BadRequest(String),

    #[error("insufficient market history: {0}")]
    NotReady(String),

    #[error("market data provider failure: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotReady(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<SignalError> for ApiError {
    fn from(err: SignalError) -> Self {
        match err {
            SignalError::InsufficientData { .. } | SignalError::NotReady => {
                ApiError::NotReady(err.to_string())
            }
            SignalError::Indicator(_) => ApiError::Internal(err.to_string()),
        }
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "signals-backend running",
        "service": "trendcast-signal-engine"
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "trendcast-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    symbol: Option<String>,
    tf: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    symbol: String,
    timeframe: String,
    #[serde(flatten)]
    signal: Signal,
}

fn validate_symbol(raw: &str) -> Result<String, ApiError> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty()
        || symbol.len() > 12
        || !symbol.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ApiError::BadRequest(format!("unsupported symbol: {raw}")));
    }
    Ok(symbol)
}

fn validate_timeframe(raw: &str) -> Result<String, ApiError> {
    if SUPPORTED_TIMEFRAMES.contains(&raw) {
        return Ok(raw.to_string());
    }
    Err(ApiError::BadRequest(format!(
        "unsupported timeframe: {raw} (expected one of {})",
        SUPPORTED_TIMEFRAMES.join(", ")
    )))
}

/// Fetch candles for the requested market and synthesize a signal.
async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let symbol = validate_symbol(params.symbol.as_deref().unwrap_or(DEFAULT_SYMBOL))?;
    let timeframe = validate_timeframe(params.tf.as_deref().unwrap_or(DEFAULT_TIMEFRAME))?;

    let candles = state
        .provider
        .fetch_candles(&symbol, &timeframe, CANDLE_FETCH_LIMIT)
        .await
        .map_err(|e| {
            error!(error = %e, symbol = %symbol, timeframe = %timeframe, "candle fetch failed");
            ApiError::from(e)
        })?;

    let precision = config::decimal_places(&symbol);
    let signal = state.engine.evaluate(&candles, precision)?;
    state.metrics.signals_generated_total.inc();

    info!(
        symbol = %symbol,
        timeframe = %timeframe,
        trend = ?signal.trend,
        confidence = signal.confidence,
        "signal synthesized"
    );

    Ok(Json(AnalyzeResponse {
        symbol,
        timeframe,
        signal,
    }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/analyze", get(analyze))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(TwelveDataProvider::new(ProviderConfig::from_env()));

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        provider,
        engine: Arc::new(SignalEngine::new(EngineConfig::default())),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
