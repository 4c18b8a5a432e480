//! Trendcast API Server
//!
//! HTTP API exposing the trading-signal endpoint along with health
//! check and metrics. The service is stateless and can be
//! horizontally scaled.

use dotenvy::dotenv;
use std::env;
use tokio::signal;
use tracing::{error, info};
use trendcast::core::http::start_server;
use trendcast::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let env = trendcast::config::get_environment();
    info!("Starting Trendcast API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
