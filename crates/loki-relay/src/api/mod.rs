//! REST API: router construction and the server loop.
//!
//! The API is a thin relay: each endpoint validates its input, calls the
//! corresponding Loki wrapper, and wraps the result in the standard
//! envelope. CORS is open for `/api/*` so a browser frontend can talk to
//! the relay directly.

pub mod handlers;
pub mod response;

use crate::config::Config;
use crate::error::RelayError;
use crate::logs::LogDispatcher;
use crate::loki::LokiClient;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::debug;

const API_LABELS_PATH: &str = "/api/v1/loki/label";
const API_LABEL_VALUES_PATH: &str = "/api/v1/loki/label/{label_name}/values";
const API_QUERY_LOGS_PATH: &str = "/api/v1/loki/logs";

/// Query bodies are tiny; anything bigger than this is not a legitimate
/// request.
const REQUEST_BODY_LIMIT: usize = 64 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    /// Client for the Loki instance being relayed to.
    pub client: Arc<LokiClient>,
    /// Dispatcher for the relay's own operational logs.
    pub logger: Arc<LogDispatcher>,
}

/// Build the API router.
pub fn make_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route(API_LABELS_PATH, get(handlers::labels))
        .route(API_LABEL_VALUES_PATH, get(handlers::label_values))
        .route(API_QUERY_LOGS_PATH, post(handlers::query_logs))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(REQUEST_BODY_LIMIT))
        .with_state(state)
}

/// Bind the configured address and serve until the token is cancelled.
pub async fn serve(
    config: &Config,
    state: ApiState,
    shutdown_token: CancellationToken,
) -> Result<(), RelayError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| RelayError::Server(format!("failed to bind {addr}: {e}")))?;

    debug!("API server listening on {addr}");

    axum::serve(listener, make_router(state))
        .with_graceful_shutdown(graceful_shutdown(shutdown_token))
        .await
        .map_err(|e| RelayError::Server(e.to_string()))
}

async fn graceful_shutdown(shutdown_token: CancellationToken) {
    shutdown_token.cancelled().await;
    debug!("Shutdown signal received, shutting down API server");
}
