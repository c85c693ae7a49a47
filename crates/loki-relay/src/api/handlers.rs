//! REST endpoint handlers.
//!
//! Every handler logs its operation through the dispatcher (which ships
//! to Loki in the background) and maps Loki failures to the `LOKI_ERROR`
//! envelope. Input problems are reported as `VALIDATION_ERROR` with 400
//! before any upstream call is made.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::api::response::{
    error_response, success_response, CODE_LOKI, CODE_NOT_FOUND, CODE_VALIDATION,
};
use crate::api::ApiState;

/// Body of `POST /api/v1/loki/logs`.
#[derive(Debug, Deserialize)]
pub struct LogQueryRequest {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// `GET /api/v1/loki/label` — all label names known to Loki.
pub(crate) async fn labels(State(state): State<ApiState>) -> Response {
    state.logger.info("Fetching labels from Loki", None);

    match state.client.labels().await {
        Ok(labels) => {
            state.logger.info(
                format!("Successfully retrieved {} labels from Loki", labels.len()),
                None,
            );
            success_response(labels)
        }
        Err(e) => {
            state
                .logger
                .error(format!("Failed to fetch labels from Loki: {e}"), None);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to retrieve labels",
                CODE_LOKI,
            )
        }
    }
}

/// `GET /api/v1/loki/label/{label_name}/values` — all values of one label.
pub(crate) async fn label_values(
    State(state): State<ApiState>,
    Path(label_name): Path<String>,
) -> Response {
    state.logger.info(
        format!("Fetching values for label '{label_name}' from Loki"),
        None,
    );

    match state.client.label_values(&label_name).await {
        Ok(values) => {
            state.logger.info(
                format!(
                    "Successfully retrieved {} values for label '{label_name}' from Loki",
                    values.len()
                ),
                None,
            );
            success_response(values)
        }
        Err(e) => {
            state
                .logger
                .error(format!("Failed to fetch label values from Loki: {e}"), None);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to retrieve label values",
                CODE_LOKI,
            )
        }
    }
}

/// `POST /api/v1/loki/logs` — query logs by label with optional time bounds.
pub(crate) async fn query_logs(
    State(state): State<ApiState>,
    body: Result<Json<LogQueryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(json) => json,
        Err(rejection) => {
            state.logger.warning(
                format!("Failed to parse log query request body: {rejection}"),
                None,
            );
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid JSON in request body",
                CODE_VALIDATION,
            );
        }
    };

    let label = match request.label.as_deref() {
        Some(label) if !label.trim().is_empty() => label.to_string(),
        _ => {
            state
                .logger
                .warning("Received log query request without label parameter", None);
            return error_response(
                StatusCode::BAD_REQUEST,
                "Label parameter is required",
                CODE_VALIDATION,
            );
        }
    };

    let mut log_msg = format!("Querying logs from Loki with label={label}");
    if request.start_time.is_some() || request.end_time.is_some() {
        log_msg += &format!(
            ", start_time={:?}, end_time={:?}",
            request.start_time, request.end_time
        );
    }
    state.logger.info(log_msg, None);

    match state
        .client
        .query_range(
            &label,
            request.start_time.as_deref(),
            request.end_time.as_deref(),
        )
        .await
    {
        Ok(entries) => {
            state.logger.info(
                format!(
                    "Successfully retrieved {} log entries from Loki",
                    entries.len()
                ),
                None,
            );
            success_response(entries)
        }
        Err(e) => {
            state
                .logger
                .error(format!("Failed to query logs from Loki: {e}"), None);
            error_response(StatusCode::BAD_GATEWAY, "Failed to query logs", CODE_LOKI)
        }
    }
}

/// Fallback for unmatched routes.
pub(crate) async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Resource not found", CODE_NOT_FOUND)
}
