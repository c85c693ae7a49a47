//! Standardized JSON response envelopes for the REST API.
//!
//! Success: `{"status": "success", "data": ...}`
//! Error:   `{"status": "error", "message": ..., "code": ...}`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// Error code for malformed or incomplete requests.
pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
/// Error code for failures talking to Loki.
pub const CODE_LOKI: &str = "LOKI_ERROR";
/// Error code for unmatched routes.
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";

/// 200 response wrapping `data` in the success envelope.
pub fn success_response<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "data": data })),
    )
        .into_response()
}

/// Error envelope with the given status, message, and error code.
pub fn error_response(status: StatusCode, message: &str, code: &str) -> Response {
    (
        status,
        Json(json!({ "status": "error", "message": message, "code": code })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let response = success_response(vec!["app", "host"]);
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"][0], "app");
        assert_eq!(json["data"][1], "host");
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            "Label parameter is required",
            CODE_VALIDATION,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Label parameter is required");
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}
