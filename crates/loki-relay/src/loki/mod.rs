//! HTTP client for Grafana Loki.
//!
//! One client covers both directions of the relay: pushing self-logs to
//! the push endpoint and wrapping the label/query endpoints for the REST
//! API. Every call is bounded by [`crate::config::LOKI_REQUEST_TIMEOUT`].

pub mod client;

pub use client::{LogEntry, LokiClient};

/// Any failure to complete a request against Loki: connection failure,
/// timeout, non-2xx status, or a response body that does not parse.
///
/// On the push path this is contained inside the background task and
/// recovered via the fallback sink; on the query path it maps to a
/// `LOKI_ERROR` response envelope.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to Loki failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Loki returned unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid response from Loki: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = TransportError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_malformed_response_display() {
        let err = TransportError::MalformedResponse("missing data field".to_string());
        assert_eq!(
            err.to_string(),
            "invalid response from Loki: missing data field"
        );
    }
}
