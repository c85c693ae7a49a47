//! Loki client: push path and query wrappers.

use crate::config::{
    Config, LOKI_LABELS_PATH, LOKI_PUSH_PATH, LOKI_QUERY_RANGE_PATH, LOKI_REQUEST_TIMEOUT,
};
use crate::logs::severity::Severity;
use crate::loki::TransportError;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Client for one Loki instance.
#[derive(Debug, Clone)]
pub struct LokiClient {
    client: reqwest::Client,
    base_url: String,
}

/// One log line returned by a range query, with the nanosecond timestamp
/// converted to RFC 3339 and the owning stream's labels attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
    pub labels: HashMap<String, String>,
}

/// Push payload: a single-entry batch in Loki's streams format.
#[derive(Serialize)]
struct PushRequest<'a> {
    streams: Vec<PushStream<'a>>,
}

#[derive(Serialize)]
struct PushStream<'a> {
    stream: &'a HashMap<String, String>,
    values: Vec<(String, String)>,
}

#[derive(Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    data: Vec<String>,
}

#[derive(Deserialize, Default)]
struct QueryRangeResponse {
    #[serde(default)]
    data: QueryRangeData,
}

#[derive(Deserialize, Default)]
struct QueryRangeData {
    #[serde(default)]
    result: Vec<QueryStream>,
}

#[derive(Deserialize)]
struct QueryStream {
    #[serde(default)]
    stream: HashMap<String, String>,
    #[serde(default)]
    values: Vec<(String, String)>,
}

impl LokiClient {
    /// Create a client for the Loki instance at `base_url`. All requests
    /// carry the fixed timeout so no call can hang indefinitely.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(LOKI_REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ship one log record as a single-entry batch.
    ///
    /// Exactly one attempt; any 2xx from Loki is success, everything else
    /// is a [`TransportError`].
    pub async fn push_log(
        &self,
        message: &str,
        severity: Severity,
        labels: &HashMap<String, String>,
    ) -> Result<(), TransportError> {
        let payload = build_push_payload(message, severity, labels);

        let response = self
            .client
            .post(self.url(LOKI_PUSH_PATH))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(status))
        }
    }

    /// Fetch all label names known to Loki.
    pub async fn labels(&self) -> Result<Vec<String>, TransportError> {
        self.fetch_values(self.url(LOKI_LABELS_PATH)).await
    }

    /// Fetch all values of one label.
    pub async fn label_values(&self, label_name: &str) -> Result<Vec<String>, TransportError> {
        self.fetch_values(self.url(&Config::label_values_path(label_name)))
            .await
    }

    async fn fetch_values(&self, url: String) -> Result<Vec<String>, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body: ValuesResponse = response
            .json()
            .await
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;
        Ok(body.data)
    }

    /// Query logs matching a `key:value` label, optionally bounded by
    /// start/end timestamps (passed through to Loki verbatim).
    pub async fn query_range(
        &self,
        label: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<LogEntry>, TransportError> {
        let selector = logql_selector(label);

        let mut request = self
            .client
            .get(self.url(LOKI_QUERY_RANGE_PATH))
            .query(&[("query", selector.as_str())]);
        if let Some(start) = start {
            request = request.query(&[("start", start)]);
        }
        if let Some(end) = end {
            request = request.query(&[("end", end)]);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body: QueryRangeResponse = response
            .json()
            .await
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

        let mut entries = Vec::new();
        for stream in body.data.result {
            for (timestamp_ns, message) in stream.values {
                entries.push(LogEntry {
                    timestamp: format_timestamp(&timestamp_ns)?,
                    message,
                    labels: stream.stream.clone(),
                });
            }
        }
        Ok(entries)
    }
}

/// Build the push payload: current wall-clock time in nanoseconds as a
/// decimal string, the line formatted as `"[LEVEL] message"`, and the
/// label mapping as the stream descriptor.
fn build_push_payload<'a>(
    message: &str,
    severity: Severity,
    labels: &'a HashMap<String, String>,
) -> PushRequest<'a> {
    let timestamp_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos().to_string())
        .unwrap_or_else(|_| "0".to_string());

    PushRequest {
        streams: vec![PushStream {
            stream: labels,
            values: vec![(timestamp_ns, format!("[{severity}] {message}"))],
        }],
    }
}

/// Build a LogQL stream selector from a `key:value` label string.
///
/// `"app:main"` becomes `{app="main"}`; a string without a separator is
/// passed through inside braces.
#[must_use]
pub fn logql_selector(label: &str) -> String {
    match label.split_once(':') {
        Some((key, value)) => format!("{{{key}=\"{value}\"}}"),
        None => format!("{{{label}}}"),
    }
}

/// Convert a nanosecond-epoch decimal string to RFC 3339.
fn format_timestamp(timestamp_ns: &str) -> Result<String, TransportError> {
    let ns: i64 = timestamp_ns.parse().map_err(|_| {
        TransportError::MalformedResponse(format!(
            "invalid nanosecond timestamp '{timestamp_ns}'"
        ))
    })?;

    let secs = ns.div_euclid(1_000_000_000);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let subsec_nanos = ns.rem_euclid(1_000_000_000) as u32;

    DateTime::from_timestamp(secs, subsec_nanos)
        .map(|dt| dt.to_rfc3339())
        .ok_or_else(|| {
            TransportError::MalformedResponse(format!(
                "nanosecond timestamp '{timestamp_ns}' is out of range"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logql_selector_key_value() {
        assert_eq!(logql_selector("app:main"), "{app=\"main\"}");
    }

    #[test]
    fn test_logql_selector_without_separator() {
        assert_eq!(logql_selector("app"), "{app}");
    }

    #[test]
    fn test_push_payload_shape() {
        let mut labels = HashMap::new();
        labels.insert("app".to_string(), "main".to_string());

        let payload = build_push_payload("boot complete", Severity::Info, &labels);
        let json = serde_json::to_value(&payload).unwrap();

        let streams = json["streams"].as_array().unwrap();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0]["stream"]["app"], "main");

        let values = streams[0]["values"].as_array().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0][1], "[INFO] boot complete");

        let timestamp = values[0][0].as_str().unwrap();
        assert!(!timestamp.is_empty());
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_payload_labels_are_verbatim() {
        let mut labels = HashMap::new();
        labels.insert("env".to_string(), "prod".to_string());
        labels.insert("host".to_string(), "node-1".to_string());

        let payload = build_push_payload("m", Severity::Error, &labels);
        let json = serde_json::to_value(&payload).unwrap();

        let stream = json["streams"][0]["stream"].as_object().unwrap();
        assert_eq!(stream.len(), 2);
        assert_eq!(stream["env"], "prod");
        assert_eq!(stream["host"], "node-1");
    }

    #[test]
    fn test_format_timestamp() {
        // 2024-01-01T00:00:00Z in nanoseconds
        let formatted = format_timestamp("1704067200000000000").unwrap();
        assert!(formatted.starts_with("2024-01-01T00:00:00"));
    }

    #[test]
    fn test_format_timestamp_rejects_garbage() {
        assert!(format_timestamp("not-a-number").is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = LokiClient::new("http://localhost:3100/");
        assert_eq!(
            client.url(LOKI_PUSH_PATH),
            "http://localhost:3100/loki/api/v1/push"
        );
    }
}
