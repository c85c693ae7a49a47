//! Fire-and-forget log dispatcher.
//!
//! Each logging call spawns one detached tokio task and returns before
//! any network activity happens, so caller latency is independent of
//! transport latency. The task makes exactly one delivery attempt; on a
//! [`TransportError`] it falls back to local logging. Nothing is retried,
//! buffered, or awaited, and no error ever reaches the caller.
//!
//! Must be called from within a tokio runtime. In-flight tasks are not
//! drained on shutdown; callers that need delivery confirmation have to
//! wait themselves before exiting.

use crate::logs::fallback;
use crate::logs::severity::Severity;
use crate::loki::client::LokiClient;
use std::collections::HashMap;
use std::sync::Arc;

/// Key used when the configured default label string has no `:` separator.
const GENERIC_LABEL_KEY: &str = "label";

/// Non-blocking, level-tagged logger shipping to Loki.
///
/// Constructed once at startup and shared by `Arc` with every component
/// that needs to log. The default label set is resolved at construction
/// and read-only afterwards, so concurrent tasks share it without
/// synchronization.
#[derive(Clone)]
pub struct LogDispatcher {
    client: Arc<LokiClient>,
    default_labels: HashMap<String, String>,
}

impl LogDispatcher {
    /// Create a dispatcher shipping through `client`, with the default
    /// label set resolved from a `key:value` string.
    #[must_use]
    pub fn new(client: Arc<LokiClient>, default_label: &str) -> Self {
        Self {
            client,
            default_labels: parse_default_label(default_label),
        }
    }

    /// The label set attached to calls that supply no explicit labels.
    #[must_use]
    pub fn default_labels(&self) -> &HashMap<String, String> {
        &self.default_labels
    }

    /// Log a DEBUG level message.
    pub fn debug(&self, message: impl Into<String>, labels: Option<HashMap<String, String>>) {
        self.dispatch(Severity::Debug, message.into(), labels);
    }

    /// Log an INFO level message.
    pub fn info(&self, message: impl Into<String>, labels: Option<HashMap<String, String>>) {
        self.dispatch(Severity::Info, message.into(), labels);
    }

    /// Log a WARNING level message.
    pub fn warning(&self, message: impl Into<String>, labels: Option<HashMap<String, String>>) {
        self.dispatch(Severity::Warning, message.into(), labels);
    }

    /// Log an ERROR level message.
    pub fn error(&self, message: impl Into<String>, labels: Option<HashMap<String, String>>) {
        self.dispatch(Severity::Error, message.into(), labels);
    }

    /// Schedule one delivery attempt and return immediately.
    ///
    /// The record carries exactly the supplied labels when given,
    /// otherwise exactly the default set. Never merged, never empty.
    fn dispatch(
        &self,
        severity: Severity,
        message: String,
        labels: Option<HashMap<String, String>>,
    ) {
        let client = Arc::clone(&self.client);
        let labels = labels.unwrap_or_else(|| self.default_labels.clone());

        // Detached: the handle is dropped, the task runs to completion on
        // its own and all delivery errors are contained inside it.
        tokio::spawn(async move {
            if let Err(e) = client.push_log(&message, severity, &labels).await {
                fallback::delivery_failure(&e);
                fallback::emit(severity, &message);
            }
        });
    }
}

/// Resolve the default label mapping from a `key:value` string.
///
/// Splits on the first `:`; a string without a separator becomes the
/// value under a generic key.
#[must_use]
pub fn parse_default_label(raw: &str) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    match raw.split_once(':') {
        Some((key, value)) => {
            labels.insert(key.to_string(), value.to_string());
        }
        None => {
            labels.insert(GENERIC_LABEL_KEY.to_string(), raw.to_string());
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_label_key_value() {
        let labels = parse_default_label("app:main");
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get("app"), Some(&"main".to_string()));
    }

    #[test]
    fn test_parse_default_label_splits_on_first_colon() {
        let labels = parse_default_label("app:main:extra");
        assert_eq!(labels.get("app"), Some(&"main:extra".to_string()));
    }

    #[test]
    fn test_parse_default_label_without_separator() {
        let labels = parse_default_label("standalone");
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get("label"), Some(&"standalone".to_string()));
    }

    #[test]
    fn test_dispatcher_exposes_resolved_defaults() {
        let client = Arc::new(LokiClient::new("http://localhost:3100"));
        let dispatcher = LogDispatcher::new(client, "app:main");
        assert_eq!(
            dispatcher.default_labels().get("app"),
            Some(&"main".to_string())
        );
    }
}
